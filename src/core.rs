pub mod algorithms;
pub mod board;
pub mod config;
pub mod definitions;
pub mod engine;
pub mod error;
pub mod executor;
pub mod game;
pub mod utils;
