// src/config.rs

mod config;

pub use config::AppState;
