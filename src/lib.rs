pub mod buildx;
pub mod cli;
pub mod config;
pub mod constants;
pub mod image;
pub mod manifest;
pub mod prompt;
pub mod runner;
pub mod service;

pub use anyhow::Result;
