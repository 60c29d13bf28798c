//! Resume optimizer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod rewrite;
pub mod scoring;

pub use config::Config;
pub use error::{Result, ResumeOptimizerError};
