//! Codervet core: orchestrates static analysis and AI review of code artifacts.

pub mod config;
pub mod enums;
pub mod errors;
pub mod prompts;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
