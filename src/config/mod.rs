//! Configuration module for pftracker
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PfPaths;
pub use settings::Settings;
