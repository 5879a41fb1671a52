//! CLI components for the bulk ad data importer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
