// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Include.
pub mod clap_config;
pub mod command_runner;
pub mod config_folder;
pub mod document_field_saver;
pub mod document_file;
pub mod ui_str;

// Re-export.
pub use clap_config::*;
pub use command_runner::*;
pub use config_folder::*;
pub use document_field_saver::*;
pub use document_file::*;
pub use ui_str::*;
