// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Introduction
//!
//! `bosslog` is the command line companion of the boss relationship tracker. It works on
//! the same JSON profile documents as the app (the user's own profile, and one document
//! per boss), and uses the same building blocks:
//!
//! - [`bosslog_field_schema`] to add, remove, and render custom fields.
//! - [`bosslog_ui::InlineEditController`] to edit a field value, with the document file
//!   as the save collaborator.
//!
//! # Commands
//!
//! ```text
//! bosslog normalize "My Label!!"                         # my_label
//! bosslog field add boss.json -t boss --label "Coffee order" --value "Oat latte"
//! bosslog field rm boss.json -t boss -k custom_ab12
//! bosslog field can-delete -t boss -k name               # false
//! bosslog show boss.json -t boss
//! bosslog set boss.json -t boss -k name -v Sara
//! ```
//!
//! Pass `-l` / `--enable-logging` to any command to write debug logs to `log.txt` in the
//! `bosslog` config folder.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::needless_return)]
#![warn(clippy::redundant_else)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::if_not_else)]

// Attach.
pub mod bosslog;

// Re-export.
pub use bosslog::*;
