// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Introduction
//!
//! Front end building blocks for `bosslog`, the boss relationship tracker.
//!
//! 1. [`inline_edit`]: the [`InlineEditController`] behind every click to edit profile
//!    field. It flips between [`InlineEditMode::Viewing`] and
//!    [`InlineEditMode::Editing`], issues a background save when focus is lost, and
//!    shows the typed value optimistically until the save settles.
//! 2. [`core::log`]: [`TracingConfig`] and [`init_tracing`] to route `tracing` output to
//!    a display, a log file, or both.
//! 3. [`core::common`]: [`CommonResult`] and [`CommonError`], the error types used at
//!    the seams of this crate.
//!
//! # How a save settles
//!
//! Saves run as `tokio` tasks. When one finishes it does not touch the controller.
//! Instead it sends an [`InlineEditSignal`] back to the owner of the controller over a
//! [`tokio::sync::mpsc`] channel. The owner's event loop receives the signal and hands
//! it to [`InlineEditController::apply_signal`]. So the controller only ever changes on
//! the owner's task, and needs no locks.
//!
//! ```no_run
//! use bosslog_ui::{InlineEditController, InlineEditOptions, InlineString};
//!
//! # async fn run() -> miette::Result<()> {
//! let (sender, mut receiver) = tokio::sync::mpsc::channel(8);
//! let save = |value: InlineString| async move {
//!     println!("saving {value}");
//!     Ok(())
//! };
//! let mut controller = InlineEditController::new(save, sender, InlineEditOptions::default());
//!
//! let mut committed = String::from("Sarah");
//! controller.activate(&committed);
//! controller.change_buffer("Sara");
//! controller.blur(&committed)?;
//! assert_eq!(controller.display_value(&committed), "Sara");
//!
//! if let Some(signal) = receiver.recv().await {
//!     committed = String::from("Sara");
//!     controller.apply_signal(signal);
//! }
//! assert_eq!(controller.display_value(&committed), "Sara");
//! # Ok(())
//! # }
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::needless_return)]
#![warn(clippy::redundant_else)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::return_self_not_must_use)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod core;
pub mod inline_edit;

// Re-export.
pub use core::*;
pub use inline_edit::*;
