// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Introduction
//!
//! This crate is a shared dependency of the `bosslog` crates. It describes how the
//! fields of a profile document (the user's own profile, or the profile of one of their
//! bosses) are keyed, which of them are part of the fixed schema, and which ones the
//! user added and may remove again.
//!
//! 1. [`field_key`]: turn a human entered label into a normalized key, check keys for
//!    uniqueness against a document, and generate fresh `custom_xxxx` keys.
//! 2. [`required_fields`]: the [`DocumentType`]s and the fields each of them requires.
//!    This decides whether a field [`is_field_deletable`].
//! 3. [`field_meta`]: the per field metadata (label, type, creation time) stored under
//!    the reserved [`FIELDS_META_KEY`] entry of a document.
//! 4. [`field_document`]: a [`FieldDocument`] that ties all of the above together, so
//!    that custom fields can be added, updated, removed, and rendered.
//!
//! # Concurrency
//!
//! Key generation is a check-then-commit operation. Two callers generating against the
//! same store can both see a key as unique before either one inserts it. Callers that
//! share a store must serialize insertion, or re-validate after generation.

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
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod error;
pub mod field_document;
pub mod field_key;
pub mod field_meta;
pub mod required_fields;

// Re-export.
pub use error::*;
pub use field_document::*;
pub use field_key::*;
pub use field_meta::*;
pub use required_fields::*;
