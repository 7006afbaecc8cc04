// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod inline_edit_controller;
pub mod inline_edit_state;
pub mod save_value;

// Re-export.
pub use inline_edit_controller::*;
pub use inline_edit_state::*;
pub use save_value::*;
