// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallstr::SmallString;
use smallvec::SmallVec;

/// Stack allocated string. Field values typed into an inline editor are short, so they
/// rarely spill onto the heap.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;

/// Stack allocated list, for the handful of items the inline editor tracks at once.
pub type InlineVec<T> = SmallVec<[T; DEFAULT_VEC_STORAGE_SIZE]>;

pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;

pub const DEFAULT_VEC_STORAGE_SIZE: usize = 8;
