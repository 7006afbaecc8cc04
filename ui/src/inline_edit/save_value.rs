// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::future::Future;

use crate::{CommonResult, InlineString};

/// Persists the value of a single field. The [`crate::InlineEditController`] calls this
/// from a spawned task when an edit loses focus, so it has to be shareable across
/// threads.
///
/// Any `Fn(InlineString) -> impl Future<Output = CommonResult<()>>` closure already is a
/// [`SaveValue`].
pub trait SaveValue: Send + Sync + 'static {
    fn save(&self, value: InlineString) -> impl Future<Output = CommonResult<()>> + Send;
}

impl<F, Fut> SaveValue for F
where
    F: Fn(InlineString) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommonResult<()>> + Send,
{
    fn save(&self, value: InlineString) -> impl Future<Output = CommonResult<()>> + Send {
        self(value)
    }
}
