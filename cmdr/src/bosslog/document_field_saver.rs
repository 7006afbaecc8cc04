// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use bosslog_field_schema::{DocumentType, FieldDocument};
use bosslog_ui::{CommonResult, InlineString, SaveValue};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::bosslog::{try_load_document, try_save_document};

/// Touched on every save, for the document types that require it.
pub const UPDATED_AT_KEY: &str = "updatedAt";

/// Saves the value of one field of a document file. Every save reloads the file, so
/// changes made to other fields in the meantime are kept.
#[derive(Debug, Clone)]
pub struct DocumentFieldSaver {
    pub path: PathBuf,
    pub doc_type: DocumentType,
    pub key: String,
}

impl DocumentFieldSaver {
    pub fn new(path: impl Into<PathBuf>, doc_type: DocumentType, key: &str) -> Self {
        Self {
            path: path.into(),
            doc_type,
            key: key.to_string(),
        }
    }

    /// Apply the edit to an already loaded document.
    ///
    /// # Errors
    ///
    /// Returns an error if the field can't be set, see [`FieldDocument::set_field`].
    pub fn apply_to(&self, document: &mut FieldDocument, value: &str) -> CommonResult<()> {
        document.set_field(&self.key, Value::String(value.to_string()))?;

        if self.key != UPDATED_AT_KEY && self.doc_type.is_required_field(UPDATED_AT_KEY) {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            document.set_field(UPDATED_AT_KEY, Value::String(now))?;
        }

        Ok(())
    }
}

impl SaveValue for DocumentFieldSaver {
    async fn save(&self, value: InlineString) -> CommonResult<()> {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "DocumentFieldSaver::save",
            path = %self.path.display(),
            key = %self.key,
            value = ?value
        );
        let mut document = try_load_document(&self.path, self.doc_type).await?;
        self.apply_to(&mut document, &value)?;
        try_save_document(&self.path, &document).await
    }
}
