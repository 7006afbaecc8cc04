// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use bosslog_field_schema::{DocumentType, FieldDocument};
use bosslog_ui::CommonResult;
use miette::{IntoDiagnostic, WrapErr};

/// Read a JSON profile document.
///
/// # Errors
///
/// Returns an error if the file can't be read, is not JSON, or is not a JSON object.
pub async fn try_load_document(
    path: &Path,
    doc_type: DocumentType,
) -> CommonResult<FieldDocument> {
    let json = tokio::fs::read_to_string(path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read {}", path.display()))?;
    let document = FieldDocument::try_from_json_str(doc_type, &json)
        .wrap_err_with(|| format!("Could not load {}", path.display()))?;

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "Loaded document.",
        path = %path.display(),
        doc_type = %doc_type,
        field_count = document.fields().len()
    );

    Ok(document)
}

/// Write a profile document as pretty printed JSON. The document is written to a
/// sibling temp file first and then renamed over `path`.
///
/// # Errors
///
/// Returns an error if the file can't be written.
pub async fn try_save_document(path: &Path, document: &FieldDocument) -> CommonResult<()> {
    let mut json = document.to_json_string_pretty()?;
    json.push('\n');

    let mut temp_file_name = path.file_name().unwrap_or_default().to_os_string();
    temp_file_name.push(".tmp");
    let temp_path = path.with_file_name(temp_file_name);

    tokio::fs::write(&temp_path, json)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not write {}", temp_path.display()))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not write {}", path.display()))?;

    tracing::debug!(message = "Saved document.", path = %path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boss.json");

        let document = FieldDocument::try_from_json_value(
            DocumentType::Boss,
            json!({ "name": "Sarah", "position": "Director" }),
        )
        .unwrap();
        try_save_document(&path, &document).await.unwrap();

        let loaded = try_load_document(&path, DocumentType::Boss).await.unwrap();
        assert_eq!(loaded, document);
        assert!(!dir.path().join("boss.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(try_load_document(&missing, DocumentType::User).await.is_err());

        let not_an_object = dir.path().join("list.json");
        std::fs::write(&not_an_object, "[1, 2, 3]").unwrap();
        let report = try_load_document(&not_an_object, DocumentType::User)
            .await
            .unwrap_err();
        assert!(format!("{report:?}").contains("not a JSON object"));
    }
}
