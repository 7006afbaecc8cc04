// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use bosslog_field_schema::{DocumentType, FieldType, is_field_deletable_for_type_name,
                           normalize_field_key};
use bosslog_ui::{CommonError, CommonErrorType, CommonResult, InlineEditBlurResponse,
                 InlineEditController, InlineEditOptions, SaveStatus};
use serde_json::Value;

use crate::bosslog::{CLIArg, CLICommand, DocumentArg, DocumentFieldSaver,
                     FieldSubcommand, field_added_msg, field_removed_msg, set_display,
                     try_load_document, try_save_document};

/// What the `set` command observed while driving an [`InlineEditController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetReport {
    /// Displayed value before the edit.
    pub before: String,
    /// Displayed value right after focus was lost, while the save was in flight.
    pub pending: String,
    /// Displayed value after the save settled and the document was reloaded.
    pub after: String,
    pub save_status: SaveStatus,
}

impl SetReport {
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            set_display::before_msg(&self.before),
            set_display::pending_msg(&self.pending),
            set_display::after_msg(&self.after),
            set_display::status_msg(&self.save_status),
        ]
    }
}

/// Run the parsed command and return what should be printed.
///
/// # Errors
///
/// Returns an error if the command fails. A `set` whose save fails is an error too, and
/// its message is the [`SetReport`].
pub async fn try_run_command(cli_arg: &CLIArg) -> CommonResult<String> {
    match &cli_arg.command {
        CLICommand::Normalize { label } => Ok(run_normalize(label)),
        CLICommand::Field { subcommand } => match subcommand {
            FieldSubcommand::Add {
                document,
                label,
                value,
                field_type,
            } => try_run_field_add(document, label, value, *field_type)
                .await
                .map(|key| field_added_msg(&key)),
            FieldSubcommand::Rm { document, key } => try_run_field_rm(document, key)
                .await
                .map(|()| field_removed_msg(key)),
            FieldSubcommand::CanDelete { doc_type, key } => {
                Ok(run_field_can_delete(doc_type, key).to_string())
            }
        },
        CLICommand::Show { document } => try_run_show(document).await,
        CLICommand::Set {
            document,
            key,
            value,
        } => {
            let report = try_run_set(&document.path, document.doc_type, key, value).await?;
            let output = report.to_lines().join("\n");
            match &report.save_status {
                SaveStatus::Failed(_) => {
                    CommonError::new_error_result(CommonErrorType::IOError, &output)
                }
                _ => Ok(output),
            }
        }
    }
}

#[must_use]
pub fn run_normalize(label: &str) -> String { normalize_field_key(label) }

#[must_use]
pub fn run_field_can_delete(type_name: &str, key: &str) -> bool {
    is_field_deletable_for_type_name(type_name, key)
}

/// # Errors
///
/// Returns an error if the document can't be loaded or saved, or the label is blank.
pub async fn try_run_field_add(
    document_arg: &DocumentArg,
    label: &str,
    value: &str,
    field_type: FieldType,
) -> CommonResult<String> {
    let mut document = try_load_document(&document_arg.path, document_arg.doc_type).await?;
    let key = document.add_custom_field(label, Value::String(value.to_string()), field_type)?;
    try_save_document(&document_arg.path, &document).await?;
    Ok(key)
}

/// # Errors
///
/// Returns an error if the document can't be loaded or saved, or the field can't be
/// removed.
pub async fn try_run_field_rm(document_arg: &DocumentArg, key: &str) -> CommonResult<()> {
    let mut document = try_load_document(&document_arg.path, document_arg.doc_type).await?;
    document.remove_custom_field(key)?;
    try_save_document(&document_arg.path, &document).await
}

/// # Errors
///
/// Returns an error if the document can't be loaded or its field metadata is malformed.
pub async fn try_run_show(document_arg: &DocumentArg) -> CommonResult<String> {
    let document = try_load_document(&document_arg.path, document_arg.doc_type).await?;
    Ok(document.render_profile_text()?)
}

/// Edit one field through an [`InlineEditController`], with a [`DocumentFieldSaver`] as
/// the save collaborator. This task plays the owner: it waits for the settlement signal,
/// reloads the committed value from the file, and then applies the signal.
///
/// # Errors
///
/// Returns an error if the document can't be loaded, or the save task went away without
/// reporting back. A failed save is not an error here, it is in
/// [`SetReport::save_status`].
pub async fn try_run_set(
    path: &Path,
    doc_type: DocumentType,
    key: &str,
    value: &str,
) -> CommonResult<SetReport> {
    let document = try_load_document(path, doc_type).await?;
    let committed = document.get_text(key).unwrap_or_default();

    let (signal_sender, mut signal_receiver) = tokio::sync::mpsc::channel(1);
    let mut controller = InlineEditController::new(
        DocumentFieldSaver::new(path, doc_type, key),
        signal_sender,
        InlineEditOptions::default(),
    );

    let before = controller.display_value(&committed).to_string();
    controller.activate(&committed);
    controller.change_buffer(value);
    let blur_response = controller.blur(&committed)?;
    let pending = controller.display_value(&committed).to_string();

    let committed = match blur_response {
        InlineEditBlurResponse::SaveIssued(save_id) => {
            let Some(signal) = signal_receiver.recv().await else {
                return CommonError::new_error_result(
                    CommonErrorType::InvalidState,
                    &format!("{save_id} never reported back"),
                );
            };
            let committed = try_load_document(path, doc_type)
                .await?
                .get_text(key)
                .unwrap_or_default();
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Applying save settlement.",
                signal = ?signal,
                committed = %committed
            );
            controller.apply_signal(signal);
            committed
        }
        InlineEditBlurResponse::Unchanged | InlineEditBlurResponse::NotEditing => committed,
    };

    Ok(SetReport {
        before,
        pending,
        after: controller.display_value(&committed).to_string(),
        save_status: controller.save_status().clone(),
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn write_boss_document(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("boss.json");
        std::fs::write(
            &path,
            json!({
                "name": "Sarah",
                "position": "Director",
                "managementStyle": "Hands-off",
                "startedAt": "2024-06-01",
                "createdAt": "2025-01-01T00:00:00.000Z",
                "updatedAt": "2025-01-01T00:00:00.000Z"
            })
            .to_string(),
        )
        .unwrap();
        path
    }

    fn parse(args: &[&str]) -> CLIArg {
        CLIArg::try_parse_from(std::iter::once("bosslog").chain(args.iter().copied()))
            .unwrap()
    }

    #[test_case("My Label!!", "my_label")]
    #[test_case("  Favorite   coffee ", "favorite_coffee")]
    fn test_normalize(label: &str, expected: &str) {
        assert_eq!(run_normalize(label), expected);
    }

    #[test_case("user", "custom_ab12", true)]
    #[test_case("boss", "name", false)]
    #[test_case("manager", "custom_ab12", false)]
    fn test_can_delete(type_name: &str, key: &str, expected: bool) {
        assert_eq!(run_field_can_delete(type_name, key), expected);
    }

    #[tokio::test]
    async fn test_set_sarah_to_sara() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boss_document(&dir);

        let report = try_run_set(&path, DocumentType::Boss, "name", "Sara")
            .await
            .unwrap();
        assert_eq!(
            report,
            SetReport {
                before: "Sarah".to_string(),
                pending: "Sara".to_string(),
                after: "Sara".to_string(),
                save_status: SaveStatus::Committed,
            }
        );

        let document = try_load_document(&path, DocumentType::Boss).await.unwrap();
        assert_eq!(document.get_text("name").as_deref(), Some("Sara"));
    }

    #[tokio::test]
    async fn test_set_same_value_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boss_document(&dir);
        let original = std::fs::read_to_string(&path).unwrap();

        let report = try_run_set(&path, DocumentType::Boss, "name", "Sarah")
            .await
            .unwrap();
        assert_eq!(report.pending, "Sarah");
        assert_eq!(report.save_status, SaveStatus::Idle);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_set_unknown_field_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boss_document(&dir);

        let report = try_run_set(&path, DocumentType::Boss, "nickname", "S")
            .await
            .unwrap();
        assert_eq!(report.before, "");
        assert_eq!(report.pending, "S");
        // Display falls back to what the file has, which is still nothing.
        assert_eq!(report.after, "");
        assert!(matches!(report.save_status, SaveStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_field_add_show_rm() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boss_document(&dir);
        let path_str = path.to_str().unwrap();

        let key = try_run_command(&parse(&[
            "field",
            "add",
            path_str,
            "-t",
            "boss",
            "--label",
            "Coffee order",
            "--value",
            "Oat latte",
        ]))
        .await
        .unwrap();
        assert!(key.starts_with("custom_"));

        let shown = try_run_command(&parse(&["show", path_str, "-t", "boss"]))
            .await
            .unwrap();
        assert!(shown.starts_with("## Boss: Sarah\n"));
        assert!(shown.ends_with("### Custom Boss Fields\nCoffee order: Oat latte"));

        let removed = try_run_command(&parse(&["field", "rm", path_str, "-t", "boss", "-k", &key]))
            .await
            .unwrap();
        assert_eq!(removed, format!("Removed {key}"));

        let shown = try_run_command(&parse(&["show", path_str, "-t", "boss"]))
            .await
            .unwrap();
        assert!(!shown.contains("Custom Boss Fields"));
    }

    #[tokio::test]
    async fn test_field_rm_refuses_required_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boss_document(&dir);
        let path_str = path.to_str().unwrap();

        let result =
            try_run_command(&parse(&["field", "rm", path_str, "-t", "boss", "-k", "name"])).await;
        assert!(result.is_err());

        let document = try_load_document(&path, DocumentType::Boss).await.unwrap();
        assert_eq!(document.get_text("name").as_deref(), Some("Sarah"));
    }
}
