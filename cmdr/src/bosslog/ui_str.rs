// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use bosslog_ui::SaveStatus;

pub const ERROR_REPORT_FOOTER: &str =
    "Run again with `--enable-logging` and look at `bosslog/log.txt` in your config folder.";

pub fn unrecoverable_error_message(report: &miette::Report) -> String {
    format!("Could not run bosslog due to the following problem:\n{report:?}")
}

pub fn field_added_msg(key: &str) -> String { key.to_string() }

pub fn field_removed_msg(key: &str) -> String { format!("Removed {key}") }

pub fn save_status_msg(save_status: &SaveStatus) -> String {
    match save_status {
        SaveStatus::Idle => "unchanged, nothing to save".to_string(),
        SaveStatus::Pending => "pending".to_string(),
        SaveStatus::Committed => "committed".to_string(),
        SaveStatus::Failed(error_message) => format!("failed: {error_message}"),
    }
}

pub mod set_display {
    use super::SaveStatus;

    pub fn before_msg(value: &str) -> String { format!("before:  {value}") }

    pub fn pending_msg(value: &str) -> String { format!("pending: {value}") }

    pub fn after_msg(value: &str) -> String { format!("after:   {value}") }

    pub fn status_msg(save_status: &SaveStatus) -> String {
        format!("status:  {}", super::save_status_msg(save_status))
    }
}
