// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Reserved document entry that holds the [`FieldMeta`] of every custom field, keyed by
/// the custom field's key.
pub const FIELDS_META_KEY: &str = "_fieldsMeta";

/// How a custom field is meant to be edited.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Multiline,
    Date,
    Number,
    Select,
    /// Any type this version does not know about.
    #[serde(other)]
    Other,
}

/// Metadata stored for each custom field, eg:
///
/// ```json
/// { "label": "Favorite coffee", "type": "text", "createdAt": "2025-03-01T09:30:00Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl FieldMeta {
    pub fn new(
        label: impl Into<String>,
        field_type: FieldType,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            label: Some(label.into()),
            field_type,
            created_at: Some(created_at.into()),
        }
    }

    /// The label to show for this field, or the key when no label was saved. A saved
    /// empty label is shown as is.
    #[must_use]
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_meta_wire_format() {
        let meta = FieldMeta::new("Favorite coffee", FieldType::Text, "2025-03-01T09:30:00Z");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            json!({
                "label": "Favorite coffee",
                "type": "text",
                "createdAt": "2025-03-01T09:30:00Z"
            })
        );
    }

    #[test]
    fn test_field_meta_tolerates_missing_and_unknown_attributes() {
        let meta: FieldMeta = serde_json::from_value(json!({ "type": "color-picker" })).unwrap();
        assert_eq!(meta.label, None);
        assert_eq!(meta.field_type, FieldType::Other);
        assert_eq!(meta.created_at, None);
        assert_eq!(meta.display_label("custom_ab12"), "custom_ab12");

        let meta: FieldMeta = serde_json::from_value(json!({ "label": "" })).unwrap();
        assert_eq!(meta.field_type, FieldType::Text);
        assert_eq!(meta.display_label("custom_ab12"), "");
    }

    #[test]
    fn test_field_type_parses_from_cli_strings() {
        use std::str::FromStr;
        assert_eq!(FieldType::from_str("multiline").unwrap(), FieldType::Multiline);
        assert_eq!(FieldType::Date.to_string(), "date");
        assert!(FieldType::from_str("Multiline").is_err());
    }
}
