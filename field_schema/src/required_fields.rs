// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{FieldSchemaError, is_custom_field_key};

/// Fields every `user` document must have.
pub const USER_REQUIRED_FIELDS: [&str; 5] =
    ["name", "email", "position", "goal", "createdAt"];

/// Fields every `boss` document must have.
pub const BOSS_REQUIRED_FIELDS: [&str; 6] = [
    "name",
    "position",
    "managementStyle",
    "startedAt",
    "createdAt",
    "updatedAt",
];

/// Schema fields a `user` document may have.
pub const USER_OPTIONAL_FIELDS: [&str; 4] =
    ["displayName", "photoURL", "lastActivityAt", "fcmToken"];

/// Schema fields a `boss` document may have.
pub const BOSS_OPTIONAL_FIELDS: [&str; 2] = ["department", "workingHours"];

/// The two kinds of profile documents that carry custom fields. Parses from (and
/// displays as) `user` and `boss`, nothing else.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentType {
    User,
    Boss,
}

impl DocumentType {
    #[must_use]
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            DocumentType::User => &USER_REQUIRED_FIELDS,
            DocumentType::Boss => &BOSS_REQUIRED_FIELDS,
        }
    }

    #[must_use]
    pub fn optional_fields(self) -> &'static [&'static str] {
        match self {
            DocumentType::User => &USER_OPTIONAL_FIELDS,
            DocumentType::Boss => &BOSS_OPTIONAL_FIELDS,
        }
    }

    #[must_use]
    pub fn is_required_field(self, key: &str) -> bool {
        self.required_fields().iter().any(|it| *it == key)
    }

    /// Required or optional schema field.
    #[must_use]
    pub fn is_schema_field(self, key: &str) -> bool {
        self.is_required_field(key) || self.optional_fields().iter().any(|it| *it == key)
    }

    /// Same as [`FromStr`], with the crate's error type.
    ///
    /// # Errors
    ///
    /// Returns [`FieldSchemaError::UnknownDocumentType`] for anything other than `user`
    /// or `boss`.
    pub fn try_from_type_name(type_name: &str) -> Result<Self, FieldSchemaError> {
        DocumentType::from_str(type_name)
            .map_err(|_| FieldSchemaError::UnknownDocumentType(type_name.to_string()))
    }
}

/// A field can be deleted only if it is a custom field and the document type does not
/// require it.
#[must_use]
pub fn is_field_deletable(doc_type: DocumentType, key: &str) -> bool {
    is_custom_field_key(key) && !doc_type.is_required_field(key)
}

/// Like [`is_field_deletable`] for a document type that is still a raw string. Unknown
/// document types are never deletable.
#[must_use]
pub fn is_field_deletable_for_type_name(type_name: &str, key: &str) -> bool {
    DocumentType::from_str(type_name).is_ok_and(|doc_type| is_field_deletable(doc_type, key))
}
