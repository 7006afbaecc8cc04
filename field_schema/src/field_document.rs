// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Clock, DocumentType, FIELDS_META_KEY, FieldKeyGenerator, FieldKeyLookup,
            FieldMeta, FieldSchemaError, FieldSchemaResult, FieldType, KeyOracle,
            is_custom_field_key, is_field_deletable, normalize_field_key};

const NOT_SET: &str = "Not set";

/// A profile document (a `user` or a `boss`) as a flat JSON object, with custom field
/// metadata kept under [`FIELDS_META_KEY`].
///
/// Serializes as the plain JSON object. The [`DocumentType`] is not part of the JSON and
/// has to be supplied again when loading.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDocument {
    doc_type: DocumentType,
    fields: Map<String, Value>,
}

/// One custom field, as returned by [`FieldDocument::custom_fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldEntry<'a> {
    pub key: String,
    pub meta: FieldMeta,
    /// [None] when the metadata exists but the value was never written.
    pub value: Option<&'a Value>,
}

impl CustomFieldEntry<'_> {
    #[must_use]
    pub fn label(&self) -> &str { self.meta.display_label(&self.key) }
}

impl FieldDocument {
    #[must_use]
    pub fn new(doc_type: DocumentType) -> Self {
        Self {
            doc_type,
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn from_fields(doc_type: DocumentType, fields: Map<String, Value>) -> Self {
        Self { doc_type, fields }
    }

    /// # Errors
    ///
    /// Returns [`FieldSchemaError::NotAnObject`] if `value` is not a JSON object.
    pub fn try_from_json_value(
        doc_type: DocumentType,
        value: Value,
    ) -> FieldSchemaResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self::from_fields(doc_type, fields)),
            _ => Err(FieldSchemaError::NotAnObject),
        }
    }

    /// # Errors
    ///
    /// Returns an error if `json` can't be parsed, or is not a JSON object.
    pub fn try_from_json_str(doc_type: DocumentType, json: &str) -> FieldSchemaResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from_json_value(doc_type, value)
    }

    /// # Errors
    ///
    /// Returns an error if a value can't be serialized.
    pub fn to_json_string_pretty(&self) -> FieldSchemaResult<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    #[must_use]
    pub fn doc_type(&self) -> DocumentType { self.doc_type }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> { &self.fields }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> { self.fields }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> { self.fields.get(key) }

    /// The value of a field as display text. Strings are returned without quotes, other
    /// values as JSON. [None] for a missing or `null` field.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value_to_text(value)),
        }
    }

    /// Parse the whole [`FIELDS_META_KEY`] entry. A missing entry is empty.
    ///
    /// # Errors
    ///
    /// Returns [`FieldSchemaError::InvalidFieldsMeta`] if the entry is not an object of
    /// [`FieldMeta`] objects.
    pub fn fields_meta(&self) -> FieldSchemaResult<BTreeMap<String, FieldMeta>> {
        match self.fields.get(FIELDS_META_KEY) {
            None | Some(Value::Null) => Ok(BTreeMap::new()),
            Some(value) => BTreeMap::<String, FieldMeta>::deserialize(value).map_err(
                |error| FieldSchemaError::InvalidFieldsMeta {
                    reason: error.to_string(),
                },
            ),
        }
    }

    /// # Errors
    ///
    /// See [`FieldDocument::fields_meta`].
    pub fn field_meta(&self, key: &str) -> FieldSchemaResult<Option<FieldMeta>> {
        Ok(self.fields_meta()?.remove(key))
    }

    /// Add a custom field with a freshly generated key, and record its metadata. Returns
    /// the new key.
    ///
    /// # Errors
    ///
    /// - [`FieldSchemaError::EmptyLabel`] if the label is blank.
    /// - [`FieldSchemaError::InvalidFieldsMeta`] if the existing metadata is malformed.
    pub fn add_custom_field(
        &mut self,
        label: &str,
        value: Value,
        field_type: FieldType,
    ) -> FieldSchemaResult<String> {
        self.add_custom_field_with(&mut FieldKeyGenerator::default(), label, value, field_type)
    }

    /// Same as [`FieldDocument::add_custom_field`] with a caller supplied generator.
    ///
    /// # Errors
    ///
    /// See [`FieldDocument::add_custom_field`].
    pub fn add_custom_field_with<R: Rng, C: Clock>(
        &mut self,
        generator: &mut FieldKeyGenerator<R, C>,
        label: &str,
        value: Value,
        field_type: FieldType,
    ) -> FieldSchemaResult<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(FieldSchemaError::EmptyLabel);
        }

        // Keys that only survive in the metadata are taken as well.
        let meta_keys = self.fields_meta()?;
        let key = {
            let fields = &self.fields;
            let oracle = KeyOracle(|key: &str| {
                fields.contains_key(key) || meta_keys.contains_key(key)
            });
            generator.generate(&oracle)
        };

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let meta = FieldMeta::new(label, field_type, created_at);
        let meta_value = serde_json::to_value(&meta)?;

        self.fields_meta_object_mut()?.insert(key.clone(), meta_value);
        self.fields.insert(key.clone(), value);

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Added custom field.",
            doc_type = %self.doc_type,
            key = %key,
            label = %label
        );

        Ok(key)
    }

    /// Remove a custom field and its metadata. Returns the removed value ([`Value::Null`]
    /// if only the metadata was left).
    ///
    /// # Errors
    ///
    /// - [`FieldSchemaError::NotDeletable`] if [`is_field_deletable`] says no.
    /// - [`FieldSchemaError::FieldNotFound`] if neither the value nor the metadata exist.
    pub fn remove_custom_field(&mut self, key: &str) -> FieldSchemaResult<Value> {
        if !is_field_deletable(self.doc_type, key) {
            return Err(FieldSchemaError::NotDeletable {
                key: key.to_string(),
                doc_type: self.doc_type,
            });
        }

        let maybe_value = self.fields.remove(key);
        let maybe_meta = match self.fields.get_mut(FIELDS_META_KEY) {
            Some(Value::Object(meta)) => meta.remove(key),
            _ => None,
        };

        match (maybe_value, maybe_meta) {
            (None, None) => Err(FieldSchemaError::FieldNotFound {
                key: key.to_string(),
            }),
            (maybe_value, _) => {
                tracing::debug!(
                    message = "Removed custom field.",
                    doc_type = %self.doc_type,
                    key = %key
                );
                Ok(maybe_value.unwrap_or(Value::Null))
            }
        }
    }

    /// Replace the value of a field that exists, or of a schema field of this document
    /// type that is not set yet. Returns the previous value.
    ///
    /// # Errors
    ///
    /// - [`FieldSchemaError::ReservedKey`] for [`FIELDS_META_KEY`].
    /// - [`FieldSchemaError::FieldNotFound`] for any other unknown key. New custom fields
    ///   go through [`FieldDocument::add_custom_field`].
    pub fn set_field(&mut self, key: &str, value: Value) -> FieldSchemaResult<Option<Value>> {
        if key == FIELDS_META_KEY {
            return Err(FieldSchemaError::ReservedKey {
                key: key.to_string(),
            });
        }

        let is_known = self.fields.contains_key(key)
            || self.doc_type.is_schema_field(key)
            || (is_custom_field_key(key) && self.field_meta(key)?.is_some());
        if !is_known {
            return Err(FieldSchemaError::FieldNotFound {
                key: key.to_string(),
            });
        }

        Ok(self.fields.insert(key.to_string(), value))
    }

    /// Find a custom field whose label normalizes to the same key as `label`, so that
    /// `"Favorite Coffee"` finds a field labelled `"favorite  coffee"`.
    ///
    /// # Errors
    ///
    /// See [`FieldDocument::fields_meta`].
    pub fn find_custom_field_by_label(&self, label: &str) -> FieldSchemaResult<Option<String>> {
        let needle = normalize_field_key(label);
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(self
            .custom_fields()?
            .into_iter()
            .find(|it| normalize_field_key(it.label()) == needle)
            .map(|it| it.key))
    }

    /// All custom fields that have metadata, oldest first (ties broken by key).
    ///
    /// # Errors
    ///
    /// See [`FieldDocument::fields_meta`].
    pub fn custom_fields(&self) -> FieldSchemaResult<Vec<CustomFieldEntry<'_>>> {
        let mut acc: Vec<CustomFieldEntry<'_>> = self
            .fields_meta()?
            .into_iter()
            .map(|(key, meta)| {
                let value = self.fields.get(&key);
                CustomFieldEntry { key, meta, value }
            })
            .collect();
        acc.sort_by(|lhs, rhs| {
            lhs.meta
                .created_at
                .cmp(&rhs.meta.created_at)
                .then_with(|| lhs.key.cmp(&rhs.key))
        });
        Ok(acc)
    }

    /// Plain text summary of the profile, including the custom fields that have a value.
    ///
    /// # Errors
    ///
    /// See [`FieldDocument::fields_meta`].
    pub fn render_profile_text(&self) -> FieldSchemaResult<String> {
        let mut lines: Vec<String> = vec![];

        let custom_fields_heading = match self.doc_type {
            DocumentType::User => {
                lines.push("## User Profile".to_string());
                lines.push(format!("Name: {}", self.text_or("name", NOT_SET)));
                lines.push(format!("Position: {}", self.text_or("position", NOT_SET)));
                lines.push(format!("Goal: {}", self.text_or("goal", NOT_SET)));
                "### Custom Profile Fields"
            }
            DocumentType::Boss => {
                lines.push(format!("## Boss: {}", self.text_or("name", "Unnamed")));
                lines.push(format!("Position: {}", self.text_or("position", NOT_SET)));
                lines.push(format!(
                    "Department: {}",
                    self.text_or("department", NOT_SET)
                ));
                lines.push(format!(
                    "Management Style: {}",
                    self.text_or("managementStyle", NOT_SET)
                ));
                lines.push(format!(
                    "Working Hours: {}",
                    self.text_or("workingHours", NOT_SET)
                ));
                lines.push(format!(
                    "Started At: {}",
                    self.text_or("startedAt", NOT_SET)
                ));
                "### Custom Boss Fields"
            }
        };

        let custom_fields = self.custom_fields()?;
        if !custom_fields.is_empty() {
            lines.push(String::new());
            lines.push(custom_fields_heading.to_string());
            for entry in &custom_fields {
                if let Some(value) = entry.value.filter(|it| !it.is_null()) {
                    lines.push(format!("{}: {}", entry.label(), value_to_text(value)));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn text_or(&self, key: &str, default_text: &str) -> String {
        self.get_text(key)
            .unwrap_or_else(|| default_text.to_string())
    }

    fn fields_meta_object_mut(&mut self) -> FieldSchemaResult<&mut Map<String, Value>> {
        let entry = self
            .fields
            .entry(FIELDS_META_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }
        entry
            .as_object_mut()
            .ok_or_else(|| FieldSchemaError::InvalidFieldsMeta {
                reason: "expected an object".to_string(),
            })
    }
}

/// Strings print without quotes, everything else as JSON.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(it) => it.clone(),
        other => other.to_string(),
    }
}

impl FieldKeyLookup for FieldDocument {
    fn contains_field_key(&self, key: &str) -> bool { self.fields.contains_key(key) }
}

impl Serialize for FieldDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
