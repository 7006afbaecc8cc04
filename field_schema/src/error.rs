// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;

use crate::DocumentType;

pub type FieldSchemaResult<T> = Result<T, FieldSchemaError>;

/// Everything that can go wrong while working with the fields of a profile document.
/// Key generation itself never fails unless the strict
/// [`crate::FieldKeyGenerator::try_generate`] is used.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum FieldSchemaError {
    #[error("Field label is empty")]
    #[diagnostic(
        code(bosslog::field_schema::empty_label),
        help("Type at least one visible character for the field label")
    )]
    EmptyLabel,

    #[error("Could not find a unique field key after {attempts} attempts")]
    #[diagnostic(
        code(bosslog::field_schema::key_space_exhausted),
        help("The document has too many custom fields, or the uniqueness check always fails")
    )]
    KeySpaceExhausted { attempts: usize },

    #[error("Field `{key}` can't be deleted from a `{doc_type}` document")]
    #[diagnostic(
        code(bosslog::field_schema::not_deletable),
        help("Only custom fields that are not required by the document type can be deleted")
    )]
    NotDeletable { key: String, doc_type: DocumentType },

    #[error("Field `{key}` does not exist")]
    #[diagnostic(code(bosslog::field_schema::field_not_found))]
    FieldNotFound { key: String },

    #[error("Field `{key}` is reserved")]
    #[diagnostic(code(bosslog::field_schema::reserved_key))]
    ReservedKey { key: String },

    #[error("The `_fieldsMeta` entry is malformed: {reason}")]
    #[diagnostic(code(bosslog::field_schema::invalid_fields_meta))]
    InvalidFieldsMeta { reason: String },

    #[error("Unknown document type `{0}`")]
    #[diagnostic(
        code(bosslog::field_schema::unknown_document_type),
        help("Use `user` or `boss`")
    )]
    UnknownDocumentType(String),

    #[error("Document is not a JSON object")]
    #[diagnostic(code(bosslog::field_schema::not_an_object))]
    NotAnObject,

    #[error("Document is not valid JSON")]
    #[diagnostic(code(bosslog::field_schema::json))]
    Json(#[from] serde_json::Error),
}
