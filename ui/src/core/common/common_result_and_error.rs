// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

use std::{error::Error,
          fmt::{Debug, Display, Formatter, Result}};

/// Type alias to make it easy to work with:
/// 1. [`core::result::Result`]
/// 2. [`miette::Result`] and [`miette::Report`], which are [`std::error::Error`]
///    wrappers.
///
/// - It is basically `miette::Result<T, miette::Report>`.
/// - Works hand in hand w/ [`CommonError`] and any other type of error.
///
/// # Example
///
/// ```
/// use bosslog_ui::{CommonError, CommonErrorType, CommonResult};
///
/// pub fn try_parse_hours(input: &str) -> CommonResult<u8> {
///     match input.parse::<u8>() {
///         Ok(hours) if hours <= 24 => Ok(hours),
///         _ => CommonError::new_error_result(
///             CommonErrorType::ValueOutOfRange,
///             &format!("Invalid working hours: {input}"),
///         ),
///     }
/// }
///
/// assert!(try_parse_hours("8").is_ok());
/// assert!(try_parse_hours("25").is_err());
/// ```
pub type CommonResult<T> = miette::Result<T>;

/// Common error struct. Read custom error docs
/// [here](https://learning-rust.github.io/docs/e7.custom_error_types.html).
#[derive(Debug, Clone)]
pub struct CommonError {
    pub error_type: CommonErrorType,
    pub error_message: Option<String>,
}

/// Some common errors that can occur.
#[non_exhaustive]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonErrorType {
    #[default]
    General,
    InvalidArguments,
    InvalidState,
    IOError,
    ValueOutOfRange,
    NotFound,
    ConfigFolderCouldNotBeCreated,
    ConfigFolderPathCouldNotBeAccessed,
}

/// Implement [`Error`] trait.
impl Error for CommonError {}

/// Implement [`Display`] trait (needed by [`Error`] trait). This is the same as the
/// [`Debug`] implementation (which is derived above).
impl Display for CommonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { Debug::fmt(self, f) }
}

impl CommonError {
    /// Both [`CommonError::error_type`] and [`CommonError::error_message`] available.
    ///
    /// # Errors
    ///
    /// Always returns an error.
    pub fn new_error_result<T>(err_type: CommonErrorType, msg: &str) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: err_type,
            error_message: Some(msg.to_string()),
        }))
    }

    /// Only [`CommonError::error_type`] available, and no
    /// [`CommonError::error_message`].
    ///
    /// # Errors
    ///
    /// Always returns an error.
    pub fn new_error_result_with_only_type<T>(
        err_type: CommonErrorType,
    ) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: err_type,
            error_message: None,
        }))
    }

    /// Only [`CommonError::error_message`] available, and no
    /// [`CommonError::error_type`].
    ///
    /// # Errors
    ///
    /// Always returns an error.
    pub fn new_error_result_with_only_msg<T>(msg: &str) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: CommonErrorType::default(),
            error_message: Some(msg.to_string()),
        }))
    }

    /// Look through a [`miette::Report`] for a [`CommonError`] and return its type.
    #[must_use]
    pub fn error_type_of(report: &miette::Report) -> Option<CommonErrorType> {
        report
            .downcast_ref::<CommonError>()
            .map(|it| it.error_type)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_error_constructors() {
        let report = CommonError::new_error_result::<()>(
            CommonErrorType::InvalidState,
            "no runtime",
        )
        .unwrap_err();
        assert_eq!(
            CommonError::error_type_of(&report),
            Some(CommonErrorType::InvalidState)
        );
        assert!(report.to_string().contains("no runtime"));

        let report =
            CommonError::new_error_result_with_only_type::<()>(CommonErrorType::NotFound)
                .unwrap_err();
        assert_eq!(
            CommonError::error_type_of(&report),
            Some(CommonErrorType::NotFound)
        );

        let report = CommonError::new_error_result_with_only_msg::<()>("oops").unwrap_err();
        assert_eq!(
            CommonError::error_type_of(&report),
            Some(CommonErrorType::General)
        );

        let report = miette::miette!("plain");
        assert_eq!(CommonError::error_type_of(&report), None);
    }
}
