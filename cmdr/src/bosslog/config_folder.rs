// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result},
          fs,
          path::{Path, PathBuf}};

use bosslog_ui::{CommonError, CommonErrorType, CommonResult};
use dirs::config_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPaths {
    BosslogTopLevelFolderName,
    LogFile,
}

impl Display for ConfigPaths {
    /// This generates a `to_string()` method used by [`get_log_file_path`].
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::BosslogTopLevelFolderName => "bosslog",
            ConfigPaths::LogFile => "log.txt",
        };
        write!(f, "{path}")
    }
}

/// This is where the log file is stored, inside the given config folder.
#[must_use]
pub fn get_log_file_path(config_folder_path: &Path) -> PathBuf {
    config_folder_path.join(ConfigPaths::LogFile.to_string())
}

/// This is where the config folder is, eg: `~/.config/bosslog` on Linux.
#[must_use]
pub fn try_get_config_folder_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(home_config_folder_path.join(ConfigPaths::BosslogTopLevelFolderName.to_string()))
}

/// Create the config folder (if needed) and return its path.
///
/// # Errors
///
/// - [`CommonErrorType::ConfigFolderPathCouldNotBeAccessed`] if there is no config
///   folder on this platform.
/// - [`CommonErrorType::ConfigFolderCouldNotBeCreated`] if it can't be created.
pub fn try_create() -> CommonResult<PathBuf> {
    match try_get_config_folder_path() {
        Some(config_folder_path) => try_create_at(config_folder_path),
        None => {
            // % is Display, ? is Debug.
            tracing::error!(message = "Could not access config folder.", error = "None");
            CommonError::new_error_result_with_only_type(
                CommonErrorType::ConfigFolderPathCouldNotBeAccessed,
            )
        }
    }
}

/// Same as [`try_create`] for an explicit folder.
///
/// # Errors
///
/// [`CommonErrorType::ConfigFolderCouldNotBeCreated`] if the folder can't be created.
pub fn try_create_at(config_folder_path: PathBuf) -> CommonResult<PathBuf> {
    match fs::create_dir_all(&config_folder_path) {
        Ok(()) => Ok(config_folder_path),
        Err(error) => {
            // % is Display, ? is Debug.
            tracing::error!(
                message = "Could not create config folder.",
                config_folder = ?config_folder_path,
                error = ?error
            );
            CommonError::new_error_result(
                CommonErrorType::ConfigFolderCouldNotBeCreated,
                &format!("{}: {error}", config_folder_path.display()),
            )
        }
    }
}

/// Create the config folder if needed, and return the path of the log file in it.
///
/// # Errors
///
/// See [`try_create`].
pub fn try_get_or_create_log_file_path() -> CommonResult<PathBuf> {
    try_create().map(|config_folder_path| get_log_file_path(&config_folder_path))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_log_file_path() {
        assert_eq!(
            get_log_file_path(Path::new("/home/me/.config/bosslog")),
            PathBuf::from("/home/me/.config/bosslog/log.txt")
        );
    }

    #[test]
    fn test_config_folder_ends_with_app_name() {
        if let Some(it) = try_get_config_folder_path() {
            assert!(it.ends_with("bosslog"));
        }
    }

    #[test]
    fn test_try_create_at() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("bosslog");
        let created = try_create_at(nested.clone()).unwrap();
        assert_eq!(created, nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_try_create_at_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_folder");
        fs::write(&file, "x").unwrap();

        let report = try_create_at(file.join("bosslog")).unwrap_err();
        let Some(CommonError { error_type, .. }) = report.downcast_ref::<CommonError>()
        else {
            panic!("expected a CommonError");
        };
        assert_eq!(*error_type, CommonErrorType::ConfigFolderCouldNotBeCreated);
    }
}
