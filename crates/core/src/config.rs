//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services. Nothing in
//! this crate reads environment variables while handling a request.

use crate::constants::{DEFAULT_RECORDED_BY, VITALS_DIR_NAME};
use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    default_recorded_by: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `default_recorded_by` is stamped on records saved without an operator identity and must
    /// not be blank.
    pub fn new(data_dir: PathBuf, default_recorded_by: impl Into<String>) -> CoreResult<Self> {
        let default_recorded_by = default_recorded_by.into().trim().to_string();
        if default_recorded_by.is_empty() {
            return Err(CoreError::InvalidInput(
                "default recorded-by label cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_dir,
            default_recorded_by,
        })
    }

    /// Config for `data_dir` with the standard recorded-by label.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            default_recorded_by: DEFAULT_RECORDED_BY.to_string(),
        }
    }

    pub fn vitals_dir(&self) -> PathBuf {
        self.data_dir.join(VITALS_DIR_NAME)
    }

    pub fn default_recorded_by(&self) -> &str {
        &self.default_recorded_by
    }

    /// Fails with [`CoreError::MissingDataDir`] unless the data directory exists.
    pub fn ensure_data_dir_exists(&self) -> CoreResult<()> {
        if self.data_dir.is_dir() {
            Ok(())
        } else {
            Err(CoreError::MissingDataDir(self.data_dir.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_recorded_by() {
        let err = CoreConfig::new(PathBuf::from("data"), "  ").expect_err("should reject");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("recorded-by")));
    }

    #[test]
    fn vitals_dir_is_under_data_dir() {
        let cfg = CoreConfig::with_data_dir(PathBuf::from("/srv/hms"));
        assert_eq!(cfg.vitals_dir(), PathBuf::from("/srv/hms/vitals"));
        assert_eq!(cfg.default_recorded_by(), "Medical Staff");
    }

    #[test]
    fn ensure_data_dir_exists_reports_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = CoreConfig::with_data_dir(tmp.path().join("absent"));
        assert!(matches!(
            cfg.ensure_data_dir_exists(),
            Err(CoreError::MissingDataDir(_))
        ));

        let cfg = CoreConfig::with_data_dir(tmp.path().to_path_buf());
        cfg.ensure_data_dir_exists().expect("existing dir");
    }
}
