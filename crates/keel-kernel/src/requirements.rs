//! Environment checks run before discovery.

use std::path::Path;

use keel_config::Config;
use tracing::{debug, error};

use crate::error::{KernelError, KernelResult};

/// Verify that the configured web root exists and is a directory.
///
/// # Errors
///
/// Returns [`KernelError::MissingWebRoot`] otherwise.
pub fn check_requirements(config: &Config) -> KernelResult<()> {
    let path = Path::new(&config.server.webapp_path);
    if !path.is_dir() {
        let err = KernelError::MissingWebRoot {
            path: path.to_path_buf(),
        };
        error!(error = %err, "Requirement check failed");
        return Err(err);
    }
    debug!(webapp_path = %path.display(), "Web root present");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_dir_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let config = keel_test::test_config(tmp.path());
        assert!(check_requirements(&config).is_ok());
    }

    #[test]
    fn test_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("webapp");
        let err = check_requirements(&keel_test::test_config(&missing)).unwrap_err();

        assert!(matches!(err, KernelError::MissingWebRoot { ref path } if *path == missing));
        assert!(err.to_string().contains("must be present even if it is empty"));
    }

    #[test]
    fn test_file_is_not_a_web_root() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("webapp");
        std::fs::write(&file, "").unwrap();
        assert!(check_requirements(&keel_test::test_config(&file)).is_err());
    }
}
