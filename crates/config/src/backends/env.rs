//! Secret backend reading the process environment.

use super::{BackendError, SecretBackend};

/// Resolves a secret key as an environment variable name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvBackend;

impl SecretBackend for EnvBackend {
    fn get_secret(&self, key: &str) -> Result<String, BackendError> {
        std::env::var(key).map_err(|_| {
            BackendError::retrieval("environment", key, "environment variable not set")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_backend_reads_variable() {
        temp_env::with_var("_ENVCRAFT_TEST_SECRET", Some("test_value"), || {
            assert_eq!(
                EnvBackend.get_secret("_ENVCRAFT_TEST_SECRET").unwrap(),
                "test_value"
            );
        });
    }

    #[test]
    #[serial]
    fn test_env_backend_missing_variable_is_retrieval_error() {
        temp_env::with_var_unset("_ENVCRAFT_TEST_NONEXISTENT", || {
            let err = EnvBackend
                .get_secret("_ENVCRAFT_TEST_NONEXISTENT")
                .unwrap_err();
            assert!(matches!(err, BackendError::Retrieval { .. }));
            assert!(err.to_string().contains("_ENVCRAFT_TEST_NONEXISTENT"));
        });
    }
}
