//! Process-wide embedded PostgreSQL cluster with bootstrap retries.
//!
//! `pg-embed-setup-unpriv` keeps one cluster per test binary. The first
//! bootstrap may download binaries, so transient failures are retried. When
//! the tests run as root the library hands lifecycle work to the `pg_worker`
//! binary built from this crate.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Run one bootstrap attempt, turning a panic into an error message.
///
/// The library panics for some environment problems, such as a missing
/// worker binary; those must reach the skip policy like any other failure.
fn guarded_bootstrap<T, E>(attempt: impl FnOnce() -> Result<T, E>) -> Result<T, String>
where
    E: std::fmt::Display,
{
    match catch_unwind(AssertUnwindSafe(attempt)) {
        Ok(result) => result.map_err(|err| err.to_string()),
        Err(panic) => {
            let reason = panic
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| panic.downcast_ref::<&str>().copied())
                .unwrap_or("non-string panic payload");
            Err(format!("cluster bootstrap panicked: {reason}"))
        }
    }
}

/// Returns the shared cluster handle, bootstrapping it on first use.
///
/// ```rust,ignore
/// let cluster = shared_cluster_handle()?;
/// let temp_db = provision_template_database(cluster)?;
/// println!("connection URL: {}", temp_db.url());
/// ```
pub fn shared_cluster_handle() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match guarded_bootstrap(pg_embedded_setup_unpriv::test_support::shared_cluster_handle) {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(error);
                }
                eprintln!(
                    "pg-embed: cluster bootstrap attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed: {error}"
                );
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::guarded_bootstrap;

    #[test]
    fn bootstrap_panics_become_errors() {
        let result = guarded_bootstrap::<(), String>(|| panic!("worker binary was not found"));
        let err = result.expect_err("panic is reported");
        assert!(err.contains("worker binary was not found"), "{err}");
    }

    #[test]
    fn bootstrap_errors_pass_through() {
        let result = guarded_bootstrap::<(), &str>(|| Err("download failed"));
        assert_eq!(result, Err("download failed".to_owned()));
    }
}
