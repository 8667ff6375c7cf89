//! Embedded PostgreSQL for the Diesel repository suite.
//!
//! Every test gets a fresh temporary database on one shared cluster, with
//! the kitchen migrations applied. Hosts that cannot start the cluster may
//! set `SKIP_TEST_CLUSTER=1` to skip these tests instead of failing them.

use std::fmt::Display;
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

use kitchen::outbound::persistence::run_migrations;

const CLUSTER_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Whether `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// `None` with a skip marker when skipping is allowed, a panic otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {err}");
                std::thread::sleep(RETRY_DELAY * attempt);
                attempt += 1;
            }
            Err(err) => return Err(err.to_string()),
        }
    }
}

/// A migrated, empty database. Dropped together with the returned handle.
///
/// Call outside any tokio runtime; `runtime` drives the migrations.
pub fn migrated_database(runtime: &tokio::runtime::Runtime) -> Result<TemporaryDatabase, String> {
    let database = cluster()?
        .create_temporary_database()
        .map_err(|err| format!("create database: {err:?}"))?;
    runtime
        .block_on(run_migrations(database.url()))
        .map_err(|err| format!("migrate {}: {err}", database.url()))?;
    Ok(database)
}
