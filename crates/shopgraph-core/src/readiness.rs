//! Waiting for a dependency to accept queries.
//!
//! The migrator cannot do anything useful until both stores answer a
//! trivial round-trip, so it polls them with a fixed interval. Every failed
//! attempt is logged. By default the wait is unbounded; a cap turns an
//! exhausted wait into [`ShopgraphError::ReadinessTimeout`].

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::{ShopgraphError, ShopgraphResult};

/// Default delay between two readiness probes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// How long and how often to probe a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub interval: Duration,
    /// `None` keeps probing until the dependency answers.
    pub max_attempts: Option<u32>,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_attempts: None,
        }
    }
}

impl ReadinessPolicy {
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

/// Run `probe` until it succeeds, sleeping `policy.interval` between attempts.
///
/// The probe's output is handed back to the caller, so a probe that opens a
/// connection can return it.
pub async fn wait_until_ready<F, Fut, T, E>(
    service: &str,
    policy: &ReadinessPolicy,
    mut probe: F,
) -> ShopgraphResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match probe().await {
            Ok(value) => {
                info!(service, attempt, "Dependency ready");
                return Ok(value);
            }
            Err(e) => {
                warn!(service, attempt, error = %e, "Waiting for dependency");
                if let Some(max) = policy.max_attempts {
                    if attempt >= max {
                        return Err(ShopgraphError::ReadinessTimeout {
                            service: service.to_string(),
                            attempts: attempt,
                        });
                    }
                }
            }
        }
        tokio::time::sleep(policy.interval).await;
    }
}
