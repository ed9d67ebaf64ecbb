//! Error types shared across the tracking and reward services
//!
//! External-collaborator failures are wrapped per call site; reward
//! fan-out failures are collected and reported as one aggregate error
//! after every task has finished.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    /// An external collaborator returned an error.
    #[error("{service} call failed: {message}")]
    Provider {
        service: &'static str,
        message: String,
    },

    /// An external collaborator did not answer within the configured timeout.
    #[error("{service} call timed out after {timeout_ms}ms")]
    ProviderTimeout {
        service: &'static str,
        timeout_ms: u64,
    },

    /// A spawned reward task panicked or was aborted.
    #[error("reward task failed to complete: {0}")]
    Task(String),

    /// One or more reward fan-out tasks failed. The engine always joins
    /// every task before returning this, so `failures` is complete.
    #[error("{} of {} reward tasks failed", .failures.len(), .total)]
    Aggregate {
        total: usize,
        failures: Vec<TrackError>,
    },
}

impl TrackError {
    /// Wrap a collaborator error with the service name it came from.
    pub fn provider(service: &'static str, err: impl std::fmt::Display) -> Self {
        TrackError::Provider {
            service,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_display_counts() {
        let err = TrackError::Aggregate {
            total: 12,
            failures: vec![
                TrackError::provider("reward-central", "boom"),
                TrackError::ProviderTimeout {
                    service: "reward-central",
                    timeout_ms: 500,
                },
            ],
        };
        assert_eq!(err.to_string(), "2 of 12 reward tasks failed");
    }

    #[test]
    fn test_provider_display() {
        let err = TrackError::provider("gps", "connection refused");
        assert_eq!(err.to_string(), "gps call failed: connection refused");
    }
}
