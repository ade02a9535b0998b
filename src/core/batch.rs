use crate::core::{AccessCheck, AccessValidator};
use crate::utils::error::{AccessError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug)]
pub struct CheckOutcome {
    pub check: AccessCheck,
    pub result: Result<()>,
}

impl CheckOutcome {
    pub fn is_granted(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub granted: usize,
    pub denied: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(()) => summary.granted += 1,
                Err(e) if e.is_denied() => summary.denied += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn all_granted(&self) -> bool {
        self.granted == self.total
    }

    /// Process exit code for a batch run: 0 when everything was granted, 1 when
    /// something was denied, 2 when any check failed outright. Failures win over
    /// denials.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            2
        } else if self.denied > 0 {
            1
        } else {
            0
        }
    }
}

/// Runs many independent checks with a cap on requests in flight.
pub struct BatchValidator<V: AccessValidator + 'static> {
    validator: Arc<V>,
    concurrent_requests: usize,
}

impl<V: AccessValidator + 'static> BatchValidator<V> {
    pub fn new(validator: Arc<V>, concurrent_requests: usize) -> Self {
        Self {
            validator,
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    /// Outcomes come back in input order; a failing check never stops the others.
    pub async fn run(&self, checks: Vec<AccessCheck>) -> Result<Vec<CheckOutcome>> {
        tracing::info!(
            "Running {} access checks ({} concurrent)",
            checks.len(),
            self.concurrent_requests
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrent_requests));
        let mut tasks = JoinSet::new();

        for (index, check) in checks.into_iter().enumerate() {
            let validator = Arc::clone(&self.validator);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => validator.validate(&check).await,
                    Err(e) => Err(AccessError::ConfigError {
                        message: format!("request limiter closed: {}", e),
                    }),
                };
                (index, CheckOutcome { check, result })
            });
        }

        let mut indexed = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            indexed.push(joined?);
        }
        indexed.sort_by_key(|(index, _)| *index);

        let outcomes: Vec<CheckOutcome> = indexed.into_iter().map(|(_, o)| o).collect();
        let summary = BatchSummary::from_outcomes(&outcomes);
        tracing::info!(
            "Access checks finished: {} granted, {} denied, {} failed",
            summary.granted,
            summary.denied,
            summary.failed
        );

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Denies the profile check, grants everything else, and records the
    /// highest number of checks that were in flight at once.
    struct CountingValidator {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl CountingValidator {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AccessValidator for CountingValidator {
        async fn validate(&self, check: &AccessCheck) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match check {
                AccessCheck::ProfilePage { .. } => Err(AccessError::Rejected {
                    check: check.name().to_string(),
                    status: 404,
                    body: String::new(),
                }),
                _ => Ok(()),
            }
        }
    }

    fn checks() -> Vec<AccessCheck> {
        vec![
            AccessCheck::BlogHomePage,
            AccessCheck::ProfilePage {
                username: "ghost".to_string(),
            },
            AccessCheck::ManageOwnAccount,
            AccessCheck::ClassroomsPage,
            AccessCheck::ReleaseCoordinatorPage,
        ]
    }

    #[tokio::test]
    async fn test_outcomes_keep_input_order() {
        let batch = BatchValidator::new(Arc::new(CountingValidator::new()), 3);
        let input = checks();
        let outcomes = batch.run(input.clone()).await.unwrap();

        let returned: Vec<AccessCheck> = outcomes.iter().map(|o| o.check.clone()).collect();
        assert_eq!(returned, input);
        assert!(outcomes[0].is_granted());
        assert!(!outcomes[1].is_granted());

        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            BatchSummary {
                total: 5,
                granted: 4,
                denied: 1,
                failed: 0
            }
        );
        assert!(!summary.all_granted());
    }

    #[tokio::test]
    async fn test_concurrency_cap_is_respected() {
        let validator = Arc::new(CountingValidator::new());
        let batch = BatchValidator::new(Arc::clone(&validator), 2);
        batch.run(checks()).await.unwrap();
        assert!(validator.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let batch = BatchValidator::new(Arc::new(CountingValidator::new()), 0);
        let outcomes = batch.run(vec![AccessCheck::BlogHomePage]).await.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_granted());
    }

    #[test]
    fn test_summary_exit_codes() {
        let granted = BatchSummary {
            total: 2,
            granted: 2,
            denied: 0,
            failed: 0,
        };
        let denied = BatchSummary {
            total: 2,
            granted: 1,
            denied: 1,
            failed: 0,
        };
        let failed_and_denied = BatchSummary {
            total: 3,
            granted: 1,
            denied: 1,
            failed: 1,
        };

        assert_eq!(granted.exit_code(), 0);
        assert_eq!(denied.exit_code(), 1);
        assert_eq!(failed_and_denied.exit_code(), 2);
        assert_eq!(BatchSummary::default().exit_code(), 0);
    }

    #[test]
    fn test_transport_failure_counts_as_failed() {
        let outcomes = vec![
            CheckOutcome {
                check: AccessCheck::BlogHomePage,
                result: Err(AccessError::ConfigError {
                    message: "request limiter closed".to_string(),
                }),
            },
            CheckOutcome {
                check: AccessCheck::ManageOwnAccount,
                result: Err(AccessError::Rejected {
                    check: "can_manage_own_account".to_string(),
                    status: 401,
                    body: String::new(),
                }),
            },
        ];

        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.denied, 1);
        assert_eq!(summary.exit_code(), 2);
    }
}
