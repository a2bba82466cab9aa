//! Single-request orchestration around an [`Analyzer`]
//!
//! A session owns the current report, the current user-facing error and the
//! busy flag. At most one analysis runs at a time: a submission made while
//! another is in flight is rejected with [`SubmitError::Busy`]. An in-flight
//! request can be abandoned with [`AnalysisSession::cancel`]; its result is
//! then discarded when it arrives.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use uuid::Uuid;

use crate::analyzer::Analyzer;
use crate::error::{AnalysisFailure, GENERIC_FAILURE_MESSAGE, SubmitError};
use crate::types::AnalysisReport;
use crate::url_utils::normalize;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound for one analyzer call; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Point-in-time copy of the session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub report: Option<AnalysisReport>,
    pub error: Option<String>,
    pub busy: bool,
}

#[derive(Debug, Default)]
struct Inner {
    report: Option<AnalysisReport>,
    error: Option<String>,
    in_flight: Option<Uuid>,
}

pub struct AnalysisSession<A> {
    analyzer: A,
    config: SessionConfig,
    inner: Mutex<Inner>,
}

impl<A: Analyzer> AnalysisSession<A> {
    pub fn new(analyzer: A) -> Self {
        Self::with_config(analyzer, SessionConfig::default())
    }

    pub fn with_config(analyzer: A, config: SessionConfig) -> Self {
        Self {
            analyzer,
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn is_busy(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    pub fn state(&self) -> SessionState {
        let inner = self.lock();
        SessionState {
            report: inner.report.clone(),
            error: inner.error.clone(),
            busy: inner.in_flight.is_some(),
        }
    }

    /// Normalize `input`, run the analyzer and record the outcome.
    ///
    /// While another analysis is in flight the call fails with
    /// [`SubmitError::Busy`] and leaves the session untouched. The previous
    /// report stays in place until a new one succeeds.
    pub async fn submit(&self, input: &str) -> Result<AnalysisReport, SubmitError> {
        let (url, ticket) = {
            let mut inner = self.lock();
            if inner.in_flight.is_some() {
                tracing::warn!(input, "submission rejected, analysis already running");
                return Err(SubmitError::Busy);
            }
            let url = match normalize(input) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(input, error = %err, "rejected url");
                    inner.error = Some(err.to_string());
                    return Err(err.into());
                }
            };
            let ticket = Uuid::new_v4();
            inner.in_flight = Some(ticket);
            inner.error = None;
            (url, ticket)
        };
        let _guard = InFlight {
            inner: &self.inner,
            ticket,
        };

        tracing::info!(url = %url, %ticket, "analysis started");
        let outcome = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.analyzer.analyze(&url))
                .await
                .unwrap_or_else(|_| Err(AnalysisFailure::Timeout(limit.as_millis()))),
            None => self.analyzer.analyze(&url).await,
        };

        let mut inner = self.lock();
        if inner.in_flight != Some(ticket) {
            tracing::info!(%ticket, "discarding result of cancelled analysis");
            return Err(SubmitError::Cancelled);
        }
        inner.in_flight = None;

        match outcome {
            Ok(report) => {
                tracing::info!(
                    %ticket,
                    seo = report.seo_score,
                    aeo = report.aeo_score,
                    "analysis finished"
                );
                inner.report = Some(report.clone());
                inner.error = None;
                Ok(report)
            }
            Err(failure) => {
                tracing::warn!(%ticket, error = %failure, "analysis failed");
                inner.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
                Err(failure.into())
            }
        }
    }

    /// Abandon the in-flight analysis, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let cancelled = self.lock().in_flight.take();
        if let Some(ticket) = cancelled {
            tracing::info!(%ticket, "analysis cancelled");
        }
        cancelled.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock_inner(&self.inner)
    }
}

// A poisoned lock only means another submitter panicked; the state itself is
// always left consistent.
fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the busy flag if a submit future is dropped before it resolves.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    ticket: Uuid,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut inner = lock_inner(self.inner);
        if inner.in_flight == Some(self.ticket) {
            inner.in_flight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FixtureAnalyzer;
    use crate::error::ValidationError;
    use crate::types::fixtures::{report, sample_recommendations};
    use std::sync::Arc;

    fn fixture(latency_ms: u64) -> FixtureAnalyzer {
        FixtureAnalyzer::report(report(sample_recommendations()))
            .with_latency(Duration::from_millis(latency_ms))
    }

    #[tokio::test]
    async fn successful_submission_stores_report() {
        let session = AnalysisSession::new(fixture(0));

        let report = session.submit("example.com/page").await.unwrap();
        assert_eq!(report.url, "https://example.com/page");

        let state = session.state();
        assert!(!state.busy);
        assert!(state.error.is_none());
        assert_eq!(state.report, Some(report));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_analyzer() {
        let session = AnalysisSession::new(fixture(0));

        let err = session.submit("   ").await.unwrap_err();
        assert_eq!(err, SubmitError::Validation(ValidationError::EmptyInput));
        assert_eq!(session.state().error.as_deref(), Some("Please enter a URL"));
        assert_eq!(session.analyzer().calls(), 0);
    }

    #[tokio::test]
    async fn analyzer_failure_sets_generic_message() {
        let session = AnalysisSession::new(FixtureAnalyzer::failing(AnalysisFailure::Network(
            "connection reset".to_string(),
        )));

        let err = session.submit("example.com").await.unwrap_err();
        assert!(matches!(err, SubmitError::Analysis(AnalysisFailure::Network(_))));

        let state = session.state();
        assert!(!state.busy);
        assert!(state.report.is_none());
        assert_eq!(state.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn second_submission_is_rejected_while_busy() {
        let session = Arc::new(AnalysisSession::new(fixture(3000)));

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.submit("example.com").await }
        });
        tokio::task::yield_now().await;
        assert!(session.is_busy());

        let second = session.submit("example.org").await;
        assert_eq!(second, Err(SubmitError::Busy));

        let report = first.await.unwrap().unwrap();
        assert_eq!(report.url, "https://example.com");
        assert!(!session.is_busy());
        assert_eq!(session.analyzer().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn busy_session_ignores_invalid_input() {
        let session = Arc::new(AnalysisSession::new(fixture(3000)));

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.submit("example.com").await }
        });
        tokio::task::yield_now().await;

        assert_eq!(session.submit("").await, Err(SubmitError::Busy));
        assert!(session.state().error.is_none());

        first.await.unwrap().unwrap();
        let state = session.state();
        assert!(!state.busy);
        assert!(state.error.is_none());
        assert!(state.report.is_some());
    }

    #[tokio::test]
    async fn success_clears_earlier_error() {
        let session = AnalysisSession::new(fixture(0));

        session.submit("").await.unwrap_err();
        assert!(session.state().error.is_some());

        session.submit("example.com").await.unwrap();
        let state = session.state();
        assert!(state.error.is_none());
        assert!(state.report.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_result_is_discarded() {
        let session = Arc::new(AnalysisSession::new(fixture(3000)));

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.submit("example.com").await }
        });
        tokio::task::yield_now().await;

        assert!(session.cancel());
        assert!(!session.is_busy());
        assert!(!session.cancel());

        assert_eq!(first.await.unwrap(), Err(SubmitError::Cancelled));
        assert!(session.state().report.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_analyzer_times_out() {
        let session = AnalysisSession::with_config(
            fixture(5000),
            SessionConfig {
                timeout: Some(Duration::from_secs(1)),
            },
        );

        let err = session.submit("example.com").await.unwrap_err();
        assert_eq!(err, SubmitError::Analysis(AnalysisFailure::Timeout(1000)));
        assert!(!session.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_submission_clears_busy_flag() {
        let session = AnalysisSession::new(fixture(3000));

        let pending =
            tokio::time::timeout(Duration::from_millis(10), session.submit("example.com")).await;
        assert!(pending.is_err());
        assert!(!session.is_busy());
    }
}
