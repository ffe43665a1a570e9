use crate::{builtin_rules, AlertRule};
use async_trait::async_trait;
use callscope_common::i18n::{normalize_locale, DEFAULT_LOCALE};
use callscope_common::types::{
    AlertDescriptor, AlertRecord, AlertType, CallAnalysisRecord, RuleConfiguration,
};
use chrono::Utc;

/// Destination for materialized alerts.
///
/// Deduplication happens inside the sink: the storage layer carries a unique
/// constraint on `(call_id, alert_type)` and treats an insert conflict as the
/// dedup signal, so concurrent re-evaluation of the same call can never
/// produce duplicate rows.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Insert the alert unless one with the same `(call_id, alert_type)`
    /// already exists. Returns `Ok(None)` on the duplicate no-op.
    async fn insert_alert_if_absent(
        &self,
        alert: &AlertRecord,
    ) -> anyhow::Result<Option<AlertRecord>>;
}

/// One failed call in a batch evaluation.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub call_id: String,
    pub error: String,
}

/// Outcome of a batch evaluation: alerts created plus per-call failures.
/// A failure on one call never aborts the remaining calls.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub created: Vec<AlertRecord>,
    pub failures: Vec<BatchFailure>,
}

/// Evaluates analyzed calls against a company's rule configuration and
/// materializes deduplicated alert rows.
///
/// The engine itself is stateless; the only durable state is the alerts
/// table behind the [`AlertSink`].
pub struct AlertEngine {
    rules: Vec<Box<dyn AlertRule>>,
    locale: String,
}

impl AlertEngine {
    /// Engine with the four built-in rules and the default locale.
    pub fn new() -> Self {
        Self::with_locale(DEFAULT_LOCALE)
    }

    /// Engine with the built-in rules and the given message locale.
    /// Unsupported locales fall back to the default.
    pub fn with_locale(locale: &str) -> Self {
        Self {
            rules: builtin_rules(),
            locale: normalize_locale(locale).to_string(),
        }
    }

    pub fn rules(&self) -> &[Box<dyn AlertRule>] {
        &self.rules
    }

    /// Get a rule by the alert type it produces.
    pub fn get_rule(&self, alert_type: AlertType) -> Option<&dyn AlertRule> {
        self.rules
            .iter()
            .find(|r| r.alert_type() == alert_type)
            .map(|r| r.as_ref())
    }

    /// Run all rules against the call, collecting the descriptors that fired.
    /// Pure, no I/O; returns between 0 and 4 descriptors.
    pub fn evaluate(
        &self,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
    ) -> Vec<AlertDescriptor> {
        if call.company_id != config.company_id {
            tracing::warn!(
                call_id = %call.call_id,
                call_company = %call.company_id,
                config_company = %config.company_id,
                "Configuration does not belong to the call's company, skipping evaluation"
            );
            return Vec::new();
        }

        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(call, config, &self.locale))
            .collect()
    }

    /// Evaluate one call and persist the alerts that fired.
    ///
    /// Returns only the newly created alerts; descriptors whose
    /// `(call_id, alert_type)` row already exists are skipped, which makes
    /// repeated evaluation of the same call idempotent. An empty vec is a
    /// valid outcome.
    pub async fn evaluate_and_persist<S: AlertSink + ?Sized>(
        &self,
        sink: &S,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
    ) -> anyhow::Result<Vec<AlertRecord>> {
        let mut created = Vec::new();

        for descriptor in self.evaluate(call, config) {
            let now = Utc::now();
            let candidate = AlertRecord {
                id: callscope_common::id::next_id(),
                company_id: call.company_id.clone(),
                call_id: call.call_id.clone(),
                agent_id: call.agent_id.clone(),
                alert_type: descriptor.alert_type,
                message: descriptor.message,
                is_read: false,
                created_at: now,
                updated_at: now,
            };

            match sink.insert_alert_if_absent(&candidate).await? {
                Some(alert) => {
                    tracing::info!(
                        call_id = %alert.call_id,
                        alert_type = %alert.alert_type,
                        "Alert created"
                    );
                    created.push(alert);
                }
                None => {
                    tracing::debug!(
                        call_id = %candidate.call_id,
                        alert_type = %candidate.alert_type,
                        "Alert already exists, skipped"
                    );
                }
            }
        }

        Ok(created)
    }

    /// Evaluate many calls with per-call failure isolation.
    ///
    /// Used for seeding and backfilling after a configuration change. One
    /// call's storage failure is recorded in the outcome and the loop
    /// continues with the remaining calls.
    pub async fn evaluate_and_persist_batch<S: AlertSink + ?Sized>(
        &self,
        sink: &S,
        calls: &[CallAnalysisRecord],
        config: &RuleConfiguration,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for call in calls {
            match self.evaluate_and_persist(sink, call, config).await {
                Ok(mut alerts) => outcome.created.append(&mut alerts),
                Err(err) => {
                    tracing::warn!(
                        call_id = %call.call_id,
                        error = %err,
                        "Batch evaluation failed for call, continuing"
                    );
                    outcome.failures.push(BatchFailure {
                        call_id: call.call_id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        outcome
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}
