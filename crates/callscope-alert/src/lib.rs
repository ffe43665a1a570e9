//! Alert derivation engine for analyzed calls.
//!
//! Each analyzed call is evaluated against the owning company's
//! [`RuleConfiguration`] through the registered [`AlertRule`]
//! implementations. Built-in rule types cover low score, risk words,
//! long duration, and missing next step. The engine materializes
//! deduplicated alert rows through an [`engine::AlertSink`].

pub mod engine;
pub mod rules;


use callscope_common::types::{AlertDescriptor, AlertType, CallAnalysisRecord, RuleConfiguration};

/// An alert rule that inspects one analyzed call against the company
/// configuration and optionally produces an [`AlertDescriptor`].
///
/// Implementations are registered in the [`engine::AlertEngine`]. They must
/// be pure and total: no I/O, no panics on well-typed input. Each rule checks
/// its own enable flag, and a malformed value (score outside the 0-10 scale,
/// negative duration, out-of-range threshold) means "cannot determine" and
/// never fires. Rules are independent and order-insensitive; a single call
/// may trigger anywhere between zero and all registered alert types.
pub trait AlertRule: Send + Sync {
    /// The alert type this rule produces (e.g., [`AlertType::LowScore`]).
    fn alert_type(&self) -> AlertType;

    /// Evaluates the call and returns a descriptor if the rule condition is
    /// met, or `None` otherwise. `locale` selects the message translation.
    fn evaluate(
        &self,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
        locale: &str,
    ) -> Option<AlertDescriptor>;
}

/// The four built-in rules, one per [`AlertType`].
pub fn builtin_rules() -> Vec<Box<dyn AlertRule>> {
    vec![
        Box::new(rules::low_score::LowScoreRule),
        Box::new(rules::risk_words::RiskWordsRule),
        Box::new(rules::long_duration::LongDurationRule),
        Box::new(rules::no_next_step::NoNextStepRule),
    ]
}
