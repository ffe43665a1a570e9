use crate::AlertRule;
use callscope_common::i18n::TRANSLATIONS;
use callscope_common::types::{AlertDescriptor, AlertType, CallAnalysisRecord, RuleConfiguration};

/// 超长通话告警规则
///
/// 当 `duration_seconds` 严格大于 `long_duration_threshold_minutes * 60` 时触发。
/// 恰好等于阈值的通话不触发。
pub struct LongDurationRule;

impl AlertRule for LongDurationRule {
    fn alert_type(&self) -> AlertType {
        AlertType::LongDuration
    }

    fn evaluate(
        &self,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
        locale: &str,
    ) -> Option<AlertDescriptor> {
        if !config.long_duration_enabled {
            return None;
        }

        let threshold_minutes = config.long_duration_threshold_minutes;
        if threshold_minutes < 0 {
            return None;
        }

        // Negative duration: cannot determine, do not fire
        if call.duration_seconds < 0 {
            return None;
        }

        if call.duration_seconds <= threshold_minutes * 60 {
            return None;
        }

        let minutes = call.duration_seconds / 60;
        let template = TRANSLATIONS
            .get_template(locale, "alert.long_duration")
            .unwrap_or("Long call: {minutes} min (threshold: {threshold} min)");
        Some(AlertDescriptor {
            alert_type: AlertType::LongDuration,
            message: template
                .replace("{minutes}", &minutes.to_string())
                .replace("{threshold}", &threshold_minutes.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_call(duration_seconds: i64) -> CallAnalysisRecord {
        let now = Utc::now();
        CallAnalysisRecord {
            call_id: "call-1".to_string(),
            company_id: "acme".to_string(),
            agent_id: "agent-1".to_string(),
            final_score: Some(8.0),
            duration_seconds,
            risk_words_detected: None,
            next_step_recommendation: Some("Follow up".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn does_not_fire_at_exact_threshold() {
        let config = RuleConfiguration::defaults("acme");
        // 30 minutes exactly
        assert!(LongDurationRule
            .evaluate(&make_call(30 * 60), &config, "en")
            .is_none());
    }

    #[test]
    fn fires_one_second_above_threshold() {
        let config = RuleConfiguration::defaults("acme");
        let result = LongDurationRule.evaluate(&make_call(30 * 60 + 1), &config, "en");
        assert!(result.is_some());
        assert_eq!(result.unwrap().alert_type, AlertType::LongDuration);
    }

    #[test]
    fn message_embeds_minutes_and_threshold() {
        let config = RuleConfiguration::defaults("acme");
        let descriptor = LongDurationRule
            .evaluate(&make_call(40 * 60), &config, "en")
            .unwrap();
        assert!(descriptor.message.contains("40"));
        assert!(descriptor.message.contains("30"));
    }

    #[test]
    fn does_not_fire_when_disabled() {
        let mut config = RuleConfiguration::defaults("acme");
        config.long_duration_enabled = false;
        // 100 hours
        assert!(LongDurationRule
            .evaluate(&make_call(100 * 3600), &config, "en")
            .is_none());
    }

    #[test]
    fn ignores_negative_duration() {
        let config = RuleConfiguration::defaults("acme");
        assert!(LongDurationRule
            .evaluate(&make_call(-10), &config, "en")
            .is_none());
    }
}
