use crate::AlertRule;
use callscope_common::i18n::TRANSLATIONS;
use callscope_common::types::{AlertDescriptor, AlertType, CallAnalysisRecord, RuleConfiguration};

/// 低分告警规则
///
/// 当 `final_score` 存在且严格小于 `low_score_threshold` 时触发。
/// 未评分的通话（score 为 None）不触发。
pub struct LowScoreRule;

impl AlertRule for LowScoreRule {
    fn alert_type(&self) -> AlertType {
        AlertType::LowScore
    }

    fn evaluate(
        &self,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
        locale: &str,
    ) -> Option<AlertDescriptor> {
        if !config.low_score_enabled {
            return None;
        }

        let threshold = config.low_score_threshold;
        if !threshold.is_finite() || !(0.0..=10.0).contains(&threshold) {
            return None;
        }

        let score = call.final_score?;
        // Out-of-range score: cannot determine, do not fire
        if !score.is_finite() || !(0.0..=10.0).contains(&score) {
            return None;
        }

        // Strict less-than: a score exactly at the threshold does not fire
        if score >= threshold {
            return None;
        }

        let template = TRANSLATIONS
            .get_template(locale, "alert.low_score")
            .unwrap_or("Low score: {score}/10");
        Some(AlertDescriptor {
            alert_type: AlertType::LowScore,
            message: template.replace("{score}", &format!("{score:.1}")),
        })
    }
}
