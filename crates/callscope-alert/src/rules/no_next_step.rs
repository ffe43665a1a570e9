use crate::AlertRule;
use callscope_common::i18n::TRANSLATIONS;
use callscope_common::types::{AlertDescriptor, AlertType, CallAnalysisRecord, RuleConfiguration};

/// 无下一步行动告警规则
///
/// 当 `next_step_recommendation` 为空，或去除首尾空白后为空字符串时触发。
pub struct NoNextStepRule;

impl AlertRule for NoNextStepRule {
    fn alert_type(&self) -> AlertType {
        AlertType::NoNextStep
    }

    fn evaluate(
        &self,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
        locale: &str,
    ) -> Option<AlertDescriptor> {
        if !config.no_next_step_enabled {
            return None;
        }

        let missing = match call.next_step_recommendation.as_deref() {
            None => true,
            Some(text) => text.trim().is_empty(),
        };
        if !missing {
            return None;
        }

        let message = TRANSLATIONS
            .get(
                locale,
                "alert.no_next_step",
                "No next step was recorded for this call",
            )
            .to_string();
        Some(AlertDescriptor {
            alert_type: AlertType::NoNextStep,
            message,
        })
    }
}
