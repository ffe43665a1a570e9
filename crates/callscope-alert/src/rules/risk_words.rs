use crate::AlertRule;
use callscope_common::i18n::TRANSLATIONS;
use callscope_common::types::{AlertDescriptor, AlertType, CallAnalysisRecord, RuleConfiguration};

/// 风险词告警规则
///
/// 当 AI 分析产出的 `risk_words_detected` 集合非空时触发。
/// 风险词与公司配置列表的匹配发生在上游分析环节，本规则只检查集合是否存在，
/// 不重新扫描转写文本；告警消息也不内嵌具体词语（通话详情页另行展示）。
pub struct RiskWordsRule;

impl AlertRule for RiskWordsRule {
    fn alert_type(&self) -> AlertType {
        AlertType::RiskWords
    }

    fn evaluate(
        &self,
        call: &CallAnalysisRecord,
        config: &RuleConfiguration,
        locale: &str,
    ) -> Option<AlertDescriptor> {
        if !config.risk_words_enabled {
            return None;
        }

        let detected = call.risk_words_detected.as_ref()?;
        if detected.is_empty() {
            return None;
        }

        let message = TRANSLATIONS
            .get(locale, "alert.risk_words", "Risk words detected in this call")
            .to_string();
        Some(AlertDescriptor {
            alert_type: AlertType::RiskWords,
            message,
        })
    }
}
