use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert kind derived from a call analysis.
///
/// # Examples
///
/// ```
/// use callscope_common::types::AlertType;
///
/// let ty: AlertType = "low_score".parse().unwrap();
/// assert_eq!(ty, AlertType::LowScore);
/// assert_eq!(ty.to_string(), "low_score");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowScore,
    RiskWords,
    LongDuration,
    NoNextStep,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::LowScore => write!(f, "low_score"),
            AlertType::RiskWords => write!(f, "risk_words"),
            AlertType::LongDuration => write!(f, "long_duration"),
            AlertType::NoNextStep => write!(f, "no_next_step"),
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_score" => Ok(AlertType::LowScore),
            "risk_words" => Ok(AlertType::RiskWords),
            "long_duration" => Ok(AlertType::LongDuration),
            "no_next_step" => Ok(AlertType::NoNextStep),
            _ => Err(format!("unknown alert type: {s}")),
        }
    }
}

/// AI 分析结果记录（来自 call_analyses 表，分析完成后写入，本子系统只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallAnalysisRecord {
    /// 通话唯一标识
    pub call_id: String,
    /// 所属公司
    pub company_id: String,
    /// 坐席唯一标识
    pub agent_id: String,
    /// 最终评分（0-10 分制，未评分时为 None）
    pub final_score: Option<f64>,
    /// 通话时长（秒）
    pub duration_seconds: i64,
    /// AI 识别出的风险词集合（无风险词或未分析时为 None）
    pub risk_words_detected: Option<Vec<String>>,
    /// 下一步行动建议（未填写时为 None）
    pub next_step_recommendation: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// Per-company alert rule configuration.
///
/// One row per company; when no row exists the canonical defaults from
/// [`RuleConfiguration::defaults`] apply. Default literals live here and
/// nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfiguration {
    pub company_id: String,
    /// Fire `low_score` when `final_score < low_score_threshold` (0-10 scale).
    pub low_score_enabled: bool,
    pub low_score_threshold: f64,
    /// Fire `risk_words` when the detected set is non-empty.
    pub risk_words_enabled: bool,
    /// Case-insensitive risk terms; comma-separated in storage and transport.
    pub risk_words: Vec<String>,
    /// Fire `long_duration` when `duration_seconds > threshold * 60` (strict).
    pub long_duration_enabled: bool,
    pub long_duration_threshold_minutes: i64,
    /// Fire `no_next_step` when the recommendation is absent or blank.
    pub no_next_step_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RuleConfiguration {
    /// Canonical default policy applied when a company has no stored row.
    pub fn defaults(company_id: &str) -> Self {
        let now = Utc::now();
        Self {
            company_id: company_id.to_string(),
            low_score_enabled: true,
            low_score_threshold: 5.0,
            risk_words_enabled: true,
            risk_words: Vec::new(),
            long_duration_enabled: true,
            long_duration_threshold_minutes: 30,
            no_next_step_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 告警规则配置更新请求（部分更新，None 字段保持原值）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfigurationUpdate {
    /// 低分告警开关（可选）
    pub low_score_enabled: Option<bool>,
    /// 低分阈值（可选，0-10）
    pub low_score_threshold: Option<f64>,
    /// 风险词告警开关（可选）
    pub risk_words_enabled: Option<bool>,
    /// 风险词列表（可选，逗号分隔字符串，边界处解析）
    pub risk_words: Option<String>,
    /// 超长通话告警开关（可选）
    pub long_duration_enabled: Option<bool>,
    /// 超长通话阈值（分钟，可选）
    pub long_duration_threshold_minutes: Option<i64>,
    /// 无下一步告警开关（可选）
    pub no_next_step_enabled: Option<bool>,
}

/// Parse a comma-separated risk-word string into discrete terms.
///
/// Terms are trimmed, lowercased, and deduplicated preserving first
/// occurrence; empty segments are dropped.
///
/// # Examples
///
/// ```
/// use callscope_common::types::parse_risk_words;
///
/// let words = parse_risk_words(" Cancel ,refund,, cancel ");
/// assert_eq!(words, vec!["cancel".to_string(), "refund".to_string()]);
/// ```
pub fn parse_risk_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    for part in raw.split(',') {
        let term = part.trim().to_lowercase();
        if !term.is_empty() && !words.contains(&term) {
            words.push(term);
        }
    }
    words
}

/// Join risk-word terms back into the comma-separated storage form.
pub fn join_risk_words(words: &[String]) -> String {
    words.join(",")
}

/// Candidate alert produced by an evaluator; the materializer attaches the
/// owning company / call / agent identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDescriptor {
    pub alert_type: AlertType,
    pub message: String,
}

/// 告警记录（来自 alerts 表）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// 唯一标识
    pub id: String,
    /// 所属公司
    pub company_id: String,
    /// 触发通话
    pub call_id: String,
    /// 关联坐席
    pub agent_id: String,
    /// 告警类型
    pub alert_type: AlertType,
    /// 本地化告警消息（包含触发值）
    pub message: String,
    /// 是否已读（默认 false）
    pub is_read: bool,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 告警列表过滤器
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub alert_type_eq: Option<AlertType>,
    pub agent_id_eq: Option<String>,
    pub call_id_eq: Option<String>,
    pub is_read_eq: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_type_round_trip() {
        for ty in [
            AlertType::LowScore,
            AlertType::RiskWords,
            AlertType::LongDuration,
            AlertType::NoNextStep,
        ] {
            let parsed: AlertType = ty.to_string().parse().unwrap();
            assert_eq!(parsed, ty);
        }
        assert!("scorelow".parse::<AlertType>().is_err());
    }

    #[test]
    fn parse_risk_words_trims_and_dedups() {
        let words = parse_risk_words("fraude, Cancelar ,, reembolso ,cancelar");
        assert_eq!(words, vec!["fraude", "cancelar", "reembolso"]);
    }

    #[test]
    fn parse_risk_words_empty_input() {
        assert!(parse_risk_words("").is_empty());
        assert!(parse_risk_words(" , ,").is_empty());
    }

    #[test]
    fn join_risk_words_round_trip() {
        let words = parse_risk_words("a,b,c");
        assert_eq!(join_risk_words(&words), "a,b,c");
    }

    #[test]
    fn defaults_enable_all_rules() {
        let config = RuleConfiguration::defaults("acme");
        assert_eq!(config.company_id, "acme");
        assert!(config.low_score_enabled);
        assert_eq!(config.low_score_threshold, 5.0);
        assert!(config.risk_words_enabled);
        assert!(config.risk_words.is_empty());
        assert!(config.long_duration_enabled);
        assert_eq!(config.long_duration_threshold_minutes, 30);
        assert!(config.no_next_step_enabled);
    }
}
