use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};

use callscope_common::types::{
    join_risk_words, parse_risk_words, RuleConfiguration, RuleConfigurationUpdate,
};

use crate::entities::rule_configuration::{self, Column, Entity};
use crate::error::{Result, StorageError};
use crate::store::QmStore;

fn to_config(m: rule_configuration::Model) -> RuleConfiguration {
    RuleConfiguration {
        company_id: m.company_id,
        low_score_enabled: m.low_score_enabled,
        low_score_threshold: m.low_score_threshold,
        risk_words_enabled: m.risk_words_enabled,
        risk_words: parse_risk_words(&m.risk_words),
        long_duration_enabled: m.long_duration_enabled,
        long_duration_threshold_minutes: m.long_duration_threshold_minutes,
        no_next_step_enabled: m.no_next_step_enabled,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn validate(update: &RuleConfigurationUpdate) -> Result<()> {
    if let Some(threshold) = update.low_score_threshold {
        if !threshold.is_finite() || !(0.0..=10.0).contains(&threshold) {
            return Err(StorageError::InvalidValue {
                field: "low_score_threshold",
                value: threshold.to_string(),
            });
        }
    }
    if let Some(minutes) = update.long_duration_threshold_minutes {
        if minutes < 0 {
            return Err(StorageError::InvalidValue {
                field: "long_duration_threshold_minutes",
                value: minutes.to_string(),
            });
        }
    }
    Ok(())
}

impl QmStore {
    /// 读取公司告警规则配置；无记录时返回集中定义的默认策略（不落库）。
    pub async fn get_rule_configuration(&self, company_id: &str) -> Result<RuleConfiguration> {
        let model = Entity::find()
            .filter(Column::CompanyId.eq(company_id))
            .one(self.db())
            .await?;
        Ok(model
            .map(to_config)
            .unwrap_or_else(|| RuleConfiguration::defaults(company_id)))
    }

    /// 部分更新公司配置（upsert）。`None` 字段保持原值；首次更新时以默认策略
    /// 为基底。风险词以逗号分隔字符串传入，在此边界解析规范化。
    pub async fn update_rule_configuration(
        &self,
        company_id: &str,
        update: &RuleConfigurationUpdate,
    ) -> Result<RuleConfiguration> {
        validate(update)?;

        let now = Utc::now().fixed_offset();
        let existing = Entity::find()
            .filter(Column::CompanyId.eq(company_id))
            .one(self.db())
            .await?;

        let model = if let Some(m) = existing {
            let mut am: rule_configuration::ActiveModel = m.into();
            if let Some(v) = update.low_score_enabled {
                am.low_score_enabled = Set(v);
            }
            if let Some(v) = update.low_score_threshold {
                am.low_score_threshold = Set(v);
            }
            if let Some(v) = update.risk_words_enabled {
                am.risk_words_enabled = Set(v);
            }
            if let Some(ref raw) = update.risk_words {
                am.risk_words = Set(join_risk_words(&parse_risk_words(raw)));
            }
            if let Some(v) = update.long_duration_enabled {
                am.long_duration_enabled = Set(v);
            }
            if let Some(v) = update.long_duration_threshold_minutes {
                am.long_duration_threshold_minutes = Set(v);
            }
            if let Some(v) = update.no_next_step_enabled {
                am.no_next_step_enabled = Set(v);
            }
            am.updated_at = Set(now);
            am.update(self.db()).await?
        } else {
            let defaults = RuleConfiguration::defaults(company_id);
            let am = rule_configuration::ActiveModel {
                id: Set(callscope_common::id::next_id()),
                company_id: Set(company_id.to_string()),
                low_score_enabled: Set(update
                    .low_score_enabled
                    .unwrap_or(defaults.low_score_enabled)),
                low_score_threshold: Set(update
                    .low_score_threshold
                    .unwrap_or(defaults.low_score_threshold)),
                risk_words_enabled: Set(update
                    .risk_words_enabled
                    .unwrap_or(defaults.risk_words_enabled)),
                risk_words: Set(update
                    .risk_words
                    .as_deref()
                    .map(|raw| join_risk_words(&parse_risk_words(raw)))
                    .unwrap_or_else(|| join_risk_words(&defaults.risk_words))),
                long_duration_enabled: Set(update
                    .long_duration_enabled
                    .unwrap_or(defaults.long_duration_enabled)),
                long_duration_threshold_minutes: Set(update
                    .long_duration_threshold_minutes
                    .unwrap_or(defaults.long_duration_threshold_minutes)),
                no_next_step_enabled: Set(update
                    .no_next_step_enabled
                    .unwrap_or(defaults.no_next_step_enabled)),
                created_at: Set(now),
                updated_at: Set(now),
            };
            am.insert(self.db()).await?
        };

        Ok(to_config(model))
    }
}
