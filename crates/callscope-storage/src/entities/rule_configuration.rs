use sea_orm::entity::prelude::*;

/// 公司告警规则配置表（每公司一行，company_id 唯一）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rule_configurations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub company_id: String,
    pub low_score_enabled: bool,
    pub low_score_threshold: f64,
    pub risk_words_enabled: bool,
    /// 逗号分隔的风险词列表
    pub risk_words: String,
    pub long_duration_enabled: bool,
    pub long_duration_threshold_minutes: i64,
    pub no_next_step_enabled: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
