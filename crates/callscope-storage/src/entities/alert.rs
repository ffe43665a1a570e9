use sea_orm::entity::prelude::*;

/// 告警表（唯一索引 (call_id, alert_type) 保证幂等）
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company_id: String,
    pub call_id: String,
    pub agent_id: String,
    /// 告警类型（low_score / risk_words / long_duration / no_next_step）
    pub alert_type: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
