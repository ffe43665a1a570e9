use sea_orm::entity::prelude::*;

/// AI 通话分析结果表（分析管线写入，本子系统只读）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "call_analyses")]
pub struct Model {
    /// 通话唯一标识
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company_id: String,
    pub agent_id: String,
    /// 最终评分（0-10，可空）
    pub final_score: Option<f64>,
    pub duration_seconds: i64,
    /// 风险词集合（JSON 数组，可空）
    pub risk_words_detected: Option<String>,
    pub next_step_recommendation: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
