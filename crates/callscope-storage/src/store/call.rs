use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect,
};

use callscope_common::types::CallAnalysisRecord;

use crate::entities::call_analysis::{self, Column, Entity};
use crate::error::Result;
use crate::store::QmStore;

fn to_record(m: call_analysis::Model) -> Result<CallAnalysisRecord> {
    let risk_words_detected = m
        .risk_words_detected
        .as_deref()
        .map(serde_json::from_str::<Vec<String>>)
        .transpose()?;
    Ok(CallAnalysisRecord {
        call_id: m.id,
        company_id: m.company_id,
        agent_id: m.agent_id,
        final_score: m.final_score,
        duration_seconds: m.duration_seconds,
        risk_words_detected,
        next_step_recommendation: m.next_step_recommendation,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

impl QmStore {
    /// 写入一条 AI 分析结果（分析完成后由上游管线调用一次，之后不再修改）。
    pub async fn insert_call_analysis(
        &self,
        record: &CallAnalysisRecord,
    ) -> Result<CallAnalysisRecord> {
        let now = Utc::now().fixed_offset();
        let risk_words_json = record
            .risk_words_detected
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let am = call_analysis::ActiveModel {
            id: Set(record.call_id.clone()),
            company_id: Set(record.company_id.clone()),
            agent_id: Set(record.agent_id.clone()),
            final_score: Set(record.final_score),
            duration_seconds: Set(record.duration_seconds),
            risk_words_detected: Set(risk_words_json),
            next_step_recommendation: Set(record.next_step_recommendation.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        to_record(model)
    }

    pub async fn get_call_analysis(&self, call_id: &str) -> Result<Option<CallAnalysisRecord>> {
        let model = Entity::find_by_id(call_id).one(self.db()).await?;
        model.map(to_record).transpose()
    }

    /// 按分析时间倒序列出公司最近的通话分析（配置变更后回填告警的数据源）。
    pub async fn list_recent_call_analyses(
        &self,
        company_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CallAnalysisRecord>> {
        let models = Entity::find()
            .filter(Column::CompanyId.eq(company_id))
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        models.into_iter().map(to_record).collect()
    }
}
