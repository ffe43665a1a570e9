use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use callscope_alert::engine::AlertSink;
use callscope_common::types::{AlertFilter, AlertRecord, AlertType};

use crate::entities::alert::{self, Column, Entity};
use crate::error::{Result, StorageError};
use crate::store::QmStore;

fn to_record(m: alert::Model) -> Result<AlertRecord> {
    let alert_type: AlertType =
        m.alert_type
            .parse()
            .map_err(|_| StorageError::InvalidValue {
                field: "alert_type",
                value: m.alert_type.clone(),
            })?;
    Ok(AlertRecord {
        id: m.id,
        company_id: m.company_id,
        call_id: m.call_id,
        agent_id: m.agent_id,
        alert_type,
        message: m.message,
        is_read: m.is_read,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

fn apply_filter(
    mut q: sea_orm::Select<Entity>,
    company_id: &str,
    filter: &AlertFilter,
) -> sea_orm::Select<Entity> {
    q = q.filter(Column::CompanyId.eq(company_id));
    if let Some(ty) = filter.alert_type_eq {
        q = q.filter(Column::AlertType.eq(ty.to_string()));
    }
    if let Some(ref agent_id) = filter.agent_id_eq {
        q = q.filter(Column::AgentId.eq(agent_id.as_str()));
    }
    if let Some(ref call_id) = filter.call_id_eq {
        q = q.filter(Column::CallId.eq(call_id.as_str()));
    }
    if let Some(is_read) = filter.is_read_eq {
        q = q.filter(Column::IsRead.eq(is_read));
    }
    q
}

impl QmStore {
    /// 插入告警；(call_id, alert_type) 已存在时返回 `Ok(None)`。
    ///
    /// 幂等性由 alerts 表的唯一索引保证：插入冲突即去重信号，并发重复评估
    /// 同一通话也不会产生重复行。
    pub async fn insert_alert_if_absent(
        &self,
        record: &AlertRecord,
    ) -> Result<Option<AlertRecord>> {
        let now = Utc::now().fixed_offset();
        let am = alert::ActiveModel {
            id: Set(record.id.clone()),
            company_id: Set(record.company_id.clone()),
            call_id: Set(record.call_id.clone()),
            agent_id: Set(record.agent_id.clone()),
            alert_type: Set(record.alert_type.to_string()),
            message: Set(record.message.clone()),
            is_read: Set(record.is_read),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let res = Entity::insert(am)
            .on_conflict(
                OnConflict::columns([Column::CallId, Column::AlertType])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(self.db())
            .await;

        match res {
            Ok(_) => {
                let model = Entity::find_by_id(&record.id).one(self.db()).await?;
                model.map(to_record).transpose()
            }
            Err(DbErr::RecordNotInserted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 判断某通话是否已存在指定类型的告警。
    pub async fn exists_alert(&self, call_id: &str, alert_type: AlertType) -> Result<bool> {
        let count = Entity::find()
            .filter(Column::CallId.eq(call_id))
            .filter(Column::AlertType.eq(alert_type.to_string()))
            .count(self.db())
            .await?;
        Ok(count > 0)
    }

    pub async fn list_alerts(
        &self,
        company_id: &str,
        filter: &AlertFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<AlertRecord>> {
        let models = apply_filter(Entity::find(), company_id, filter)
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        models.into_iter().map(to_record).collect()
    }

    pub async fn count_alerts(&self, company_id: &str, filter: &AlertFilter) -> Result<u64> {
        Ok(apply_filter(Entity::find(), company_id, filter)
            .count(self.db())
            .await?)
    }

    /// 标记告警已读；不存在时返回 `Ok(None)`。
    pub async fn mark_alert_read(&self, alert_id: &str) -> Result<Option<AlertRecord>> {
        let model = Entity::find_by_id(alert_id).one(self.db()).await?;
        if let Some(m) = model {
            let now = Utc::now().fixed_offset();
            let mut am: alert::ActiveModel = m.into();
            am.is_read = Set(true);
            am.updated_at = Set(now);
            let updated = am.update(self.db()).await?;
            to_record(updated).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl AlertSink for QmStore {
    async fn insert_alert_if_absent(
        &self,
        alert: &AlertRecord,
    ) -> anyhow::Result<Option<AlertRecord>> {
        Ok(QmStore::insert_alert_if_absent(self, alert).await?)
    }
}
