use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_initial_schema"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(UP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DOWN_SQL)
            .await?;
        Ok(())
    }
}

const UP_SQL: &str = "
CREATE TABLE IF NOT EXISTS rule_configurations (
    id TEXT PRIMARY KEY NOT NULL,
    company_id TEXT NOT NULL UNIQUE,
    low_score_enabled INTEGER NOT NULL DEFAULT 1,
    low_score_threshold REAL NOT NULL DEFAULT 5.0,
    risk_words_enabled INTEGER NOT NULL DEFAULT 1,
    risk_words TEXT NOT NULL DEFAULT '',
    long_duration_enabled INTEGER NOT NULL DEFAULT 1,
    long_duration_threshold_minutes INTEGER NOT NULL DEFAULT 30,
    no_next_step_enabled INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_rule_configurations_company ON rule_configurations(company_id);

CREATE TABLE IF NOT EXISTS call_analyses (
    id TEXT PRIMARY KEY NOT NULL,
    company_id TEXT NOT NULL,
    agent_id TEXT NOT NULL,
    final_score REAL,
    duration_seconds INTEGER NOT NULL DEFAULT 0,
    risk_words_detected TEXT,
    next_step_recommendation TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_call_analyses_company ON call_analyses(company_id);
CREATE INDEX IF NOT EXISTS idx_call_analyses_agent ON call_analyses(agent_id);
CREATE INDEX IF NOT EXISTS idx_call_analyses_created_at ON call_analyses(created_at DESC);

CREATE TABLE IF NOT EXISTS alerts (
    id TEXT PRIMARY KEY NOT NULL,
    company_id TEXT NOT NULL,
    call_id TEXT NOT NULL,
    agent_id TEXT NOT NULL,
    alert_type TEXT NOT NULL,
    message TEXT NOT NULL,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
-- At most one alert of a given type per call; insert conflicts on this
-- index are the dedup signal.
CREATE UNIQUE INDEX IF NOT EXISTS idx_alerts_call_type ON alerts(call_id, alert_type);
CREATE INDEX IF NOT EXISTS idx_alerts_company ON alerts(company_id);
CREATE INDEX IF NOT EXISTS idx_alerts_is_read ON alerts(is_read);
CREATE INDEX IF NOT EXISTS idx_alerts_created_at ON alerts(created_at DESC);
";

const DOWN_SQL: &str = "
DROP TABLE IF EXISTS alerts;
DROP TABLE IF EXISTS call_analyses;
DROP TABLE IF EXISTS rule_configurations;
";
