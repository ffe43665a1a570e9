use crate::QmStore;
use callscope_alert::engine::AlertEngine;
use callscope_common::types::{
    AlertFilter, AlertRecord, AlertType, CallAnalysisRecord, RuleConfigurationUpdate,
};
use chrono::Utc;
use tempfile::TempDir;

async fn setup() -> (TempDir, QmStore) {
    callscope_common::id::init(1, 1);
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("callscope.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let store = QmStore::new(&url).await.unwrap();
    (dir, store)
}

fn make_call(call_id: &str, company_id: &str) -> CallAnalysisRecord {
    let now = Utc::now();
    CallAnalysisRecord {
        call_id: call_id.to_string(),
        company_id: company_id.to_string(),
        agent_id: "agent-1".to_string(),
        final_score: Some(7.5),
        duration_seconds: 300,
        risk_words_detected: None,
        next_step_recommendation: Some("Send contract".to_string()),
        created_at: now,
        updated_at: now,
    }
}

fn make_alert(call_id: &str, alert_type: AlertType) -> AlertRecord {
    let now = Utc::now();
    AlertRecord {
        id: callscope_common::id::next_id(),
        company_id: "acme".to_string(),
        call_id: call_id.to_string(),
        agent_id: "agent-1".to_string(),
        alert_type,
        message: "Low score: 3.0/10".to_string(),
        is_read: false,
        created_at: now,
        updated_at: now,
    }
}

// ---- Rule configuration ----

#[tokio::test]
async fn missing_configuration_resolves_to_defaults() {
    let (_dir, store) = setup().await;

    let config = store.get_rule_configuration("acme").await.unwrap();
    assert_eq!(config.company_id, "acme");
    assert!(config.low_score_enabled);
    assert_eq!(config.low_score_threshold, 5.0);
    assert_eq!(config.long_duration_threshold_minutes, 30);
    assert!(config.risk_words.is_empty());
}

#[tokio::test]
async fn update_configuration_upserts_and_merges() {
    let (_dir, store) = setup().await;

    // First partial update starts from the defaults
    let update = RuleConfigurationUpdate {
        low_score_threshold: Some(6.5),
        ..Default::default()
    };
    let config = store
        .update_rule_configuration("acme", &update)
        .await
        .unwrap();
    assert_eq!(config.low_score_threshold, 6.5);
    assert_eq!(config.long_duration_threshold_minutes, 30);

    // Second partial update keeps earlier values
    let update = RuleConfigurationUpdate {
        long_duration_threshold_minutes: Some(45),
        ..Default::default()
    };
    let config = store
        .update_rule_configuration("acme", &update)
        .await
        .unwrap();
    assert_eq!(config.low_score_threshold, 6.5);
    assert_eq!(config.long_duration_threshold_minutes, 45);

    let reread = store.get_rule_configuration("acme").await.unwrap();
    assert_eq!(reread.low_score_threshold, 6.5);
    assert_eq!(reread.long_duration_threshold_minutes, 45);
}

#[tokio::test]
async fn risk_words_parsed_at_the_boundary() {
    let (_dir, store) = setup().await;

    let update = RuleConfigurationUpdate {
        risk_words: Some(" Fraude, cancelar ,, reembolso ,cancelar".to_string()),
        ..Default::default()
    };
    let config = store
        .update_rule_configuration("acme", &update)
        .await
        .unwrap();
    assert_eq!(config.risk_words, vec!["fraude", "cancelar", "reembolso"]);
}

#[tokio::test]
async fn out_of_range_threshold_rejected() {
    let (_dir, store) = setup().await;

    let update = RuleConfigurationUpdate {
        low_score_threshold: Some(12.0),
        ..Default::default()
    };
    assert!(store.update_rule_configuration("acme", &update).await.is_err());

    let update = RuleConfigurationUpdate {
        long_duration_threshold_minutes: Some(-5),
        ..Default::default()
    };
    assert!(store.update_rule_configuration("acme", &update).await.is_err());

    // Nothing was persisted, defaults still apply
    let config = store.get_rule_configuration("acme").await.unwrap();
    assert_eq!(config.low_score_threshold, 5.0);
}

// ---- Call analyses ----

#[tokio::test]
async fn call_analysis_round_trip() {
    let (_dir, store) = setup().await;

    let mut record = make_call("call-1", "acme");
    record.risk_words_detected = Some(vec!["fraud".to_string(), "refund".to_string()]);
    store.insert_call_analysis(&record).await.unwrap();

    let loaded = store.get_call_analysis("call-1").await.unwrap().unwrap();
    assert_eq!(loaded.company_id, "acme");
    assert_eq!(loaded.final_score, Some(7.5));
    assert_eq!(
        loaded.risk_words_detected,
        Some(vec!["fraud".to_string(), "refund".to_string()])
    );

    assert!(store.get_call_analysis("nonexistent").await.unwrap().is_none());
}

#[tokio::test]
async fn list_recent_call_analyses_scoped_to_company() {
    let (_dir, store) = setup().await;

    for i in 0..3 {
        store
            .insert_call_analysis(&make_call(&format!("call-{i}"), "acme"))
            .await
            .unwrap();
    }
    store
        .insert_call_analysis(&make_call("other-call", "globex"))
        .await
        .unwrap();

    let calls = store.list_recent_call_analyses("acme", 10, 0).await.unwrap();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.company_id == "acme"));

    let page = store.list_recent_call_analyses("acme", 2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
}

// ---- Alerts ----

#[tokio::test]
async fn insert_alert_if_absent_dedups_on_call_and_type() {
    let (_dir, store) = setup().await;

    let first = store
        .insert_alert_if_absent(&make_alert("call-1", AlertType::LowScore))
        .await
        .unwrap();
    assert!(first.is_some());

    // Same (call_id, alert_type): conflict is the dedup signal
    let second = store
        .insert_alert_if_absent(&make_alert("call-1", AlertType::LowScore))
        .await
        .unwrap();
    assert!(second.is_none());

    // Different type on the same call still inserts
    let other_type = store
        .insert_alert_if_absent(&make_alert("call-1", AlertType::NoNextStep))
        .await
        .unwrap();
    assert!(other_type.is_some());

    assert!(store.exists_alert("call-1", AlertType::LowScore).await.unwrap());
    assert!(!store.exists_alert("call-2", AlertType::LowScore).await.unwrap());

    let count = store
        .count_alerts("acme", &AlertFilter::default())
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn list_alerts_filters() {
    let (_dir, store) = setup().await;

    store
        .insert_alert_if_absent(&make_alert("call-1", AlertType::LowScore))
        .await
        .unwrap();
    store
        .insert_alert_if_absent(&make_alert("call-1", AlertType::RiskWords))
        .await
        .unwrap();
    store
        .insert_alert_if_absent(&make_alert("call-2", AlertType::LowScore))
        .await
        .unwrap();

    let filter = AlertFilter {
        alert_type_eq: Some(AlertType::LowScore),
        ..Default::default()
    };
    let low_scores = store.list_alerts("acme", &filter, 100, 0).await.unwrap();
    assert_eq!(low_scores.len(), 2);
    assert!(low_scores
        .iter()
        .all(|a| a.alert_type == AlertType::LowScore));

    let filter = AlertFilter {
        call_id_eq: Some("call-1".to_string()),
        ..Default::default()
    };
    assert_eq!(store.count_alerts("acme", &filter).await.unwrap(), 2);

    // Other company sees nothing
    let none = store
        .list_alerts("globex", &AlertFilter::default(), 100, 0)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn mark_alert_read() {
    let (_dir, store) = setup().await;

    let alert = store
        .insert_alert_if_absent(&make_alert("call-1", AlertType::LowScore))
        .await
        .unwrap()
        .unwrap();
    assert!(!alert.is_read);

    let updated = store.mark_alert_read(&alert.id).await.unwrap().unwrap();
    assert!(updated.is_read);

    let filter = AlertFilter {
        is_read_eq: Some(false),
        ..Default::default()
    };
    assert_eq!(store.count_alerts("acme", &filter).await.unwrap(), 0);

    assert!(store.mark_alert_read("nonexistent").await.unwrap().is_none());
}

// ---- Engine against the real store ----

#[tokio::test]
async fn evaluate_and_persist_idempotent_against_store() {
    let (_dir, store) = setup().await;
    let engine = AlertEngine::new();
    let config = store.get_rule_configuration("acme").await.unwrap();

    let mut call = make_call("call-1", "acme");
    call.final_score = Some(4.5);
    call.duration_seconds = 500;
    call.risk_words_detected = None;
    call.next_step_recommendation = Some("Follow up".to_string());

    let created = engine
        .evaluate_and_persist(&store, &call, &config)
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].alert_type, AlertType::LowScore);
    assert!(created[0].message.contains("4.5"));

    // Re-evaluation with unchanged configuration creates nothing
    let again = engine
        .evaluate_and_persist(&store, &call, &config)
        .await
        .unwrap();
    assert!(again.is_empty());

    let filter = AlertFilter {
        call_id_eq: Some("call-1".to_string()),
        ..Default::default()
    };
    assert_eq!(store.count_alerts("acme", &filter).await.unwrap(), 1);
}

#[tokio::test]
async fn backfill_recent_calls_through_batch() {
    let (_dir, store) = setup().await;
    let engine = AlertEngine::new();

    let mut bad_call = make_call("call-bad", "acme");
    bad_call.final_score = Some(2.0);
    bad_call.next_step_recommendation = None;
    store.insert_call_analysis(&bad_call).await.unwrap();
    store
        .insert_call_analysis(&make_call("call-ok", "acme"))
        .await
        .unwrap();

    let config = store.get_rule_configuration("acme").await.unwrap();
    let calls = store.list_recent_call_analyses("acme", 100, 0).await.unwrap();
    assert_eq!(calls.len(), 2);

    let outcome = engine
        .evaluate_and_persist_batch(&store, &calls, &config)
        .await;
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.created.len(), 2);

    // Running the backfill again is a no-op
    let outcome = engine
        .evaluate_and_persist_batch(&store, &calls, &config)
        .await;
    assert!(outcome.created.is_empty());
    assert!(outcome.failures.is_empty());

    let total = store
        .count_alerts("acme", &AlertFilter::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
}
