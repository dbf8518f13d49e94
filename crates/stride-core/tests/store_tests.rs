use jiff::civil::date;
use jiff::Timestamp;
use tempfile::TempDir;

use stride_core::{
    store::StreakUpdate, CoreError, Plan, Priority, Store, Task, Week,
};

fn test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store = Store::new(temp_dir.path().join("test.db")).expect("Failed to open store");
    (temp_dir, store)
}

fn ts(s: &str) -> Timestamp {
    s.parse().expect("bad timestamp")
}

fn sample_plan() -> Plan {
    let mut plan = Plan::new("Write a novella", 1);
    let mut week = Week::new(1, "Outline");
    week.tasks.push(Task::new("Sketch characters", Priority::High, 3.0));
    plan.weeks.push(week);
    plan
}

#[test]
fn test_create_and_fetch_latest() {
    let (_dir, mut store) = test_store();
    let now = ts("2025-06-10T09:00:00Z");

    assert!(store.latest_plan("default").unwrap().is_none());

    let record = store.create_plan("default", &sample_plan(), now).unwrap();
    let fetched = store.latest_plan("default").unwrap().unwrap();
    assert_eq!(fetched.id, record.id);
    assert_eq!(fetched.plan.overview, "Write a novella");
    assert_eq!(fetched.created_at, now);

    // Another user sees nothing.
    assert!(store.latest_plan("other").unwrap().is_none());
}

#[test]
fn test_latest_plan_prefers_most_recent_write() {
    let (_dir, mut store) = test_store();
    let first = store
        .create_plan("default", &sample_plan(), ts("2025-06-10T09:00:00Z"))
        .unwrap();
    let second = store
        .create_plan("default", &sample_plan(), ts("2025-06-10T10:00:00Z"))
        .unwrap();
    assert_eq!(store.latest_plan("default").unwrap().unwrap().id, second.id);

    // Updating the older plan makes it the latest again.
    let mut plan = first.plan.clone();
    plan.overview = "Revised".to_string();
    store
        .save_plan(first.id, &plan, None, ts("2025-06-10T11:00:00Z"))
        .unwrap();
    let latest = store.latest_plan("default").unwrap().unwrap();
    assert_eq!(latest.id, first.id);
    assert_eq!(latest.plan.overview, "Revised");
}

#[test]
fn test_save_missing_plan_leaves_streak_untouched() {
    let (_dir, mut store) = test_store();
    let day = date(2025, 6, 10);

    let err = store
        .save_plan(
            42,
            &sample_plan(),
            Some(("default", StreakUpdate::Credit(day))),
            ts("2025-06-10T09:00:00Z"),
        )
        .unwrap_err();
    assert!(matches!(err, CoreError::PlanNotFound { id: 42 }));

    // The transaction rolled back: no stray credit.
    assert!(store.completion_days("default").unwrap().is_empty());
}

#[test]
fn test_save_with_credit_and_revoke() {
    let (_dir, mut store) = test_store();
    let record = store
        .create_plan("default", &sample_plan(), ts("2025-06-10T09:00:00Z"))
        .unwrap();
    let day = date(2025, 6, 10);

    store
        .save_plan(
            record.id,
            &record.plan,
            Some(("default", StreakUpdate::Credit(day))),
            ts("2025-06-10T09:30:00Z"),
        )
        .unwrap();
    // Crediting twice is idempotent.
    store
        .save_plan(
            record.id,
            &record.plan,
            Some(("default", StreakUpdate::Credit(day))),
            ts("2025-06-10T09:45:00Z"),
        )
        .unwrap();
    assert_eq!(store.completion_days("default").unwrap().len(), 1);

    store
        .save_plan(
            record.id,
            &record.plan,
            Some(("default", StreakUpdate::Revoke(day))),
            ts("2025-06-10T10:00:00Z"),
        )
        .unwrap();
    assert!(store.completion_days("default").unwrap().is_empty());
}

#[test]
fn test_archive_then_history() {
    let (_dir, mut store) = test_store();
    let record = store
        .create_plan("default", &sample_plan(), ts("2025-06-10T09:00:00Z"))
        .unwrap();

    store
        .archive_and_delete_plan(record.id, ts("2025-06-11T09:00:00Z"))
        .unwrap();

    assert!(store.latest_plan("default").unwrap().is_none());
    assert!(store.plan_by_id(record.id).unwrap().is_none());

    let history = store.history("default").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].plan_id, record.id);
    assert_eq!(history[0].overview, "Write a novella");
    assert_eq!(history[0].archived_at, ts("2025-06-11T09:00:00Z"));
}

#[test]
fn test_archive_missing_plan_fails() {
    let (_dir, mut store) = test_store();
    let err = store
        .archive_and_delete_plan(7, ts("2025-06-10T09:00:00Z"))
        .unwrap_err();
    assert!(matches!(err, CoreError::PlanNotFound { id: 7 }));
}

#[test]
fn test_completion_days_round_trip() {
    let (_dir, mut store) = test_store();
    store
        .record_completion_day("default", date(2025, 6, 9))
        .unwrap();
    store
        .record_completion_day("default", date(2025, 6, 10))
        .unwrap();
    store
        .record_completion_day("default", date(2025, 6, 10))
        .unwrap();

    let days = store.completion_days("default").unwrap();
    assert_eq!(days.len(), 2);
    assert!(days.contains(&date(2025, 6, 9)));

    store
        .remove_completion_day("default", date(2025, 6, 9))
        .unwrap();
    assert_eq!(store.completion_days("default").unwrap().len(), 1);
}

#[test]
fn test_document_survives_round_trip_with_legacy_flag() {
    let (_dir, mut store) = test_store();
    let mut plan = sample_plan();
    stride_core::lifecycle::complete(
        plan.task_mut(0, 0).unwrap(),
        ts("2025-06-10T09:00:00Z"),
    )
    .unwrap();

    let record = store
        .create_plan("default", &plan, ts("2025-06-10T09:30:00Z"))
        .unwrap();
    let fetched = store.plan_by_id(record.id).unwrap().unwrap();
    assert!(fetched.plan.task(0, 0).unwrap().completed());
    assert_eq!(fetched.plan, plan);
}
