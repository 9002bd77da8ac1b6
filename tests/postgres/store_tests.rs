//! Query tests for the `PostgreSQL` todo store.

use crate::postgres::helpers::{
    CleanupGuard, ensure_template, payload, setup_store, test_runtime, unique_database,
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasklist::task_list::domain::TodoId;
use tasklist::task_list::ports::{TodoStore, TodoStoreError};

#[rstest]
fn insert_returns_the_assigned_id_and_defaults(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_insert");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();

    let created = rt
        .block_on(store.insert(&payload("Buy milk")))
        .expect("insert should succeed");

    assert!(created.id().value() > 0);
    assert_eq!(created.name().as_str(), "Buy milk");
    assert!(!created.is_completed());
    let stored = rt
        .block_on(store.select_all())
        .expect("select should succeed");
    assert_eq!(stored, vec![created]);
}

#[rstest]
fn select_all_orders_by_ascending_id(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_order");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();

    let mut inserted = Vec::new();
    for name in ["first", "second", "third"] {
        let created = rt
            .block_on(store.insert(&payload(name)))
            .expect("insert should succeed");
        inserted.push(created.id().value());
    }
    let middle = inserted
        .get(1)
        .and_then(|id| TodoId::new(*id).ok())
        .expect("second id");
    rt.block_on(store.set_completed(middle, true))
        .expect("update should succeed");

    let ids: Vec<i64> = rt
        .block_on(store.select_all())
        .expect("select should succeed")
        .iter()
        .map(|todo| todo.id().value())
        .collect();

    let mut ascending = inserted.clone();
    ascending.sort_unstable();
    assert_eq!(ids, ascending);
    assert_eq!(ids, inserted);
}

#[rstest]
fn set_completed_updates_the_row(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_toggle");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();
    let created = rt
        .block_on(store.insert(&payload("Walk dog")))
        .expect("insert should succeed");

    let done = rt
        .block_on(store.set_completed(created.id(), true))
        .expect("update should succeed");
    let undone = rt
        .block_on(store.set_completed(created.id(), false))
        .expect("update should succeed");

    assert!(done.is_completed());
    assert!(!undone.is_completed());
    assert_eq!(undone.created_at(), created.created_at());
}

#[rstest]
fn set_completed_of_missing_row_is_not_found(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_missing");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();
    let missing = TodoId::new(404).expect("valid id");

    let result = rt.block_on(store.set_completed(missing, true));

    assert!(matches!(result, Err(TodoStoreError::NotFound(id)) if id == missing));
}

#[rstest]
fn delete_removes_present_rows_and_ignores_missing_ones(
    shared_test_cluster: &'static TestCluster,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_delete");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();
    let kept = rt
        .block_on(store.insert(&payload("keep")))
        .expect("insert should succeed");
    let dropped = rt
        .block_on(store.insert(&payload("drop")))
        .expect("insert should succeed");

    rt.block_on(store.delete(dropped.id()))
        .expect("delete should succeed");
    rt.block_on(store.delete(dropped.id()))
        .expect("repeated delete should succeed");
    rt.block_on(store.delete(TodoId::new(404).expect("valid id")))
        .expect("delete of missing row should succeed");

    let remaining = rt
        .block_on(store.select_all())
        .expect("select should succeed");
    assert_eq!(remaining, vec![kept]);
}

#[rstest]
fn delete_completed_reports_the_removed_count(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_clear");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();
    let mut open = Vec::new();
    for (name, completed) in [("a", true), ("b", false), ("c", true), ("d", false)] {
        let created = rt
            .block_on(store.insert(&payload(name)))
            .expect("insert should succeed");
        if completed {
            rt.block_on(store.set_completed(created.id(), true))
                .expect("update should succeed");
        } else {
            open.push(created);
        }
    }

    let removed = rt
        .block_on(store.delete_completed())
        .expect("delete should succeed");
    let again = rt
        .block_on(store.delete_completed())
        .expect("delete should succeed");

    assert_eq!(removed, 2);
    assert_eq!(again, 0);
    let remaining = rt
        .block_on(store.select_all())
        .expect("select should succeed");
    assert_eq!(remaining, open);
}
