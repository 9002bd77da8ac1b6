//! Persisted session bootstrap tests.

use crate::postgres::helpers::{
    CleanupGuard, create_database, ensure_template, payload, setup_store, test_runtime,
    unique_database,
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasklist::config::{DatabaseConfig, TaskListConfig};
use tasklist::task_list::ports::TodoStore;
use tasklist::task_list::services::{FetchOutcome, open_session};

#[rstest]
fn persisted_session_loads_stored_todos(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_session");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let seed = setup_store(shared_test_cluster, &db_name).expect("store setup");
    let rt = test_runtime();
    for name in ["Todo1", "Todo2"] {
        rt.block_on(seed.insert(&payload(name)))
            .expect("insert should succeed");
    }
    drop(seed);
    let database = shared_test_cluster.connection().database_url(&db_name);
    let config = TaskListConfig::new().with_database(
        DatabaseConfig::new(database)
            .expect("valid url")
            .with_pool_max_size(1),
    );

    let list = rt
        .block_on(open_session(&config))
        .expect("persisted session should open");

    let snapshot = list.snapshot();
    assert!(!snapshot.is_loading());
    let names: Vec<&str> = snapshot
        .todos()
        .iter()
        .map(|todo| todo.name().as_str())
        .collect();
    assert_eq!(names, vec!["Todo1", "Todo2"]);
}

#[rstest]
fn persisted_session_writes_through_to_the_table(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_database("todos_write_through");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let database = create_database(shared_test_cluster, &db_name).expect("database setup");
    let config = TaskListConfig::new().with_database(database);
    let rt = test_runtime();
    let list = rt
        .block_on(open_session(&config))
        .expect("persisted session should open");

    let added = rt
        .block_on(list.add("Buy milk"))
        .expect("add should succeed")
        .expect("label is not blank");
    rt.block_on(list.toggle(added.id()))
        .expect("toggle should succeed");
    let outcome = rt.block_on(list.fetch_all()).expect("fetch should succeed");

    assert_eq!(outcome, FetchOutcome::Applied { count: 1 });
    let refreshed = list
        .snapshot()
        .todos()
        .get(added.id())
        .cloned()
        .expect("added todo is stored");
    assert!(refreshed.is_completed());

    let cleared = rt
        .block_on(list.clear_completed())
        .expect("clear should succeed");
    assert_eq!(cleared, 1);
    let outcome = rt.block_on(list.fetch_all()).expect("fetch should succeed");
    assert_eq!(outcome, FetchOutcome::Applied { count: 0 });
}
