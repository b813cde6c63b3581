use std::fs;
use std::io::Cursor;
use tempfile::tempdir;
use todo_cli::planner::{Filter, Priority, Session, SessionState, Store, Task, TASKS_FILE};

fn run_script(store: &mut Store, script: &str) -> (SessionState, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let state = {
        let mut session = Session::new(store, Cursor::new(script.to_string()), &mut out, &mut err);
        session.run().unwrap();
        session.state()
    };
    (
        state,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_add_then_list_shows_high_priority_task() {
    let temp = tempdir().unwrap();
    let mut store = Store::load(temp.path().join(TASKS_FILE));

    let (state, out, err) = run_script(&mut store, "add \"Buy milk\" high\nlist all\nquit\n");

    assert_eq!(state, SessionState::Terminated);
    assert!(err.is_empty(), "unexpected errors: {}", err);
    assert!(out.contains("Buy milk"));
    assert!(out.contains("HIGH"));

    let listed: Vec<&Task> = store.list(Filter::All).collect();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "Buy milk");
    assert_eq!(listed[0].priority, Priority::High);
    assert!(!listed[0].completed);
}

#[test]
fn test_complete_splits_pending_and_completed() {
    let temp = tempdir().unwrap();
    let mut store = Store::load(temp.path().join(TASKS_FILE));
    run_script(&mut store, "add first\nadd second low\n");

    let first_id = store.tasks()[0].id.clone();
    run_script(&mut store, &format!("complete {}\n", first_id));

    let pending: Vec<_> = store.list(Filter::Pending).map(|t| t.description.as_str()).collect();
    let completed: Vec<_> = store.list(Filter::Completed).map(|t| t.description.as_str()).collect();
    assert_eq!(pending, vec!["second"]);
    assert_eq!(completed, vec!["first"]);
}

#[test]
fn test_delete_unknown_id_leaves_file_alone() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(TASKS_FILE);
    let mut store = Store::load(&path);
    run_script(&mut store, "add \"water plants\"\n");
    let before = fs::read_to_string(&path).unwrap();

    let (state, _, err) = run_script(&mut store, "delete 12345\n");

    assert_eq!(state, SessionState::Terminated);
    assert!(err.contains("no task with id '12345'"));
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_bogus_filter_lists_everything() {
    let temp = tempdir().unwrap();
    let mut store = Store::load(temp.path().join(TASKS_FILE));
    run_script(&mut store, "add alpha high\nadd beta low\n");
    let id = store.tasks()[0].id.clone();
    run_script(&mut store, &format!("complete {}\n", id));

    let (_, bogus, _) = run_script(&mut store, "list bogus-filter\n");
    let (_, all, _) = run_script(&mut store, "list all\n");
    assert_eq!(bogus, all);
    assert!(all.contains("alpha"));
    assert!(all.contains("beta"));
}

#[test]
fn test_search_rejoins_query_words() {
    let temp = tempdir().unwrap();
    let mut store = Store::load(temp.path().join(TASKS_FILE));

    let (_, out, _) = run_script(
        &mut store,
        "add \"Weekly team meeting\"\nadd \"Call plumber\"\nsearch TEAM meeting\n",
    );
    assert!(out.contains("Weekly team meeting"));
    assert!(out.contains("(1 items)"));
}

#[test]
fn test_end_of_input_terminates() {
    let temp = tempdir().unwrap();
    let mut store = Store::load(temp.path().join(TASKS_FILE));

    let (state, out, _) = run_script(&mut store, "help\nstats");
    assert_eq!(state, SessionState::Terminated);
    assert!(out.contains("Commands:"));
    assert!(out.contains("Todo Statistics"));
    assert!(out.contains("Goodbye"));
}

#[test]
fn test_malformed_file_is_reported_and_replaced() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(TASKS_FILE);
    fs::write(&path, "[{\"id\": ").unwrap();

    let mut store = Store::load(&path);
    let (_, _, err) = run_script(&mut store, "add fresh\n");
    assert!(err.contains("malformed"));

    let reloaded = Store::load(&path);
    assert_eq!(reloaded.tasks().len(), 1);
    assert_eq!(reloaded.tasks()[0].description, "fresh");
}

#[test]
fn test_persisted_file_is_pretty_json_array() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(TASKS_FILE);
    let mut store = Store::load(&path);
    run_script(&mut store, "add \"file taxes\" low 2024-04-15\n");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n  {"));
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["description"], "file taxes");
    assert_eq!(value[0]["priority"], "low");
    assert_eq!(value[0]["dueDate"], "2024-04-15");
    assert_eq!(value[0]["completed"], false);
}
