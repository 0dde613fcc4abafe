//! Store-level scenarios: the reference lifecycle, id monotonicity, and
//! serialized access through a shared [`AppState`].

use std::collections::HashSet;

use taskdeck_proto::{NewProject, NewTask, Priority, ProjectId, TaskId, TaskStatus, TaskUpdate};
use taskdeck_server::server::AppState;
use taskdeck_server::store::Store;

#[test]
fn reference_scenario() {
    let mut store = Store::seeded();

    let project = store.create_project(NewProject::new("Test", "#FFFFFF"));
    assert_eq!(project.id, ProjectId::new(4));

    let task = store.create_task(NewTask::titled("Write spec"));
    assert_eq!(task.id, TaskId::new(1));
    assert_eq!(task.order, 1);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.status, TaskStatus::Active);
    assert!(!task.completed);

    let updated = store
        .update_task(
            task.id,
            TaskUpdate {
                completed: Some(true),
                ..TaskUpdate::default()
            },
        )
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.title, "Write spec");

    assert!(store.delete_task(task.id));
    assert!(store.get_task(task.id).is_none());
}

#[test]
fn interleaved_creates_and_deletes_never_reuse_ids() {
    let mut store = Store::new();
    let mut seen = HashSet::new();
    let mut last = 0;

    for round in 0..20 {
        let task = store.create_task(NewTask::titled(format!("task {round}")));
        assert!(task.id.get() > last);
        last = task.id.get();
        assert!(seen.insert(task.id));
        if round % 3 == 0 {
            assert!(store.delete_task(task.id));
        }
    }
    assert_eq!(store.task_count(), 13);
}

#[test]
fn deleting_tasks_leaves_projects_untouched() {
    let mut store = Store::seeded();
    let task = store.create_task(NewTask {
        project_id: Some(ProjectId::new(1)),
        ..NewTask::titled("filed")
    });
    store.delete_task(task.id);
    assert_eq!(store.list_projects().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() {
    let state = AppState::new(Store::seeded());

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move { state.write().create_task(NewTask::titled(format!("t{i}"))) })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let task = handle.await.unwrap();
        assert!(ids.insert(task.id));
    }
    assert_eq!(ids.len(), 50);

    let listed = state.read().list_tasks();
    assert_eq!(listed.len(), 50);
    assert!(listed.windows(2).all(|w| w[0].order <= w[1].order));
}
