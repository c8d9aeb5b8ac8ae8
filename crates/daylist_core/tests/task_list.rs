use daylist_core::{NewTask, TaskField, TaskList, TaskListError, TaskValidationError};

fn dated(title: &str, date: &str) -> NewTask {
    NewTask::new(title, date, "12:00")
}

fn is_sorted_by_date(list: &TaskList) -> bool {
    list.as_slice().windows(2).all(|pair| pair[0].date <= pair[1].date)
}

#[test]
fn add_returns_task_matching_inputs() {
    let mut list = TaskList::new();
    let request = NewTask::new("dentist", "2024-05-01", "09:00")
        .with_description("bring insurance card")
        .with_image("file:///photos/card.jpg");

    let task = list.add(request.clone()).unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(task.title, request.title);
    assert_eq!(task.description, request.description);
    assert_eq!(task.date, request.date);
    assert_eq!(task.time, request.time);
    assert_eq!(task.image_ref, request.image_ref);
    assert!(!task.completed);
    assert_eq!(list.list()[0], task);
}

#[test]
fn list_stays_sorted_by_date_after_every_add() {
    let mut list = TaskList::new();
    for date in [
        "2024-06-10",
        "2024-01-02",
        "2025-01-01",
        "2024-06-09",
        "2023-12-31",
        "2024-06-10",
    ] {
        list.add(dated("t", date)).unwrap();
        assert!(is_sorted_by_date(&list), "unsorted after adding {date}");
    }
    assert_eq!(list.len(), 6);
}

#[test]
fn later_added_task_with_earlier_date_comes_first() {
    let mut list = TaskList::new();
    let a = list
        .add(NewTask::new("A", "2024-05-01", "09:00"))
        .unwrap();
    let b = list
        .add(NewTask::new("B", "2024-04-20", "10:00"))
        .unwrap();

    let ids: Vec<_> = list.list().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[test]
fn equal_dates_keep_insertion_order_regardless_of_time() {
    let mut list = TaskList::new();
    let late = list
        .add(NewTask::new("late", "2024-05-01", "18:00"))
        .unwrap();
    let early = list
        .add(NewTask::new("early", "2024-05-01", "07:00"))
        .unwrap();

    let ids: Vec<_> = list.list().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![late.id, early.id]);
}

#[test]
fn add_with_missing_required_field_leaves_list_unchanged() {
    let mut list = TaskList::new();
    list.add(dated("existing", "2024-05-01")).unwrap();
    let before = list.list();

    let cases = [
        (NewTask::new("", "2024-05-01", "09:00"), TaskField::Title),
        (NewTask::new("t", "", "09:00"), TaskField::Date),
        (NewTask::new("t", "2024-05-01", ""), TaskField::Time),
    ];
    for (request, field) in cases {
        let err = list.add(request).unwrap_err();
        assert_eq!(
            err,
            TaskListError::Validation(TaskValidationError::MissingField(field))
        );
        assert_eq!(list.list(), before);
    }
}

#[test]
fn add_with_malformed_date_or_time_leaves_list_unchanged() {
    let mut list = TaskList::new();
    let first = list.add(dated("existing", "2024-05-01")).unwrap();
    assert_eq!(first.id.get(), 1);
    let before = list.list();

    let err = list
        .add(NewTask::new("b", "2024-5-1", "09:00"))
        .unwrap_err();
    assert_eq!(
        err,
        TaskListError::Validation(TaskValidationError::InvalidDate("2024-5-1".to_string()))
    );
    assert_eq!(list.list(), before);

    let err = list
        .add(NewTask::new("b", "2024-05-01", "9:00"))
        .unwrap_err();
    assert_eq!(
        err,
        TaskListError::Validation(TaskValidationError::InvalidTime("9:00".to_string()))
    );
    assert_eq!(list.list(), before);

    let next = list.add(NewTask::new("b", "2024-05-01", "09:00")).unwrap();
    assert_eq!(next.id.get(), 2);
    assert_eq!(list.len(), 2);
}

#[test]
fn remove_drops_exactly_that_task() {
    let mut list = TaskList::new();
    list.add(dated("a", "2024-05-01")).unwrap();
    list.add(dated("b", "2024-05-02")).unwrap();
    list.add(dated("c", "2024-05-03")).unwrap();

    let removed = list.remove(1).unwrap();

    assert_eq!(list.len(), 2);
    assert!(list.list().iter().all(|task| task.id != removed.id));
    let titles: Vec<_> = list.list().into_iter().map(|task| task.title).collect();
    assert_eq!(titles, vec!["a", "c"]);
}

#[test]
fn remove_out_of_range_reports_index_error() {
    let mut list = TaskList::new();
    list.add(dated("a", "2024-05-01")).unwrap();
    list.add(dated("b", "2024-05-02")).unwrap();

    let err = list.remove(5).unwrap_err();

    assert_eq!(err, TaskListError::IndexOutOfRange { index: 5, len: 2 });
    assert_eq!(list.len(), 2);
}

#[test]
fn toggle_sets_completed_and_keeps_other_fields() {
    let mut list = TaskList::new();
    let original = list
        .add(NewTask::new("A", "2024-05-01", "09:00").with_description("d"))
        .unwrap();

    list.toggle_completed(0).unwrap();

    let current = &list.list()[0];
    assert!(current.completed);
    assert_eq!(current.id, original.id);
    assert_eq!(current.title, original.title);
    assert_eq!(current.description, original.description);
    assert_eq!(current.date, original.date);
    assert_eq!(current.time, original.time);
}

#[test]
fn toggling_twice_restores_original_state() {
    let mut list = TaskList::new();
    list.add(dated("a", "2024-05-02")).unwrap();
    let target = list.add(dated("b", "2024-05-01")).unwrap();

    let index = list.position_of(target.id).unwrap();
    list.toggle_completed(index).unwrap();
    let index = list.position_of(target.id).unwrap();
    list.toggle_completed(index).unwrap();

    let index = list.position_of(target.id).unwrap();
    assert_eq!(list.get(index), Some(&target));
    assert!(is_sorted_by_date(&list));
}

#[test]
fn toggle_out_of_range_reports_index_error() {
    let mut list = TaskList::new();
    list.add(dated("a", "2024-05-01")).unwrap();
    let before = list.list();

    assert!(matches!(
        list.toggle_completed(1),
        Err(TaskListError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert_eq!(list.list(), before);
}

#[test]
fn snapshot_is_not_a_live_view() {
    let mut list = TaskList::new();
    list.add(dated("a", "2024-05-01")).unwrap();
    let snapshot = list.list();

    list.toggle_completed(0).unwrap();
    list.add(dated("b", "2024-05-02")).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert!(!snapshot[0].completed);
}

#[test]
fn task_serializes_with_snake_case_fields() {
    let mut list = TaskList::new();
    let task = list
        .add(NewTask::new("A", "2024-05-01", "09:00").with_image("file:///a.jpg"))
        .unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["image_ref"], "file:///a.jpg");
    assert_eq!(json["completed"], false);
}
