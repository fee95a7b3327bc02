use std::collections::HashMap;
use std::fs;

use chrono::{Duration, NaiveDate, NaiveTime};
use taskly_core::{
    Dashboard, FileTaskRepository, NewTask, Notification, OutboxNotifier, OwnerId, TaskFilter, TaskService,
    TaskUpdate,
};
use tempfile::tempdir;

#[test]
fn tasks_flow_from_creation_to_dashboard_and_summary() {
    let dir = tempdir().unwrap();
    let outbox = dir.path().join("outbox.jsonl");
    let repo = FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap();
    let recipients = HashMap::from([("alice".to_string(), "alice@example.com".to_string())]);
    let service = TaskService::new(repo).with_notifier(Box::new(OutboxNotifier::new(outbox.clone())), recipients);

    let alice = OwnerId::new("alice");
    let bob = OwnerId::new("bob");
    // 2025-06-04 is a Wednesday
    let today = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let yesterday_evening = (today - Duration::days(1)).and_hms_opt(21, 0, 0).unwrap();
    let this_morning = today.and_hms_opt(8, 15, 0).unwrap();

    // created yesterday, "tomorrow" then means today
    let report = service
        .create_task(&alice, NewTask::titled("submit report tomorrow 5pm"), yesterday_evening)
        .unwrap();
    assert_eq!(report.title, "Submit report");
    assert_eq!(report.due_date, Some(today));
    assert_eq!(report.due_time, NaiveTime::from_hms_opt(17, 0, 0));

    let old = service
        .create_task(
            &alice,
            NewTask {
                title: "renew gym membership".to_string(),
                priority: Some("high".to_string()),
                due_date: Some(today - Duration::days(2)),
                ..NewTask::default()
            },
            yesterday_evening - Duration::days(5),
        )
        .unwrap();

    let meeting = service
        .create_task(&alice, NewTask::titled("meeting with mentor next monday"), this_morning)
        .unwrap();
    assert_eq!(meeting.category.as_deref(), Some("Work"));
    assert_eq!(meeting.due_date, NaiveDate::from_ymd_opt(2025, 6, 9));

    service.create_task(&bob, NewTask::titled("fix bike today"), this_morning).unwrap();

    let snapshot = service.dashboard(&alice, today, None).unwrap();
    match snapshot.view() {
        Dashboard::Grouped(view) => {
            let ids = |tasks: &[&taskly_core::Task]| tasks.iter().map(|t| t.id).collect::<Vec<_>>();
            assert_eq!(ids(&view.due_today_older), vec![report.id]);
            assert_eq!(ids(&view.added_today), vec![meeting.id]);
            assert_eq!(ids(&view.overdue), vec![old.id]);
            assert_eq!(view.counts.high, 1);
            assert_eq!(view.counts.work, 1);
            assert_eq!(view.counts.personal, 1);
        }
        other => panic!("expected grouped view, got {:?}", other),
    }

    let snapshot = service
        .dashboard(&alice, today, TaskFilter::from_params(Some("HIGH"), Some("Work")))
        .unwrap();
    match snapshot.view() {
        Dashboard::Filtered(view) => {
            assert_eq!(view.tasks.len(), 1);
            assert_eq!(view.tasks[0].id, old.id);
        }
        other => panic!("expected filtered view, got {:?}", other),
    }

    // completing the overdue task moves it out of the overdue list
    let mut update = TaskUpdate::from_task(&old);
    update.completed = true;
    service.update_task(&alice, &old.id, update).unwrap();

    let summaries = service.send_daily_summaries(today).unwrap();
    let alice_summary = summaries.iter().find(|(owner, _)| *owner == alice).map(|(_, s)| *s).unwrap();
    assert_eq!((alice_summary.completed, alice_summary.remaining, alice_summary.overdue), (1, 2, 0));
    assert_eq!(summaries.len(), 2);

    let sent: Vec<Notification> = fs::read_to_string(&outbox)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // three creations for alice plus her summary; bob has no address
    assert_eq!(sent.len(), 4);
    assert!(sent.iter().all(|n| n.recipient == "alice@example.com"));
    assert_eq!(sent[3].subject, "Your Daily Task Summary - 2025-06-04");

    // a fresh repository over the same directory sees the same data
    let reopened = TaskService::new(FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap());
    assert_eq!(reopened.list_tasks(&alice).unwrap().len(), 3);
    assert_eq!(reopened.list_tasks(&bob).unwrap().len(), 1);
    assert_eq!(reopened.get_task(&alice, &report.id).unwrap().created_on(), yesterday_evening);
}
