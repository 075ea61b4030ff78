use chrono::{Local, NaiveDate, TimeZone};
use rusqlite::Connection;

use lifegrid::db::{run_migrations, SqliteRepository};
use lifegrid::engine::aggregate;
use lifegrid::{Effort, Goal, Sprint, Store, Streak, Trend};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).expect("valid date")
}

fn at(day: u32) -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 5, day, 9, 30, 0)
        .single()
        .expect("unambiguous local time")
}

fn open(path: &std::path::Path) -> Store<SqliteRepository> {
    let conn = Connection::open(path).expect("open db");
    run_migrations(&conn).expect("schema init");
    Store::open(SqliteRepository::new(conn))
}

#[test]
fn sprint_and_efforts_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lifegrid.db");

    let write = Goal::new("Write", 2.0, 0.5);
    let train = Goal::new("Train", 1.0, 0.5);
    let sprint = Sprint::new("May", d(1), d(31), vec![write.clone(), train.clone()]);
    let effort = Effort::new(write.id, at(2), 1.0);

    {
        let mut store = open(&path);
        store.add_sprint(sprint.clone());
        assert!(store.add_effort(effort.clone()));
    }

    let store = open(&path);
    assert_eq!(store.sprints(), &[sprint]);
    assert_eq!(store.efforts(), &[effort]);

    let days = store.generate_day_data_for_range(d(1), d(3));
    assert_eq!(days[0].score, None);
    assert_eq!(days[1].score, Some(0.25));
    assert_eq!(days[2].score, None);
}

#[test]
fn corrupt_blob_resets_to_empty_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lifegrid.db");
    {
        let conn = Connection::open(&path).expect("open db");
        run_migrations(&conn).expect("schema init");
        lifegrid::db::KvRepo::set(&conn, "user_sprints", "[{\"broken\":").expect("write blob");
    }

    let mut store = open(&path);
    assert!(store.sprints().is_empty());

    // a fresh save replaces the corrupt blob
    store.add_sprint(Sprint::new("Fresh", d(1), d(7), vec![]));
    drop(store);
    assert_eq!(open(&path).sprints().len(), 1);
}

#[test]
fn week_of_logging_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = open(&dir.path().join("lifegrid.db"));

    let goal = Goal::new("Ship", 1.0, 1.0);
    let goal_id = goal.id;
    let sprint = Sprint::new("Week", d(4), d(10), vec![goal]);
    store.add_sprint(sprint.clone());
    for day in 4..=6 {
        assert!(store.add_effort(Effort::new(goal_id, at(day), 1.0)));
    }

    let sprint_efforts = store.efforts_for_sprint(&sprint);
    assert_eq!(
        sprint.daily_scores(sprint_efforts),
        vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]
    );

    let days = store.generate_day_data_for_range(d(4), d(10));
    assert_eq!(aggregate::completion_rate(&days), 3.0 / 7.0);
    assert_eq!(store.completion_rate(d(10), 7), 3.0 / 7.0);

    assert_eq!(store.streak(d(6), 0.3), Streak { current: 3, best: 3 });
    assert_eq!(store.streak(d(10), 0.3), Streak { current: 0, best: 3 });
    assert_eq!(store.trend(d(9), 3), Trend::Down);

    let stats = store.sprint_statistics(&sprint, d(6));
    assert_eq!(stats.days_label, "3 of 7 days");
    assert_eq!(stats.remaining_days, 4);
}
