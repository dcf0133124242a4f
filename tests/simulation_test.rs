//! End-to-end tests: event file -> trained model -> replay -> releases.

use notif_bundler::{
    read_events, run_simulation, MemorySink, RateModel, TIMESTAMP_FORMAT,
};
use std::io::Write;
use std::path::PathBuf;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "notif-bundler-it-{name}-{}",
        uuid::Uuid::new_v4()
    ));
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    path
}

#[test]
fn test_train_replay_from_recorded_file() {
    // u1 trains to 8 events/day (threshold 2); u2 to 1/day (threshold 0.25).
    let history = "\
2021-02-01 08:00:00,u1,f1,Alice
2021-02-01 09:00:00,u1,f2,Bob
2021-02-01 10:00:00,u1,f3,Carol
2021-02-01 11:00:00,u1,f4,Dave
2021-02-01 12:00:00,u1,f5,Erin
2021-02-01 13:00:00,u1,f6,Frank
2021-02-01 14:00:00,u1,f7,Grace
2021-02-01 15:00:00,u1,f8,Heidi
2021-02-01 16:00:00,u2,f9,Ivan
";
    let history_path = write_temp("history", history);
    let training_events = read_events(&history_path).expect("readable history");
    let model = RateModel::train(&training_events).expect("trainable");

    // Persist and reload: the replayed run must see the same policy.
    let model_path = std::env::temp_dir().join(format!("model-{}.json", uuid::Uuid::new_v4()));
    model.save(&model_path).expect("saveable");
    let model = RateModel::load(&model_path).expect("loadable");

    // Day 1: u1 releases on every second event, u2 on every event. u1's
    // fifth event is still pending when the stream crosses midnight.
    let stream = "\
2021-03-01 09:00:00,u1,a1,Alice
2021-03-01 09:30:00,u1,a2,Bob
2021-03-01 10:00:00,u2,b1,Ivan
2021-03-01 11:00:00,u1,a3,Carol
2021-03-01 11:30:00,u1,a4,Dave
2021-03-01 23:00:00,u1,a5,Erin
2021-03-02 08:00:00,u2,b2,Judy
";
    let stream_path = write_temp("stream", stream);
    let events = read_events(&stream_path).expect("readable stream");

    let mut sink = MemorySink::default();
    let summary = run_simulation(model, events, &mut sink);

    assert_eq!(summary.events_processed, 7);
    assert_eq!(summary.notifications_delivered, 7);
    assert_eq!(summary.releases_emitted, sink.releases.len());

    // u1's day-1 threshold releases.
    let u1_releases: Vec<_> = sink.releases.iter().filter(|r| r.user_id == "u1").collect();
    assert_eq!(u1_releases.len(), 3);
    assert_eq!(u1_releases[0].notifications.len(), 2);
    assert_eq!(u1_releases[1].notifications.len(), 2);

    // u1's cross-midnight backlog is swept by u2's morning event and is
    // stamped with that event's timestamp.
    assert_eq!(u1_releases[2].notifications.len(), 1);
    assert_eq!(u1_releases[2].notifications[0].friend_id, "a5");
    assert_eq!(
        u1_releases[2]
            .released_at
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        "2021-03-02 08:00:00"
    );

    // u2's trained threshold is below 1: both events release on arrival.
    let u2_releases: Vec<_> = sink.releases.iter().filter(|r| r.user_id == "u2").collect();
    assert_eq!(u2_releases.len(), 2);

    // Bundling held back three notifications (30, 30, and 540 minutes);
    // everything else was delivered on arrival.
    assert!((summary.mean_delay_min - 600.0 / 7.0).abs() < 1e-6);
    assert!((summary.max_delay_min - 540.0).abs() < 1e-6);

    let _ = std::fs::remove_file(&history_path);
    let _ = std::fs::remove_file(&stream_path);
    let _ = std::fs::remove_file(&model_path);
}

#[test]
fn test_single_event_stream_surfaces_via_drain() {
    // Eight same-day events train u1 to 8/day, putting the fallback
    // threshold at 2 for users the model has never seen.
    let history: String = (0..8)
        .map(|hour| format!("2021-02-01 {hour:02}:00:00,u1,f{hour},Alice\n"))
        .collect();
    let history_path = write_temp("history-single", &history);
    let training_events = read_events(&history_path).expect("readable history");
    let model = RateModel::train(&training_events).expect("trainable");

    // A brand-new user below the fallback threshold: the stream ends
    // mid-day, so the only release comes from the final drain.
    let stream_path = write_temp("stream-single", "2021-03-01 09:00:00,u-new,f1,Alice\n");
    let events = read_events(&stream_path).expect("readable stream");

    let mut sink = MemorySink::default();
    let summary = run_simulation(model, events, &mut sink);

    assert_eq!(summary.releases_emitted, 1);
    assert_eq!(sink.releases[0].user_id, "u-new");
    assert_eq!(sink.releases[0].notifications.len(), 1);
    assert_eq!(summary.mean_delay_min, 0.0);

    let _ = std::fs::remove_file(&history_path);
    let _ = std::fs::remove_file(&stream_path);
}
