//! Demonstration of the notification bundling engine.
//!
//! This example shows how to:
//! 1. Train a rate model from a recorded event stream
//! 2. Replay a stream through the bundling engine
//! 3. Watch bundles release on thresholds and day boundaries
//! 4. Read the delay summary for the run
//!
//! Run with: cargo run --example bundle_demo

use notif_bundler::{
    core::RateModel,
    ingest::ActivityEvent,
    simulate::run_simulation,
    sink::PrintSink,
    VERSION,
};

fn event(line: &str) -> ActivityEvent {
    ActivityEvent::parse_line(line, 1).expect("valid demo event")
}

fn main() {
    println!("Notif Bundler - Bundling Demo v{VERSION}");
    println!("========================================");
    println!();

    // A recorded history: dana averages 8 events/day, casey 6/day.
    let history: Vec<ActivityEvent> = (0..8)
        .map(|hour| event(&format!("2021-02-01 {hour:02}:30:00,dana,f{hour},Friend {hour}")))
        .chain((0..6).map(|hour| {
            event(&format!("2021-02-01 {:02}:00:00,casey,g{hour},Friend {hour}", hour + 9))
        }))
        .collect();

    let model = RateModel::train(&history).expect("history is non-empty");
    println!(
        "Trained rates for {} users, fallback {:.1} events/day",
        model.user_count(),
        model.fallback()
    );
    println!("  dana:  {:.1} events/day", model.rate_for("dana"));
    println!("  casey: {:.1} events/day", model.rate_for("casey"));
    println!();

    // A fresh day of activity. dana's bundles release every 2 events
    // (threshold 8/4 = 2); casey's lone morning event sits below their 1.5
    // threshold and only leaves with the sweep when the date advances.
    let stream = vec![
        event("2021-03-01 08:00:00,dana,f1,Alice"),
        event("2021-03-01 08:40:00,dana,f2,Bob"),
        event("2021-03-01 09:10:00,casey,f3,Carol"),
        event("2021-03-01 12:00:00,dana,f4,Dave"),
        event("2021-03-01 13:30:00,dana,f5,Erin"),
        event("2021-03-01 21:00:00,dana,f6,Frank"),
        event("2021-03-02 07:45:00,dana,f7,Grace"),
    ];

    println!("Replaying {} events ...", stream.len());
    println!();

    let mut sink = PrintSink;
    let summary = run_simulation(model, stream, &mut sink);

    println!("{}", summary.render());
}
