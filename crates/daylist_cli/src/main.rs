//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daylist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use daylist_core::{NewTask, TaskList};

fn main() {
    println!("daylist_core ping={}", daylist_core::ping());
    println!("daylist_core version={}", daylist_core::core_version());

    let mut list = TaskList::new();
    let samples = [
        NewTask::new("sample later", "2024-05-01", "09:00"),
        NewTask::new("sample sooner", "2024-04-20", "10:00"),
    ];
    for request in samples {
        if let Err(err) = list.add(request) {
            eprintln!("daylist_core sample add failed: {err}");
            std::process::exit(1);
        }
    }
    for task in list.list() {
        println!("daylist_core task id={} date={}", task.id, task.date);
    }
}
