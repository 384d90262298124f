//! List command implementation

use fwtask_core::task::{TaskInfo, TASKS};

/// List all tasks with their aliases and prerequisites
pub fn list_tasks() {
    println!("Available tasks:");
    println!();
    println!("{:<12} {:<32} {:<22} Description", "Task", "Aliases", "Runs first");
    println!("{}", "-".repeat(100));

    for info in TASKS {
        println!(
            "{:<12} {:<32} {:<22} {}",
            info.name,
            info.aliases.join(", "),
            prerequisites(info),
            info.description
        );
    }
}

fn prerequisites(info: &TaskInfo) -> String {
    info.prerequisites
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}
