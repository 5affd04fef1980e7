use crate::models::Task;
use crate::store::TaskCounts;

pub fn print_task(t: &Task) {
    println!("{} {} (#{})", checkbox(t), t.name, t.id);
    if !t.description.is_empty() {
        println!("    {}", t.description);
    }
}

pub fn print_task_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        print_task(t);
    }
}

pub fn print_counts(c: &TaskCounts) {
    println!(
        "{} task(s): {} pending, {} completed ({:.1}% done)",
        c.total, c.pending, c.completed, c.percentage
    );
}

fn checkbox(t: &Task) -> &'static str {
    if t.completed {
        "[x]"
    } else {
        "[ ]"
    }
}
