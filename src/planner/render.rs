use super::storage::Stats;
use super::task::{Priority, Task};
use chrono::Local;
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

fn priority_label(priority: Priority) -> ColoredString {
    let label = priority.as_str().to_uppercase();
    match priority {
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.green(),
    }
}

fn status_marker(task: &Task) -> ColoredString {
    if task.completed {
        "✓".green()
    } else {
        "○".yellow()
    }
}

fn task_line(index: usize, task: &Task) -> String {
    let mut line = format!(
        "{} {}. {} {} {}",
        status_marker(task),
        index + 1,
        task.description,
        priority_label(task.priority),
        format!("#{}", task.id).dimmed()
    );

    if let Some(due) = &task.due_date {
        line.push_str(&format!(" {}", format!("📅 {}", due).magenta()));
    }

    if let Some(done) = task.completed_at {
        let local = done.with_timezone(&Local);
        line.push_str(&format!(
            " {}",
            format!("✅ {}", local.format("%Y-%m-%d")).green()
        ));
    }

    line
}

pub fn welcome(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "🚀 Welcome to Todo CLI!".bright_blue().bold())?;
    writeln!(out, "{}\n", "Type 'help' for available commands".dimmed())
}

pub fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{} ", "todo>".cyan())?;
    out.flush()
}

pub fn goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}\n", "👋 Goodbye!".green())
}

pub fn task_added(out: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(
        out,
        "{} Todo added: {} {}",
        "✓".green(),
        task.description.cyan(),
        format!("#{}", task.id).dimmed()
    )
}

pub fn task_toggled(out: &mut impl Write, task: &Task) -> io::Result<()> {
    if task.completed {
        writeln!(out, "{} Todo completed: {}", "✓".green(), task.description.cyan())
    } else {
        writeln!(out, "{} Todo unmarked: {}", "○".yellow(), task.description.cyan())
    }
}

pub fn task_deleted(out: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(out, "{} Todo deleted: {}", "🗑️".red(), task.description.cyan())
}

/// Writes a titled listing; `empty_note` is shown when nothing matched.
pub fn task_list<'a>(
    out: &mut impl Write,
    title: &str,
    tasks: impl Iterator<Item = &'a Task>,
    empty_note: &str,
) -> io::Result<()> {
    let lines: Vec<String> = tasks.enumerate().map(|(i, t)| task_line(i, t)).collect();

    if lines.is_empty() {
        return writeln!(out, "{}", empty_note.yellow());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "\n{} ({} items)\n\n",
        title.bright_blue().bold(),
        lines.len()
    ));
    for line in &lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');

    write!(out, "{}", output)
}

pub fn stats(out: &mut impl Write, stats: &Stats) -> io::Result<()> {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n\n", "📊 Todo Statistics".bright_blue().bold()));
    output.push_str(&format!("Total: {}\n", stats.total.to_string().cyan()));
    output.push_str(&format!("Completed: {}\n", stats.completed.to_string().green()));
    output.push_str(&format!("Pending: {}\n", stats.pending.to_string().yellow()));
    output.push_str(&format!(
        "High Priority Pending: {}\n",
        stats.high_priority_pending.to_string().red()
    ));
    if let Some(rate) = stats.completion_rate {
        output.push_str(&format!("Completion Rate: {}\n", format!("{:.1}%", rate).cyan()));
    }
    output.push('\n');

    write!(out, "{}", output)
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    let commands = [
        ("add", "<description> [priority] [due-date]", "Add a new todo"),
        ("list", "[filter]", "List todos (all/pending/completed/high/medium/low)"),
        ("complete", "<id>", "Toggle todo completion"),
        ("delete", "<id>", "Delete a todo"),
        ("search", "<query>", "Search todos"),
        ("stats", "", "Show statistics"),
        ("clear", "", "Clear screen"),
        ("help", "", "Show this help"),
        ("quit", "", "Exit the app"),
    ];

    let mut output = String::new();
    output.push_str(&format!("\n{}\n\n", "🚀 Todo CLI - Help".bright_blue().bold()));
    output.push_str(&format!("{}\n", "Commands:".cyan()));
    for (name, args, about) in commands {
        output.push_str(&format!(
            "  {:<9} {:<38} - {}\n",
            name.green(),
            args,
            about
        ));
    }

    output.push_str(&format!("\n{}\n", "Examples:".cyan()));
    output.push_str("  add \"Buy groceries\" high \"2024-01-15\"\n");
    output.push_str("  list pending\n");
    output.push_str("  complete 1705312800000\n");
    output.push_str("  search meeting\n");
    output.push_str("  stats\n\n");

    output.push_str(&format!(
        "{} high, medium, low (default: medium)\n",
        "Priorities:".cyan()
    ));
    output.push_str(&format!("{} YYYY-MM-DD\n\n", "Date Format:".cyan()));

    write!(out, "{}", output)
}

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))
}

pub fn error(err: &mut impl Write, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(err, "{} {}", "Error:".red(), message)
}

pub fn warning(err: &mut impl Write, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(err, "{} {}", "Warning:".yellow(), message)
}
