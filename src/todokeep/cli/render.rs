use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use todokeep::api::{CmdMessage, MessageLevel, StatusReport};
use todokeep::config::{TodoKeepConfig, CONFIG_KEYS};
use todokeep::index::{DisplayDeleted, DisplayTodo};
use todokeep::store::trash_store::TrashPolicy;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_greeting(user_name: Option<&str>) -> String {
    match user_name {
        Some(name) => format!("{}\n\n", format!("Hello, {}!", name).bold()),
        None => format!(
            "{}\n\n",
            "Tip: tell todokeep your name with `todokeep name <NAME>`".dimmed()
        ),
    }
}

pub(super) fn render_todo_list(todos: &[DisplayTodo], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for dt in todos {
        let idx = format!("{:>4}. ", dt.index.to_string());
        let marker = if dt.todo.completed { "[x] " } else { "[ ] " };
        let fixed = idx.width() + marker.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);

        let text = truncate_to_width(&dt.todo.text, available);
        let padding = " ".repeat(available.saturating_sub(text.width()));
        let stamp = dt.todo.completed_at.unwrap_or(dt.todo.created_at);
        let time = format!(
            "{:>width$}",
            format_time_ago(stamp, now),
            width = TIME_WIDTH
        );

        let line = if dt.todo.completed {
            format!(
                "{}{}{}{}{}",
                idx.dimmed(),
                marker.green(),
                text.dimmed().strikethrough(),
                padding,
                time.dimmed()
            )
        } else {
            format!("{}{}{}{}{}", idx, marker, text, padding, time.dimmed())
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub(super) fn render_deleted_list(
    entries: &[DisplayDeleted],
    policy: &TrashPolicy,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    for dd in entries {
        let idx = format!("{:>4}. ", dd.index.to_string());
        let fixed = idx.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);

        let text = truncate_to_width(&dd.entry.todo.text, available);
        let padding = " ".repeat(available.saturating_sub(text.width()));
        let time = format!(
            "{:>width$}",
            format_time_ago(dd.entry.deleted_at, now),
            width = TIME_WIDTH
        );
        let left = format_days_left(policy.days_left(dd.entry.deleted_at, now));

        out.push_str(&format!(
            "{}{}{}{}  {}\n",
            idx.red(),
            text,
            padding,
            time.dimmed(),
            left.yellow()
        ));
    }
    out
}

pub(super) fn render_status(report: &StatusReport, now: DateTime<Utc>) -> String {
    let stats = &report.stats;
    let name = stats.user_name.as_deref().unwrap_or("(not set)");
    let last_saved = stats
        .last_saved
        .map(|t| format_time_ago(t, now))
        .unwrap_or_else(|| "never".to_string());

    let mut out = String::new();
    out.push_str(&format!("Name:             {}\n", name));
    out.push_str(&format!(
        "Todos:            {} ({} completed)\n",
        stats.todos_count, stats.completed_count
    ));
    out.push_str(&format!(
        "Recently deleted: {} of {} (kept {} days)\n",
        report.trash_count,
        report.trash_policy.capacity,
        report.trash_policy.retention.num_days()
    ));
    out.push_str(&format!("Last saved:       {}\n", last_saved));
    out
}

pub(super) fn render_config(config: &TodoKeepConfig) -> String {
    let mut out = String::new();
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            out.push_str(&format!("{} = {}\n", key, value));
        }
    }
    out
}

fn format_days_left(days: i64) -> String {
    match days {
        0 => "expires today".to_string(),
        1 => "1 day left".to_string(),
        n => format!("{} days left", n),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
