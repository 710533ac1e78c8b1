use chrono::{DateTime, Utc};
use colored::Colorize;
use dashstore::api::{CmdMessage, KeyPaths, KeyedDoc, MessageLevel};
use dashstore::config::DashConfig;
use dashstore::schema;
use dashstore::store::facade::KeyEntry;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const TIER_COLUMN: &str = "cache disk";

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

/// A single document prints bare so it can be piped; several get headers.
pub(super) fn print_documents(docs: &[KeyedDoc]) {
    if let [only] = docs {
        println!("{}", to_pretty(&only.doc));
        return;
    }
    for (i, kd) in docs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", kd.key.as_str().yellow().bold());
        println!("{}", to_pretty(&kd.doc));
    }
}

fn to_pretty(doc: &serde_json::Value) -> String {
    serde_json::to_string_pretty(doc).unwrap_or_else(|_| doc.to_string())
}

pub(super) fn print_entries(entries: &[KeyEntry]) {
    if entries.is_empty() {
        return;
    }

    let key_width = entries
        .iter()
        .map(|e| e.key.as_str().width())
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    println!(
        "{}  {}  {}",
        pad("KEY", key_width).bold(),
        TIER_COLUMN.bold(),
        "MODIFIED".bold()
    );
    for entry in entries {
        let tiers = format!(
            "{:<5} {:<4}",
            if entry.in_fast { "●" } else { "·" },
            if entry.in_durable { "●" } else { "·" }
        );
        let key = pad(entry.key.as_str(), key_width);
        let key = if schema::lookup(entry.key.as_str()).is_some() {
            key.normal()
        } else {
            key.cyan()
        };
        println!(
            "{}  {}  {}",
            key,
            tiers,
            format_time_ago(entry.modified).dimmed()
        );
    }
}

pub(super) fn print_paths(paths: &[KeyPaths]) {
    for p in paths {
        match &p.durable {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", p.fast.display()),
        }
    }
}

pub(super) fn print_config(config: &DashConfig) {
    let data_dir = config
        .data_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|e| e.to_string());
    println!("{} = {}", "data_dir".bold(), data_dir);
    println!("{} = {}", "durable".bold(), config.durable);
    println!("{} = {}", "pretty".bold(), config.pretty);
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn format_time_ago(time: Option<DateTime<Utc>>) -> String {
    let Some(time) = time else {
        return "-".to_string();
    };
    let elapsed = Utc::now().signed_duration_since(time);
    Formatter::new().convert(elapsed.to_std().unwrap_or_default())
}
