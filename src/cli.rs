//! Command-line front end: stands in for the clipboard notifier (`capture`)
//! and the presentation layer (everything else).

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shelf_app::CaptureOutcome;
use shelf_core::{CaptureKind, ItemId, ShelfItem};

use crate::bootstrap::ShelfRuntime;

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Parser)]
#[command(name = "sideshelf")]
#[command(about = "Clipboard history shelf for text and images", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file (defaults to <data dir>/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a clipboard observation
    Capture {
        #[command(subcommand)]
        what: CaptureCommand,
    },
    /// Print the shelf, newest first
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove one item by id
    Remove { id: ItemId },
    /// Evict expired items now
    Cleanup,
    /// Remove every item
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum CaptureCommand {
    /// Copied text
    Text { content: String },
    /// Copied image, by locator (file path, file:// or http(s):// URL)
    Image { locator: String },
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ItemView {
    id: i64,
    kind: &'static str,
    captured_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_uri: Option<String>,
}

impl From<&ShelfItem> for ItemView {
    fn from(item: &ShelfItem) -> Self {
        let captured_at = Utc
            .timestamp_millis_opt(item.captured_at_ms())
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let (content, local_uri, source_uri) = match item {
            ShelfItem::Text(text) => (Some(text.content.clone()), None, None),
            ShelfItem::Image(image) => (
                None,
                Some(image.local_uri.clone()),
                image.source_uri.clone(),
            ),
        };
        Self {
            id: item.id().value(),
            kind: item.kind_str(),
            captured_at,
            content,
            local_uri,
            source_uri,
        }
    }
}

/// One table row: id, local time, kind, preview.
fn render_row(item: &ShelfItem) -> String {
    let when = Local
        .timestamp_millis_opt(item.captured_at_ms())
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let preview = match item {
        ShelfItem::Text(text) => preview(&text.content),
        ShelfItem::Image(image) => image.local_uri.clone(),
    };
    format!("{}\t{}\t{}\t{}", item.id(), when, item.kind_str(), preview)
}

fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default();
    let mut out: String = line.chars().take(PREVIEW_CHARS).collect();
    if line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}

pub async fn run(command: Commands, runtime: &ShelfRuntime) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Capture { what } => {
            let (kind, payload) = match what {
                CaptureCommand::Text { content } => (CaptureKind::Text, content),
                CaptureCommand::Image { locator } => (CaptureKind::Image, locator),
            };
            let observed_at = Utc::now().timestamp_millis();
            let outcome = runtime
                .capture
                .on_capture(kind, &payload, observed_at)
                .await
                .context("Failed to store capture")?;
            match outcome {
                CaptureOutcome::Stored(id) => writeln!(stdout, "stored {id}")?,
                CaptureOutcome::Duplicate => writeln!(stdout, "duplicate of newest item")?,
                CaptureOutcome::Ignored => writeln!(stdout, "ignored")?,
            }
        }
        Commands::List { json } => {
            let items = runtime.store.list().await;
            if json {
                let views: Vec<ItemView> = items.iter().map(ItemView::from).collect();
                serde_json::to_writer_pretty(&mut stdout, &views)?;
                writeln!(stdout)?;
            } else {
                for item in &items {
                    writeln!(stdout, "{}", render_row(item))?;
                }
            }
        }
        Commands::Remove { id } => {
            let removed = runtime
                .store
                .remove(id)
                .await
                .with_context(|| format!("Failed to remove item {id}"))?;
            if !removed {
                anyhow::bail!("No item with id {id}");
            }
            writeln!(stdout, "removed {id}")?;
        }
        Commands::Cleanup => {
            let removed = runtime.store.cleanup_expired().await?;
            writeln!(stdout, "expired {removed}")?;
        }
        Commands::Clear => {
            let removed = runtime.store.clear_all().await?;
            writeln!(stdout, "cleared {removed}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::ImageItem;

    #[test]
    fn parses_capture_and_remove() {
        let cli = Cli::parse_from(["sideshelf", "capture", "text", "hello world"]);
        assert!(matches!(
            cli.command,
            Commands::Capture { what: CaptureCommand::Text { ref content } } if content == "hello world"
        ));

        let cli = Cli::parse_from(["sideshelf", "remove", "42", "--config", "/tmp/s.toml"]);
        assert!(matches!(cli.command, Commands::Remove { id } if id == ItemId::new(42)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["sideshelf", "remove", "abc"]).is_err());
    }

    #[test]
    fn json_view_matches_stored_record_fields() {
        let item = ShelfItem::Image(ImageItem {
            id: ItemId::new(5),
            local_uri: "file:///vault/img.png".into(),
            source_uri: None,
            captured_at_ms: 0,
        });

        let json = serde_json::to_value(ItemView::from(&item)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "kind": "image",
                "captured_at": "1970-01-01T00:00:00+00:00",
                "local_uri": "file:///vault/img.png",
            })
        );
    }

    #[test]
    fn preview_truncates_long_and_multiline_text() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("first\nsecond"), "first…");
        let long = "x".repeat(100);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 1);
    }
}
