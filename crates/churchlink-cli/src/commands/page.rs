//! Page CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use churchlink_core::error::AppError;
use churchlink_core::types::{ListRequest, LocaleCode};
use churchlink_entity::page::{EditState, Node, Page, resolve_localized};
use churchlink_service::{BackfillReport, LatestOnly};

use super::{Runtime, confirm, write_json};
use crate::output::{self, OutputFormat};

/// Arguments for page commands
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page subcommand
    #[command(subcommand)]
    pub command: PageCommand,
}

/// Page subcommands
#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Show a page's content tree
    Show {
        /// Page slug
        slug: String,
        /// Which copy to load (staging, preview, live)
        #[arg(short, long, default_value = "staging")]
        state: EditState,
        /// Render content in this locale
        #[arg(short, long)]
        locale: Option<LocaleCode>,
    },
    /// List pages
    List {
        /// Filter by title or slug
        #[arg(short, long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Items per page
        #[arg(long, default_value_t = 25)]
        page_size: u64,
    },
    /// Machine-translate missing content into one or more locales
    Backfill {
        /// Page slug
        slug: String,
        /// Target locale (repeatable)
        #[arg(short, long = "locale", required = true)]
        locales: Vec<LocaleCode>,
        /// Report what would change without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Publish the staging copy
    Publish {
        /// Page slug
        slug: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the staging copy to a JSON file
    Export {
        /// Page slug
        slug: String,
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Replace the staging copy with a JSON file
    Import {
        /// Page slug
        slug: String,
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Page display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PageRow {
    /// Slug
    slug: String,
    /// Title
    title: String,
    /// Visible
    visible: bool,
    /// Locked
    locked: bool,
}

/// Node display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NodeRow {
    /// Section name
    section: String,
    /// Node id, indented by depth
    node: String,
    /// Node type
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    node_type: String,
    /// Rendered text
    content: String,
    /// Locales with overrides
    locales: String,
}

/// Execute page commands
pub async fn execute(
    args: &PageArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        PageCommand::Show {
            slug,
            state,
            locale,
        } => {
            let page = runtime.pages.fetch(slug, *state).await?;
            show(&page, locale.as_ref(), runtime, format)?;
        }
        PageCommand::List {
            search,
            page,
            page_size,
        } => {
            let request = ListRequest::new(*page, *page_size);
            let results = LatestOnly::new();
            runtime
                .pages
                .search(&results, search.as_deref(), &request)
                .await?;
            let Some(listing) = results.latest() else {
                return Ok(());
            };
            let rows: Vec<PageRow> = listing
                .items
                .iter()
                .map(|p| PageRow {
                    slug: p.slug.clone(),
                    title: p.title.clone(),
                    visible: p.visible,
                    locked: p.locked,
                })
                .collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} total)",
                    listing.page,
                    listing.total_pages().max(1),
                    listing.total_items
                );
            }
        }
        PageCommand::Backfill {
            slug,
            locales,
            dry_run,
        } => {
            let mut session = runtime.pages.open(slug).await?;
            let report = runtime.pages.backfill(&mut session, locales).await?;
            print_report(&report, format);
            if !report.changed() {
                output::print_success("Nothing to translate");
            } else if *dry_run {
                output::print_warning("Dry run: changes not saved");
            } else {
                let receipt = runtime.pages.save(&mut session).await?;
                output::print_success(&format!(
                    "Saved '{slug}' at revision {}",
                    receipt.revision
                ));
            }
        }
        PageCommand::Publish { slug, yes } => {
            if !confirm(&format!("Publish the staging copy of '{slug}'?"), *yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            runtime.pages.publish(slug).await?;
            output::print_success(&format!("Published '{slug}'"));
        }
        PageCommand::Export { slug, output: path } => {
            let page = runtime.pages.fetch(slug, EditState::Staging).await?;
            write_json(path, &page).await?;
            output::print_success(&format!("Exported '{slug}' to '{}'", path.display()));
        }
        PageCommand::Import { slug, input, yes } => {
            let bytes = tokio::fs::read(input).await?;
            let mut page: Page = serde_json::from_slice(&bytes).map_err(|e| {
                AppError::serialization(format!("Invalid page file '{}': {e}", input.display()))
            })?;
            if page.slug != *slug {
                output::print_warning(&format!(
                    "File holds page '{}', importing it as '{slug}'",
                    page.slug
                ));
                page.slug = slug.clone();
            }
            if !confirm(&format!("Replace the staging copy of '{slug}'?"), *yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let receipt = runtime.pages.import(page).await?;
            output::print_success(&format!(
                "Imported '{slug}' at revision {}",
                receipt.revision
            ));
        }
    }

    Ok(())
}

fn show(
    page: &Page,
    locale: Option<&LocaleCode>,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    let fallback = runtime.config.source_locale()?;
    let default_locale = page.default_locale.clone().unwrap_or(fallback);

    if format == OutputFormat::Json {
        match locale {
            Some(locale) => output::print_json(&page.resolve(locale, &default_locale)),
            None => output::print_json(page),
        }
        return Ok(());
    }

    output::print_kv("Title", &page.title);
    output::print_kv("Slug", &page.slug);
    output::print_kv("Revision", &page.revision.to_string());
    output::print_kv("Default locale", default_locale.as_str());
    output::print_kv("Nodes", &page.node_count().to_string());

    let mut rows = Vec::new();
    for section in &page.sections {
        for node in &section.children {
            node_rows(&section.name, node, 0, locale, &default_locale, &mut rows);
        }
    }
    output::print_list(&rows, format);
    Ok(())
}

fn node_rows(
    section: &str,
    node: &Node,
    depth: usize,
    locale: Option<&LocaleCode>,
    default_locale: &LocaleCode,
    rows: &mut Vec<NodeRow>,
) {
    let content = node
        .content
        .translatable_entries()
        .first()
        .map(|(key, base)| match locale {
            Some(locale) => resolve_localized(node, locale, Some(default_locale))
                .get(*key)
                .and_then(|v| v.as_str())
                .unwrap_or(*base)
                .to_string(),
            None => (*base).to_string(),
        })
        .unwrap_or_default();

    rows.push(NodeRow {
        section: section.to_string(),
        node: format!("{}{}", "  ".repeat(depth), node.id),
        node_type: node.node_type().to_string(),
        content: truncate(&content, 48),
        locales: node
            .i18n
            .locales()
            .map(LocaleCode::as_str)
            .collect::<Vec<_>>()
            .join(","),
    });
    for child in &node.children {
        node_rows(section, child, depth + 1, locale, default_locale, rows);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Print a backfill report
pub fn print_report(report: &BackfillReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(report),
        OutputFormat::Table => {
            let locales: Vec<&str> = report.locales.iter().map(LocaleCode::as_str).collect();
            output::print_kv("Locales", &locales.join(", "));
            output::print_kv("Strings requested", &report.requested.to_string());
            output::print_kv("Overrides written", &report.applied.to_string());
            output::print_kv("Kept existing", &report.skipped_existing.to_string());
            output::print_kv("Untranslated", &report.missing.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("Welcome", 48), "Welcome");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Bienvenidos a la iglesia", 10), "Bienvenid…");
        assert_eq!(truncate("ñññññ", 4), "ñññ…");
    }
}
