//! Header navigation CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use churchlink_core::error::AppError;
use churchlink_core::types::LocaleCode;
use churchlink_entity::navigation::{HeaderItem, Titles, lookup_title};

use super::Runtime;
use super::page::print_report;
use crate::output::{self, OutputFormat};

/// Arguments for header commands
#[derive(Debug, Args)]
pub struct HeaderArgs {
    /// Header subcommand
    #[command(subcommand)]
    pub command: HeaderCommand,
}

/// Header subcommands
#[derive(Debug, Subcommand)]
pub enum HeaderCommand {
    /// Show header items
    Show {
        /// Display titles in this locale
        #[arg(short, long)]
        locale: Option<LocaleCode>,
    },
    /// Machine-translate missing titles into one or more locales
    Backfill {
        /// Target locale (repeatable)
        #[arg(short, long = "locale", required = true)]
        locales: Vec<LocaleCode>,
        /// Report what would change without saving
        #[arg(long)]
        dry_run: bool,
    },
}

/// Header entry display row
#[derive(Debug, Serialize, Tabled)]
struct HeaderRow {
    /// Title, indented for dropdown links
    title: String,
    /// Target URL
    url: String,
    /// Visible
    visible: String,
    /// Locales with titles
    locales: String,
}

/// Execute header commands
pub async fn execute(
    args: &HeaderArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        HeaderCommand::Show { locale } => {
            let items = runtime.navigation.header().await?;
            if format == OutputFormat::Json {
                output::print_json(&items);
            } else {
                output::print_list(&rows(&items, locale.as_ref()), format);
            }
        }
        HeaderCommand::Backfill { locales, dry_run } => {
            let (_, report) = runtime
                .navigation
                .backfill_header(locales, *dry_run)
                .await?;
            print_report(&report, format);
            if !report.changed() {
                output::print_success("Header already translated");
            } else if *dry_run {
                output::print_warning("Dry run: header not saved");
            } else {
                output::print_success("Header saved");
            }
        }
    }

    Ok(())
}

fn rows(items: &[HeaderItem], locale: Option<&LocaleCode>) -> Vec<HeaderRow> {
    let mut rows = Vec::new();
    for item in items {
        rows.push(HeaderRow {
            title: display(&item.title, &item.titles, locale),
            url: item.url.clone().unwrap_or_default(),
            visible: if item.visible { "yes" } else { "no" }.to_string(),
            locales: locale_list(&item.titles),
        });
        for link in &item.items {
            rows.push(HeaderRow {
                title: format!("  {}", display(&link.title, &link.titles, locale)),
                url: link.url.clone(),
                visible: String::new(),
                locales: locale_list(&link.titles),
            });
        }
    }
    rows
}

fn display(base: &str, titles: &Titles, locale: Option<&LocaleCode>) -> String {
    match locale {
        Some(locale) => lookup_title(titles, locale).or_base(base),
        None => base.to_string(),
    }
}

fn locale_list(titles: &Titles) -> String {
    titles
        .keys()
        .map(LocaleCode::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
