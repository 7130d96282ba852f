//! Footer navigation CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use churchlink_core::error::AppError;
use churchlink_core::types::LocaleCode;
use churchlink_entity::navigation::{FooterSection, TitledGroup, Titles, lookup_title};

use super::Runtime;
use super::page::print_report;
use crate::output::{self, OutputFormat};

/// Arguments for footer commands
#[derive(Debug, Args)]
pub struct FooterArgs {
    /// Footer subcommand
    #[command(subcommand)]
    pub command: FooterCommand,
}

/// Footer subcommands
#[derive(Debug, Subcommand)]
pub enum FooterCommand {
    /// Show footer sections
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

/// Footer entry display row
#[derive(Debug, Serialize, Tabled)]
struct FooterRow {
    /// Section title
    section: String,
    /// Link title
    item: String,
    /// Target URL
    url: String,
    /// Locales with titles
    locales: String,
}

/// Execute footer commands
pub async fn execute(
    args: &FooterArgs,
    runtime: &Runtime,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        FooterCommand::Show { locale } => {
            let sections = runtime.navigation.footer().await?;
            if format == OutputFormat::Json {
                output::print_json(&sections);
            } else {
                output::print_list(&rows(&sections, locale.as_ref()), format);
            }
        }
        FooterCommand::Backfill { locales, dry_run } => {
            let (_, report) = runtime
                .navigation
                .backfill_footer(locales, *dry_run)
                .await?;
            print_report(&report, format);
            if !report.changed() {
                output::print_success("Footer already translated");
            } else if *dry_run {
                output::print_warning("Dry run: footer not saved");
            } else {
                output::print_success("Footer saved");
            }
        }
    }

    Ok(())
}

fn rows(sections: &[FooterSection], locale: Option<&LocaleCode>) -> Vec<FooterRow> {
    let mut rows = Vec::new();
    for section in sections {
        let heading = match locale {
            Some(locale) => section.display_title(locale),
            None => section.title.clone(),
        };
        if section.items.is_empty() {
            rows.push(FooterRow {
                section: heading.clone(),
                item: String::new(),
                url: String::new(),
                locales: locale_list(&section.titles),
            });
        }
        for item in &section.items {
            rows.push(FooterRow {
                section: heading.clone(),
                item: match locale {
                    Some(locale) => lookup_title(&item.titles, locale).or_base(&item.title),
                    None => item.title.clone(),
                },
                url: item.url.clone().unwrap_or_default(),
                locales: locale_list(&item.titles),
            });
        }
    }
    rows
}

fn locale_list(titles: &Titles) -> String {
    titles
        .keys()
        .map(LocaleCode::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
