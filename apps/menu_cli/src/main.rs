mod commands;
mod config;
mod render;
mod session;

use std::{fs, io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use menu_core::{codec, group_by_course, summarize, MenuCollection};
use screen_bridge::{gated, Confirmation};
use serde::Serialize;
use shared::{
    domain::{DishId, DishInput},
    error::{ErrorPayload, MenuError},
};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{load_settings, Settings},
    session::Session,
};

#[derive(Parser, Debug)]
#[command(about = "Curate an in-memory restaurant menu")]
struct Cli {
    /// Settings file; defaults to ./menu.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SnapshotSource {
    /// Transport string to start from.
    #[arg(long, conflicts_with = "file")]
    dishes: Option<String>,
    /// File holding the transport string.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive screens on stdin/stdout.
    Session,
    /// Print course groups and price statistics as JSON.
    Summarize {
        #[command(flatten)]
        source: SnapshotSource,
    },
    /// Append a dish and print the new transport string.
    Add {
        #[command(flatten)]
        source: SnapshotSource,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        price: String,
    },
    /// Remove a dish by id; without --yes the snapshot is printed unchanged.
    Remove {
        #[command(flatten)]
        source: SnapshotSource,
        #[arg(long)]
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Clear the menu; without --yes the snapshot is printed unchanged.
    Reset {
        #[command(flatten)]
        source: SnapshotSource,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Serialize)]
struct GroupReport {
    course: String,
    count: usize,
    average_price: f64,
    dish_ids: Vec<String>,
}

#[derive(Serialize)]
struct SummaryReport {
    count: usize,
    average_price: f64,
    groups: Vec<GroupReport>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let (settings, warnings) = load_settings(cli.config.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();
    for warning in warnings {
        tracing::warn!("{warning}");
    }

    match run(cli.command, settings) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match error_payload(&err) {
            Some(payload) => {
                tracing::error!(error = %err, "menu command failed");
                eprintln!("{}", serde_json::to_string(&payload)?);
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

/// Model errors leave the process as a coded JSON payload on stderr.
fn error_payload(err: &anyhow::Error) -> Option<ErrorPayload> {
    err.downcast_ref::<MenuError>().cloned().map(ErrorPayload::from)
}

fn run(command: Command, settings: Settings) -> Result<()> {
    match command {
        Command::Session => {
            let mut session = Session::new(settings, io::stdin().lock(), io::stdout());
            session.run()?;
        }
        Command::Summarize { source } => {
            let menu = source.load()?;
            let summary = summarize(&menu);
            let report = SummaryReport {
                count: summary.count,
                average_price: summary.average_price,
                groups: group_by_course(&menu)
                    .into_iter()
                    .map(|group| {
                        let group_summary = group.summary();
                        GroupReport {
                            course: group.label().to_string(),
                            count: group_summary.count,
                            average_price: group_summary.average_price,
                            dish_ids: group.dishes.iter().map(|d| d.id.to_string()).collect(),
                        }
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Add {
            source,
            name,
            description,
            course,
            price,
        } => {
            let menu = source.load()?;
            let mut ids = settings.id_strategy.generator();
            let input = DishInput::new(name, description, course, price);
            let (menu, record) = menu.add(&input, ids.as_mut())?;
            tracing::info!(dish_id = %record.id, "added dish");
            println!("{}", codec::encode(&menu)?);
        }
        Command::Remove { source, id, yes } => {
            let menu = source.load()?;
            let id = DishId::new(id);
            let menu = gated(decision(yes), &menu, |current| current.remove(&id));
            println!("{}", codec::encode(&menu)?);
        }
        Command::Reset { source, yes } => {
            let menu = source.load()?;
            let menu = gated(decision(yes), &menu, MenuCollection::clear);
            println!("{}", codec::encode(&menu)?);
        }
    }

    Ok(())
}

fn decision(yes: bool) -> Confirmation {
    if yes {
        Confirmation::Confirmed
    } else {
        Confirmation::Cancelled
    }
}

impl SnapshotSource {
    fn load(&self) -> Result<MenuCollection> {
        let raw = match (&self.dishes, &self.file) {
            (Some(dishes), _) => Some(dishes.clone()),
            (None, Some(path)) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read snapshot '{}'", path.display()))?,
            ),
            (None, None) => None,
        };
        let menu = codec::decode(raw.as_deref()).context("snapshot is not a valid menu")?;
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use shared::error::{DishField, ErrorCode};

    use super::*;

    #[test]
    fn model_errors_become_coded_payloads() {
        let err = anyhow::Error::new(MenuError::validation(DishField::Price, "is required"));
        let payload = error_payload(&err).expect("payload");
        assert_eq!(payload.code, ErrorCode::Validation);
        assert_eq!(payload.message, "invalid price: is required");
    }

    #[test]
    fn context_wrapped_decode_errors_keep_their_code() {
        let err = codec::decode(Some("{broken"))
            .context("snapshot is not a valid menu")
            .expect_err("malformed");
        let payload = error_payload(&err).expect("payload");
        assert_eq!(payload.code, ErrorCode::MalformedState);
    }

    #[test]
    fn io_errors_have_no_payload() {
        let err = anyhow::Error::new(io::Error::other("disk"));
        assert!(error_payload(&err).is_none());
    }
}
