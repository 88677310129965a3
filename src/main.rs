use std::path::Path;

use clap::Parser;
use eyre::{Context, Result};
use itertools::Itertools;
use level_records::model::{LevelId, Metric, Submission};
use level_records::ranking::RankedSubmission;
use level_records::records::{CombinedRecordTable, RecordTable};
use level_records::snapshot::Snapshot;
use level_records::util::render_value;
use level_records::{EngineConfig, Leaderboard};
use serde::Serialize;

use crate::cli::{Args, Command, Format};

mod cli;
mod env;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env::RUST_LOG.as_str()))
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig {
        verify_ordering: *env::VERIFY_ORDERING,
    };

    match args.command {
        Command::Records { query, metric } => {
            let (board, submissions) = load_snapshot(&query.snapshot, config)?;
            match metric.metric() {
                Some(metric) => {
                    let table =
                        board.records(&submissions, query.category, metric, query.sort_mode)?;
                    match args.format {
                        Format::Json => print_json(&table)?,
                        Format::Text => print_records(&table, metric),
                    }
                }
                None => {
                    let table =
                        board.combined_records(&submissions, query.category, query.sort_mode)?;
                    match args.format {
                        Format::Json => print_json(&table)?,
                        Format::Text => print_combined_records(&table),
                    }
                }
            }
        }

        Command::History {
            snapshot,
            category,
        } => {
            let (board, submissions) = load_snapshot(&snapshot, config)?;
            let history = board.history(&submissions, category)?;
            match args.format {
                Format::Json => print_json(&history)?,
                Format::Text => print_history(&board, &history),
            }
        }

        Command::Ranking {
            query,
            level,
            metric,
        } => {
            let (board, submissions) = load_snapshot(&query.snapshot, config)?;
            let ranked = board.level_ranking(
                &submissions,
                LevelId(level),
                query.category,
                metric,
                query.sort_mode,
            )?;
            match args.format {
                Format::Json => print_json(&ranked)?,
                Format::Text => print_ranking(&ranked, metric),
            }
        }

        Command::Toggle {
            state,
            metric,
            checked,
        } => {
            let new_state = state.transition(metric, checked);
            tracing::debug!(%state, %metric, checked, %new_state, "Toggled sort mode.");
            match args.format {
                Format::Json => print_json(&new_state)?,
                Format::Text => println!("{new_state}"),
            }
        }
    }

    Ok(())
}

fn load_snapshot(path: &Path, config: EngineConfig) -> Result<(Leaderboard, Vec<Submission>)> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("error reading snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)
        .wrap_err_with(|| format!("error parsing snapshot {}", path.display()))?;
    Ok(snapshot.into_leaderboard(config))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_records(table: &RecordTable, metric: Metric) {
    for mode in table.modes() {
        println!("{}", mode.mode);
        for entry in &mode.entries {
            println!(
                "  {}: {} ({})",
                entry.level_name,
                render_value(metric, entry.record),
                entry.tied_users.iter().map(|u| &u.username).join(", "),
            );
        }
    }
}

fn print_combined_records(table: &CombinedRecordTable) {
    for mode in table.modes() {
        println!("{}", mode.mode);
        for entry in &mode.entries {
            println!(
                "  {}: score {} ({}), time {} ({})",
                entry.level_name,
                render_value(Metric::Score, entry.score_record),
                entry.score_holders.iter().map(|u| &u.username).join(", "),
                render_value(Metric::Time, entry.time_record),
                entry.time_holders.iter().map(|u| &u.username).join(", "),
            );
        }
    }
}

fn print_history(board: &Leaderboard, history: &[Submission]) {
    for (level_id, submissions) in &history.iter().chunk_by(|s| s.level_id) {
        let level_name = board
            .level(level_id)
            .map(|level| level.name.clone())
            .unwrap_or_else(|_| format!("level {level_id}"));
        println!("{level_name}");
        for s in submissions {
            println!(
                "  {}: score {}, time {}, {}",
                board.profiles().public_user(s.user_id).username,
                render_value(Metric::Score, s.score),
                render_value(Metric::Time, s.time_ms),
                s.submitted_at.format("%Y-%m-%d %H:%M"),
            );
        }
    }
}

fn print_ranking(ranked: &[RankedSubmission], metric: Metric) {
    for RankedSubmission {
        rank,
        user,
        submission,
    } in ranked
    {
        println!(
            "{rank:>4}. {} {}",
            user.username,
            render_value(metric, submission.metric_value(metric)),
        );
    }
}
