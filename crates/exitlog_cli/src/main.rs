//! Command-line driver for the exit log core.
//!
//! # Responsibility
//! - Verify `exitlog_core` linkage (ping/version smoke check).
//! - Run one session: hydrate, optionally add/remove a record, print views.

use clap::Parser;
use exitlog_core::db::{open_db, open_db_in_memory};
use exitlog_core::{
    init_from_config, AppConfig, ChartData, DemoInfo, DisabledRemoteSync, ExitLogService,
    HttpRemoteSync, NewRecord, Pacer, RecordId, RecordPersistence, RecordView, RemoteSync,
    RenderSink, SqliteSlotStore, DEFAULT_TOP_REASONS_LIMIT,
};
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "exitlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Record and summarize exit log entries", long_about = None)]
struct CliArgs {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite slot database; overrides `storage.db_path`
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Record to create; NAME and REASON may be left empty
    #[arg(short, long, value_name = "NAME,DATE,TIME[,REASON]", value_parser = parse_candidate)]
    add: Option<NewRecord>,

    /// Record id to delete
    #[arg(short, long, value_name = "ID")]
    remove: Option<RecordId>,

    /// Case-insensitive name substring to list
    #[arg(short, long, value_name = "NAME")]
    search: Option<String>,

    /// Exact date to list
    #[arg(short, long, value_name = "DATE")]
    date: Option<String>,
}

/// Prints every render call to stdout.
struct StdoutSink;

impl RenderSink for StdoutSink {
    fn render_records(&mut self, rows: &[RecordView]) {
        println!("-- records --");
        if rows.is_empty() {
            println!("{}", exitlog_core::render::EMPTY_LIST_PLACEHOLDER);
        }
        for row in rows {
            println!(
                "[{}] {} - {} {} | reason: {} ({})",
                row.id, row.name, row.date, row.time, row.reason, row.delete_label
            );
        }
    }

    fn render_chart(&mut self, chart: &ChartData) {
        println!("-- {} --", chart.title);
        for (label, value) in chart.points() {
            println!("{label:<20} {}", "#".repeat(value));
        }
    }

    fn render_demo_info(&mut self, info: &DemoInfo) {
        println!("-- user: {} <{}> --", info.user.name, info.user.email);
        for post in &info.posts {
            println!("* {}", post.title);
        }
    }

    fn clear_form(&mut self) {}
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    println!("exitlog_core ping={}", exitlog_core::ping());
    println!("exitlog_core version={}", exitlog_core::core_version());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("exitlog: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), String> {
    let mut config = match args.config.as_deref() {
        Some(path) => AppConfig::load(path).map_err(|err| err.to_string())?,
        None => AppConfig::default(),
    };
    if args.db.is_some() {
        config.storage.db_path = args.db.clone();
    }

    init_from_config(&config.logging)?;

    if config.remote.enabled {
        let remote = HttpRemoteSync::new(config.remote.base_url.clone(), config.remote.timeout())
            .map_err(|err| err.to_string())?;
        let outcome = run_session(&config, args, &remote);
        // Background POSTs die with the process unless joined here.
        remote.flush();
        outcome
    } else {
        run_session(&config, args, DisabledRemoteSync)
    }
}

fn run_session<R: RemoteSync>(
    config: &AppConfig,
    args: &CliArgs,
    remote: R,
) -> Result<(), String> {
    let conn = match config.storage.db_path.as_deref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let persistence =
        RecordPersistence::with_key(SqliteSlotStore::new(&conn), config.storage.slot_key.clone());
    let mut service = ExitLogService::new(persistence, StdoutSink, remote)
        .with_pacer(Pacer::new(config.latency))
        .with_demo_request((&config.remote).into());

    service.initialize();

    if let Some(candidate) = args.add.clone() {
        let record = service.add_record(candidate);
        println!("added record id={}", record.id);
    }

    if let Some(id) = args.remove {
        if !service.remove_record(id) {
            warn!("event=cli_remove module=cli status=noop record_id={id}");
            println!("no record with id={id}");
        }
    }

    if let Some(needle) = args.search.as_deref() {
        println!("-- name matches for `{needle}` --");
        for record in service.search_by_name(needle) {
            println!("[{}] {} {} {}", record.id, record.name, record.date, record.time);
        }
    }

    if let Some(date) = args.date.as_deref() {
        println!("-- records on {date} --");
        for record in service.records_on(date) {
            println!("[{}] {} {}", record.id, record.name, record.time);
        }
    }

    println!("-- top reasons --");
    for bucket in service.top_reasons(DEFAULT_TOP_REASONS_LIMIT) {
        println!("{:<20} {}", bucket.reason, bucket.count);
    }

    Ok(())
}

/// Parses `NAME,DATE,TIME,REASON`; name and reason may be left empty.
fn parse_candidate(spec: &str) -> Result<NewRecord, String> {
    let parts = spec.splitn(4, ',').map(str::trim).collect::<Vec<_>>();
    let [name, date, time, rest @ ..] = parts.as_slice() else {
        return Err(format!("expected NAME,DATE,TIME[,REASON], got `{spec}`"));
    };

    let mut candidate = NewRecord::new(*date, *time);
    if !name.is_empty() {
        candidate = candidate.with_name(*name);
    }
    if let Some(reason) = rest.first().filter(|reason| !reason.is_empty()) {
        candidate = candidate.with_reason(*reason);
    }
    Ok(candidate)
}
