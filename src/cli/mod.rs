//! The casework command-line interface.
//!
//! Every table found under the given directory is read as a list of
//! [`AccountState`] rows and run through [`withdraw_body`] with a fresh
//! [`AccountFixture`] per case.

use std::path::Path;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::args::{CaseworkArgs, Command, RunOptions};
use crate::config::{RenderConfig, RunnerConfig};
use crate::report::{RunReport, Summary};
use crate::runner::CaseRunner;
use crate::table::{discover_tables, load_table, suite_name};
use crate::toys::bank::{withdraw_body, AccountFixture, AccountState};
use crate::{render, CaseTable};

pub mod args;

/// Parses arguments, dispatches, and returns whether every case passed.
pub fn run() -> Result<bool> {
    let args = CaseworkArgs::parse();
    match args.command {
        Command::Run { path, options } => handle_run(&path, &options),
        Command::List { path } => handle_list(&path).map(|_| true),
    }
}

fn runner_config(options: &RunOptions) -> RunnerConfig {
    let mut config = RunnerConfig::default();
    if let Some(filter) = &options.filter {
        config = config.with_filter(filter.clone());
    }
    if options.reject_duplicates {
        config = config.rejecting_duplicates();
    }
    config
}

fn load_tables(root: &Path) -> Result<Vec<(String, CaseTable<AccountState>)>> {
    discover_tables(root)?
        .into_iter()
        .map(|path| -> Result<_> { Ok((suite_name(&path), load_table(&path)?)) })
        .collect()
}

/// Runs every table under `root`.
pub fn run_tables(root: &Path, config: &RunnerConfig) -> Result<Vec<RunReport>> {
    let mut reports = Vec::new();
    for (suite, table) in load_tables(root)? {
        let runner = CaseRunner::new(suite).with_config(config.clone());
        reports.push(runner.run_with_fixture::<_, AccountFixture, _>(&table, withdraw_body)?);
    }
    Ok(reports)
}

fn handle_run(root: &Path, options: &RunOptions) -> Result<bool> {
    let reports = run_tables(root, &runner_config(options))?;

    let mut total = Summary::default();
    for report in &reports {
        total.merge(report.summary());
    }
    info!(tables = reports.len(), cases = total.total(), "run complete");

    if options.json {
        let json = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{json}");
    } else {
        let render_config = RenderConfig {
            use_colors: !options.no_color && RenderConfig::default().use_colors,
            verbose: !options.quiet,
        };
        for report in &reports {
            render::print_report(report, &render_config).into_diagnostic()?;
        }
        if reports.len() > 1 {
            render::print_summary("all tables", &total, &render_config).into_diagnostic()?;
        }
    }
    Ok(!total.has_failures())
}

fn handle_list(root: &Path) -> Result<()> {
    for (suite, table) in load_tables(root)? {
        for name in table.effective_names() {
            println!("{suite}/{name}");
        }
    }
    Ok(())
}
