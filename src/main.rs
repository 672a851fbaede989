// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use spendlog::clock::SystemClock;
use spendlog::config::{Config, DEFAULT_LOG_FILTER};
use spendlog::{cli, commands, db};

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init(&config)?;
    let clock = SystemClock;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(&config)?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, &clock, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, &clock, sub)?,
        Some(("analytics", sub)) => commands::analytics::handle(&conn, &clock, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, &clock, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("notify", sub)) => commands::notifications::handle(&conn, &clock, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
