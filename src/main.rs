// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use dailytrack::{cli, commands, db, logging, store::TransactionStore, tracker::Tracker};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_flag("verbose"));

    let path = db::db_path(matches.get_one::<String>("db").map(String::as_str))?;
    let mut tracker = Tracker::new(TransactionStore::new(db::Database::at(&path)));
    let report = tracker.initialize()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database ready at {}", path.display());
            if report.migrated_rows > 0 {
                println!("Migrated {} legacy expenses", report.migrated_rows);
            }
            if report.legacy_retained {
                println!("Legacy expenses table could not be migrated and was left in place");
            }
        }
        Some((name @ ("add" | "list" | "edit" | "rm" | "reset"), sub)) => {
            commands::transactions::handle(&mut tracker, name, sub)?
        }
        Some(("summary", sub)) => commands::reports::handle(&mut tracker, sub)?,
        Some(("export", sub)) => {
            if commands::exporter::handle(tracker.store(), sub)?.is_none() {
                cli::build_cli().print_help()?;
                println!();
            }
        }
        Some(("categories", sub)) => commands::categories::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    tracker.store().close()?;
    Ok(())
}
