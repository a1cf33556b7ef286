// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

pub fn build_cli() -> Command {
    Command::new("dailytrack")
        .version(crate_version!())
        .about("DailyTrack: daily income and expense ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Database file (defaults to $DAILYTRACK_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (RUST_LOG overrides)"),
        )
        .subcommand(Command::new("init").about("Create or migrate the database"))
        .subcommand(
            Command::new("add")
                .about("Record a transaction from text like '25.50 lunch' or '25 - lunch'")
                .arg(Arg::new("text").required(true).num_args(1..).value_name("TEXT"))
                .arg(
                    Arg::new("income")
                        .long("income")
                        .action(ArgAction::SetTrue)
                        .help("Record as income instead of expense"),
                )
                .arg(Arg::new("category").long("category").short('c'))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to now")),
        )
        .subcommand(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("date").long("date").conflicts_with("month"))
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("edit")
                .about("Rewrite a stored transaction")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("type").long("type").help("income|expense"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm").about("Delete a transaction").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(clap::value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("summary")
                .about("Today's transactions with daily and monthly totals")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("export")
                .about("Export expenses to CSV")
                .subcommand(
                    Command::new("month")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM"))
                        .arg(Arg::new("dir").long("dir").default_value(".")),
                )
                .subcommand(
                    Command::new("range")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("dir").long("dir").default_value(".")),
                ),
        )
        .subcommand(
            Command::new("categories")
                .about("Show the fixed category table")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("reset").about("Delete every transaction").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm deletion"),
            ),
        )
}
