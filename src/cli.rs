// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue)
            .conflicts_with("json"),
    )
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Record, list and delete transactions")
        .subcommand(
            Command::new("add")
                .about("Save a transaction")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .help("income|expense"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(
            Command::new("add-batch")
                .about("Save a JSON list of draft transactions")
                .arg(Arg::new("file").long("file").required(true)),
        )
        .subcommand(
            Command::new("income")
                .about("Quick-add an income entry")
                .arg(Arg::new("amount").required(true)),
        )
        .subcommand(json_flags(
            Command::new("list").about("All transactions, newest first").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(json_flags(
            Command::new("history")
                .about("Search and filter expenses")
                .arg(Arg::new("search").long("search").short('s'))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("min").long("min"))
                .arg(Arg::new("max").long("max"))
                .arg(
                    Arg::new("range")
                        .long("range")
                        .default_value("all")
                        .help("all|7days|30days"),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .version(clap::crate_version!())
        .about("Track expenses, see where the money goes, stay under budget")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(tx_command())
        .subcommand(
            Command::new("summary")
                .about("Balance, income, expense and budget status")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(json_flags(
            Command::new("analytics").about("Budget progress and spending by category"),
        ))
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limit")
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly limit")
                        .arg(Arg::new("limit").required(true)),
                )
                .subcommand(Command::new("show").about("Show the limit and current alert")),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("list").about("List the available categories")),
        )
        .subcommand(
            Command::new("notify")
                .about("Notification inbox")
                .subcommand(json_flags(Command::new("list").about("Show notifications")))
                .subcommand(
                    Command::new("read")
                        .about("Mark a notification as read")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(Command::new("clear").about("Delete all notifications"))
                .subcommand(Command::new("unread").about("Count unread notifications")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report stored rows that fail validation"))
}
