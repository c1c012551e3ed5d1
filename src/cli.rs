// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("budgetwise")
        .about("Personal expense tracking, categorization and spending forecasts")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database if missing and print its path"))
        .subcommand(
            Command::new("session")
                .about("Register, login and manage the active session")
                .subcommand(
                    Command::new("register")
                        .about("Create an account")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Login and store a session token")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Clear the stored session"))
                .subcommand(Command::new("whoami").about("Show the active session user")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction; the category is assigned from the description")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Non-negative; direction comes from --type"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List recent transactions, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("10"),
                        )
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("The fixed category taxonomy")
                .subcommand(Command::new("list").about("Show categories and their trigger keywords")),
        )
        .subcommand(
            Command::new("import").about("Bulk import").subcommand(
                Command::new("transactions")
                    .about("Import a CSV with Date, Description, Amount and Type columns")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("report")
                .about("Spending reports")
                .subcommand(
                    Command::new("categories")
                        .about("Expense totals by category")
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("monthly")
                        .about("Income and expense totals per month")
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                ),
        )
        .subcommand(
            Command::new("forecast").about("Forecast future spending").subcommand(
                Command::new("run")
                    .about("Fit the trend model and project spending ahead")
                    .arg(
                        Arg::new("path")
                            .long("path")
                            .help("Forecast a CSV (Date, Amount and optional Category) instead of stored transactions"),
                    )
                    .arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(u32).range(1..=12))
                            .default_value("3")
                            .help("Horizon, counted as 30-day blocks"),
                    )
                    .arg(
                        Arg::new("budget")
                            .long("budget")
                            .help("Budget to compare the end of the forecast against"),
                    )
                    .arg(
                        Arg::new("rent-change")
                            .long("rent-change")
                            .allow_hyphen_values(true)
                            .help("What-if percentage applied to the forecast, e.g. 10 or -5"),
                    )
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize))
                            .default_value("14")
                            .help("Rows of the series tail to print"),
                    )
                    .arg(json_flag())
                    .arg(jsonl_flag()),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit JSON instead of a table")
}

fn jsonl_flag() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .action(ArgAction::SetTrue)
        .help("Emit JSON lines instead of a table")
}
