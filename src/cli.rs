// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .short('m')
            .value_parser(value_parser!(u32).range(1..=12))
            .help("Month (1-12), defaults to the current month"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .short('y')
            .value_parser(value_parser!(i32))
            .help("Year, defaults to the current year"),
    )
}

fn output_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue))
}

fn page_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("page")
            .long("page")
            .short('p')
            .value_parser(value_parser!(usize))
            .default_value("1"),
    )
}

fn expense_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("category")
            .long("category")
            .short('c')
            .required(required),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .required(required)
            .help("Whole units; separators are ignored (e.g. 1.250.000)"),
    )
    .arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .required(required),
    )
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .about("Expenses, budgets and category breakdowns from the terminal")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("expense")
                .about("List and edit expenses")
                .subcommand(output_args(page_arg(period_args(
                    Command::new("list").about("Expenses of a month with totals and budget"),
                ))))
                .subcommand(expense_fields(
                    period_args(Command::new("add").about("Record an expense")),
                    true,
                ))
                .subcommand(expense_fields(
                    period_args(
                        Command::new("edit")
                            .about("Change an expense")
                            .arg(Arg::new("id").required(true)),
                    ),
                    false,
                ))
                .subcommand(page_arg(period_args(
                    Command::new("rm")
                        .about("Delete an expense")
                        .arg(Arg::new("id").required(true)),
                ))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets")
                .subcommand(output_args(page_arg(
                    Command::new("list").about("All budgets"),
                )))
                .subcommand(
                    Command::new("set")
                        .about("Create or replace the budget of a month")
                        .arg(Arg::new("month_year").required(true).help("MM/YYYY"))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(output_args(period_args(
                    Command::new("status").about("Spending against the budget of a month"),
                ))),
        )
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(output_args(Command::new("list")))
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(period_args(
                    Command::new("rm")
                        .about("Delete a category and hide its expenses")
                        .arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(
            Command::new("chart")
                .about("Spending per category")
                .subcommand(output_args(period_args(
                    Command::new("show")
                        .about("Breakdown with colours and a proportional bar")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("month")
                                .help("Every month of the year instead of one month"),
                        ),
                )))
                .subcommand(
                    Command::new("color")
                        .about("Pick the colour of a category")
                        .arg(Arg::new("category").required(true))
                        .arg(
                            Arg::new("color")
                                .help("#rrggbb")
                                .required_unless_present("reset"),
                        )
                        .arg(
                            Arg::new("reset")
                                .long("reset")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("color"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(period_args(
                Command::new("expenses")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            )),
        )
        .subcommand(
            Command::new("session")
                .about("Which user the commands act for")
                .subcommand(
                    Command::new("use").arg(
                        Arg::new("user_id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(Command::new("show"))
                .subcommand(Command::new("clear")),
        )
        .subcommand(
            Command::new("config")
                .about("Service URLs and client settings")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("show")),
        )
}
