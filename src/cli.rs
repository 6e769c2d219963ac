// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to show (defaults to the current month)")
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(clap::crate_version!())
        .about("Personal expense and income tracker")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("other")
                                .help("Built-in key (food, transport, ...) or custom category name"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD or 'YYYY-MM-DD HH:MM'"),
                        )
                        .arg(Arg::new("merchant").long("merchant"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("merchant").long("merchant"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Record and manage income")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("source").long("source").default_value("salary"))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Unified expense and income list")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .help("all | income | expense"),
                        )
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .action(ArgAction::Append),
                        )
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append))
                        .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("min").long("min"))
                        .arg(Arg::new("max").long("max"))
                        .arg(Arg::new("query").long("query").help("Match merchant or note"))
                        .arg(
                            Arg::new("pages")
                                .long("pages")
                                .value_parser(value_parser!(usize))
                                .default_value("1")
                                .help("Number of pages to load"),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Monthly totals, breakdown and spending pace")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("category")
                .about("Manage custom categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color").value_name("#RRGGBB")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("tag")
                .about("Manage tags")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color").value_name("#RRGGBB")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").long("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(month_arg().required(true))
                    .arg(
                        Arg::new("until")
                            .long("until")
                            .value_name("YYYY-MM")
                            .help("Last month to include (defaults to --month)"),
                    )
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the data for problems"))
        .subcommand(json_flags(
            Command::new("stats").about("Record counts and database details"),
        ))
}
