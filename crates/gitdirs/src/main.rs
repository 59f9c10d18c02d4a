// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use clap::{Parser, Subcommand};
use gitdirs::{find_global_dirs, find_programdata_dirs, find_system_dirs, find_xdg_dirs};
use gitdirs_core::os_environment::EnvironmentApi;
use gitdirs_core::search_path::SearchPathList;
use log::LevelFilter;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Discovers git's candidate directories and reports them to the
    /// standard output.
    Find {
        /// Report a single JSON object instead of plain sections.
        #[arg(short, long)]
        json: bool,

        /// Display verbose output (defaults to warnings).
        #[arg(short, long)]
        verbose: bool,

        /// Subdirectory substituted for the executable's bin\/cmd\ segment
        /// and appended to registry install roots.
        #[arg(short, long, default_value = "etc\\")]
        subdir: String,
    },
}

#[derive(Serialize)]
struct DirsReport {
    system: SearchPathList,
    global: SearchPathList,
    xdg: SearchPathList,
    programdata: SearchPathList,
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Find {
        json: false,
        verbose: false,
        subdir: "etc\\".to_string(),
    }) {
        Commands::Find {
            json,
            verbose,
            subdir,
        } => find_and_report(json, verbose, &subdir),
    }
}

fn find_and_report(json: bool, verbose: bool, subdir: &str) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Warn
        })
        .init();

    let environment = EnvironmentApi::new();
    let mut report = DirsReport {
        system: SearchPathList::new(),
        global: SearchPathList::new(),
        xdg: SearchPathList::new(),
        programdata: SearchPathList::new(),
    };

    find_system_dirs(&environment, &mut report.system, subdir);
    find_global_dirs(&environment, &mut report.global);
    find_xdg_dirs(&environment, &mut report.xdg);
    find_programdata_dirs(&environment, &mut report.programdata);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(output) => println!("{}", output),
            Err(err) => eprintln!("failed to serialize report: {}", err),
        }
        return;
    }

    for (name, list) in [
        ("System", &report.system),
        ("Global", &report.global),
        ("XDG", &report.xdg),
        ("ProgramData", &report.programdata),
    ] {
        println!("{} directories:", name);
        println!("----------------------");
        if list.is_empty() {
            println!("(none)");
        } else {
            for entry in list.iter() {
                println!("{}", entry);
            }
        }
        println!()
    }
}
