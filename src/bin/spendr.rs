use std::{env, process};

use spendr_budget::{
    cli::{self, commands, CliError, CliMode, Session},
    init,
};

fn main() {
    init();

    if let Err(err) = run() {
        commands::report_error(&err);
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        process::exit(1);
    };

    match command.to_lowercase().as_str() {
        "shell" => cli::run_cli(None),
        "help" | "--help" | "-h" => {
            commands::print_help();
            Ok(())
        }
        command => {
            let mut session = Session::open(None, CliMode::Single)?;
            let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
            session.execute(command, &rest).map(|_| ())
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: spendr <command> [args]\n\
         Run `spendr help` for the command list or `spendr shell` for the interactive shell."
    );
}
