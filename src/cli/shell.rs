use std::{
    borrow::Cow,
    env,
    io::{self, BufRead},
    path::PathBuf,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::domain::{CategoryKey, Enumerated, Period};

use super::{
    commands::{report_error, CliMode, Session, COMMANDS},
    forms, output, CliError, LoopControl,
};

pub const SCRIPT_ENV: &str = "SPENDR_CLI_SCRIPT";

/// Runs the shell against the store under `base`.
///
/// With `SPENDR_CLI_SCRIPT` set, commands are read from stdin without prompts.
pub fn run_cli(base: Option<PathBuf>) -> Result<(), CliError> {
    let mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut session = Session::open(base, mode)?;
    match mode {
        CliMode::Script => run_script(&mut session),
        _ => run_interactive(&mut session),
    }
}

fn run_interactive(session: &mut Session) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new()));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Type `help` for commands, `setup` to create your profile.");

    loop {
        match editor.readline(&session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(session, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if forms::confirm("Exit shell?", true)? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(session: &mut Session) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if handle_line(session, trimmed) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

fn handle_line(session: &mut Session, line: &str) -> LoopControl {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return LoopControl::Continue;
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    match session.execute(&command, &args) {
        Ok(control) => control,
        Err(err) => {
            report_error(&err);
            LoopControl::Continue
        }
    }
}

/// Splits a line with shell quoting rules.
pub fn parse_command_line(input: &str) -> Result<Vec<String>, CliError> {
    split(input).map_err(|err| CliError::Input(format!("could not parse line: {err}")))
}

/// Completes command names first, then category and period keys.
struct CommandHelper {
    commands: Vec<&'static str>,
    arguments: Vec<&'static str>,
}

impl CommandHelper {
    fn new() -> Self {
        let mut commands = COMMANDS.to_vec();
        commands.sort_unstable();
        let mut arguments = CategoryKey::keys();
        arguments.extend(Period::keys());
        Self {
            commands,
            arguments,
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let first_word = prefix[..start].trim().is_empty();
        let pool = if first_word {
            &self.commands
        } else {
            &self.arguments
        };

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = pool
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
