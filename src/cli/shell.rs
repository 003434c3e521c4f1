use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
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

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

/// Environment variable switching the shell into line-by-line script mode.
pub const SCRIPT_ENV: &str = "FLEET_LEDGER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Fleet Ledger shell. Type `help` to list commands.");

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
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

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let tokens = match parse_command_line(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(trimmed.to_string());
    tracing::debug!(command = %command, args = args.len(), "dispatching");

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Completes command names, then the subcommands of the typed command.
struct CommandHelper {
    commands: Vec<(String, Vec<String>)>,
}

impl CommandHelper {
    fn new(context: &ShellContext) -> Self {
        let mut commands: Vec<(String, Vec<String>)> = context
            .command_names()
            .into_iter()
            .filter_map(|name| context.command(name))
            .map(|entry| {
                (
                    entry.name.to_ascii_lowercase(),
                    entry.subcommands.iter().map(|sub| sub.to_string()).collect(),
                )
            })
            .collect();
        commands.sort();
        commands.dedup_by(|a, b| a.0 == b.0);
        Self { commands }
    }

    fn candidates(&self, prefix: &str) -> Vec<String> {
        let words: Vec<&str> = prefix.split_whitespace().collect();
        let ends_with_space = prefix.ends_with(char::is_whitespace);
        let (position, needle) = match (words.len(), ends_with_space) {
            (0, _) => (0, ""),
            (1, false) => (0, words[0]),
            (1, true) => (1, ""),
            (2, false) => (1, words[1]),
            _ => return Vec::new(),
        };
        let needle = needle.to_ascii_lowercase();

        if position == 0 {
            return self
                .commands
                .iter()
                .map(|(name, _)| name)
                .filter(|name| name.starts_with(&needle))
                .cloned()
                .collect();
        }

        let command = words[0].to_ascii_lowercase();
        self.commands
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, subs)| {
                subs.iter()
                    .filter(|sub| sub.starts_with(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
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

        let candidates = self
            .candidates(prefix)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
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

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
