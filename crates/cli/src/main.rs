//! Interactive REPL for the mirrordb store.
//!
//! Thin transport over [`mirror_executor::Executor`]: reads one line, hands
//! the tokens to the executor, prints the rendered result. The session is
//! single-threaded, so each command is fully applied before the next line is
//! read — a command error prints and the loop continues; only EOF or
//! `quit`/`exit` ends the process.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mirror_core::MirrorResult;
use mirror_executor::{error_to_json, wire_error, Executor, Output};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mirror",
    version,
    about = "In-memory key-value store with reverse lookup and nested transactions"
)]
struct Cli {
    /// Execute a single command and exit
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    command: Option<String>,

    /// Execute commands from a file, one per line, then exit
    #[arg(long, value_name = "FILE", conflicts_with = "command")]
    script: Option<PathBuf>,

    /// Emit JSON payloads instead of plain text
    #[arg(long)]
    json: bool,

    /// History file for interactive sessions
    #[arg(long, value_name = "FILE", default_value = ".mirror_history")]
    history: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut executor = Executor::new();

    let outcome = if let Some(line) = cli.command.as_deref() {
        run_one_shot(&mut executor, line, cli.json)
    } else if let Some(path) = cli.script.as_deref() {
        run_script(&mut executor, path, cli.json)
    } else {
        run_repl(&mut executor, &cli)
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mirror: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Tokenize a line, honoring quotes so values may contain spaces.
///
/// Unbalanced quoting falls back to plain whitespace splitting, which is the
/// protocol's native framing.
fn tokens(line: &str) -> Vec<String> {
    shlex::split(line)
        .unwrap_or_else(|| line.split_whitespace().map(str::to_owned).collect())
}

fn run_line(executor: &mut Executor, line: &str) -> MirrorResult<Output> {
    executor.execute(&tokens(line))
}

/// Render a command result the way the selected output mode wants it.
///
/// Plain text prints the protocol string, with any attached change log
/// indented underneath; JSON prints one `{result}` / `{error}` payload per
/// line.
fn render(result: &MirrorResult<Output>, json: bool) -> String {
    if json {
        return match result {
            Ok(output) => output.to_json().to_string(),
            Err(err) => error_to_json(err).to_string(),
        };
    }
    match result {
        Ok(output) => {
            let mut text = output.to_string();
            if let Some(changes) = output.changes() {
                for change in changes {
                    text.push_str("\n  ");
                    text.push_str(change);
                }
            }
            text
        }
        Err(err) => wire_error(err),
    }
}

fn run_one_shot(executor: &mut Executor, line: &str, json: bool) -> anyhow::Result<ExitCode> {
    let result = run_line(executor, line);
    println!("{}", render(&result, json));
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_script(
    executor: &mut Executor,
    path: &std::path::Path,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;

    let mut failures = 0usize;
    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let result = run_line(executor, line);
        if result.is_err() {
            failures += 1;
        }
        println!("{}", render(&result, json));
    }

    debug!(failures, "script finished");
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_repl(executor: &mut Executor, cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut editor = DefaultEditor::new().context("initializing line editor")?;
    let _ = editor.load_history(&cli.history);

    loop {
        match editor.readline("mirror> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                    break;
                }
                let _ = editor.add_history_entry(line);
                let result = run_line(executor, line);
                println!("{}", render(&result, cli.json));
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("reading input"),
        }
    }

    let _ = editor.save_history(&cli.history);
    Ok(ExitCode::SUCCESS)
}
