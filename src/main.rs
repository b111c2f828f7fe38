//! # theta
//!
//! An interpreter for ThetaCode, a tiny declarative language for describing chatbots:
//! which bots exist, what platform they live on, and what they say back.
//!
//! ## Usage
//!
//! - Run a program: `theta bots.tc`
//! - Run a buffer saved in the workspace: `theta src/main.tc`
//! - Reject unknown lines and undeclared bots: `theta --strict bots.tc`
//! - Manage the workspace: `theta --list`, `theta --new src/main.tc`, `theta --delete-all`
//! - Interactive shell: `theta`
//!
//! ## Language
//!
//! ```text
//! create bot "Helper" platform "telegram"
//! on Helper receives "hi" respond with "hello"
//! print "ready"
//! ```

use clap::Parser as ClapParser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use thetacode::buffer::TextBuffer;
use thetacode::error::StorageError;
use thetacode::interpreter::Interpreter;
use thetacode::outcome::Outcome;
use thetacode::output::OutputChannel;
use thetacode::parser;
use thetacode::workspace::{self, Workspace};
use tracing_subscriber::EnvFilter;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for the theta tool.
#[derive(ClapParser)]
#[command(name = "theta")]
#[command(version = PKG_VERSION)]
#[command(about = "Run ThetaCode chatbot descriptions", long_about = None)]
struct Cli {
    /// Program to run: a file on disk, or a buffer path in the workspace
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Fail on unrecognized statements and on triggers for undeclared bots
    #[arg(long)]
    strict: bool,

    /// Prefix each output line with the local time
    #[arg(long)]
    timestamps: bool,

    /// Show the workspace file tree
    #[arg(short, long)]
    list: bool,

    /// Create an empty buffer in the workspace
    #[arg(long, value_name = "PATH")]
    new: Option<String>,

    /// Delete every buffer in the workspace
    #[arg(long)]
    delete_all: bool,
}

/// Entry point for the CLI tool.
fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let workspace = Workspace::discover();
    let interpreter = if cli.strict {
        Interpreter::strict()
    } else {
        Interpreter::new()
    };

    if cli.delete_all {
        if let Err(e) = workspace.delete_all() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        show(cli.timestamps, "All files deleted successfully");
        return;
    }

    if let Some(path) = cli.new {
        if let Err(e) = workspace.create_new(&path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        show(cli.timestamps, &format!("Created {}", path));
        return;
    }

    if cli.list {
        match workspace.tree() {
            Ok(tree) => show(cli.timestamps, &workspace::render_tree(&tree)),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match cli.file {
        Some(file) => {
            let source = match load_source(&workspace, &file) {
                Ok(source) => source,
                Err(message) => {
                    eprintln!("Error: {}", message);
                    std::process::exit(1);
                }
            };

            if !run_program(&interpreter, &source, Some(&file), cli.timestamps) {
                std::process::exit(1);
            }
        }
        None => run_repl(&interpreter, &workspace, cli.timestamps),
    }
}

/// Read a program from disk, falling back to the workspace store.
fn load_source(workspace: &Workspace, file: &str) -> Result<String, String> {
    let path = PathBuf::from(file);
    if path.is_file() {
        return fs::read_to_string(&path)
            .map_err(|e| format!("Error reading file '{}': {}", path.display(), e));
    }

    match workspace.read(file) {
        Ok(source) => Ok(source),
        // Paths the workspace cannot hold are simply missing files.
        Err(StorageError::InvalidPath(_)) => {
            Err(StorageError::NotFound(file.to_string()).to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Run a program and report its outcome. Returns whether it succeeded.
///
/// # Arguments
/// * `source` - The program text.
/// * `filename` - Optional filename for better error messages.
fn run_program(
    interpreter: &Interpreter,
    source: &str,
    filename: Option<&str>,
    timestamps: bool,
) -> bool {
    let program = parser::split_program(source);
    let result = interpreter.execute(&program);
    let failed_line = result.as_ref().err().map(|halt| halt.error.line());
    let outcome = Outcome::from(result);

    show_trace(timestamps, outcome.trace());

    match &outcome {
        Outcome::Success { .. } => true,
        Outcome::Failure { message, .. } => {
            print_run_error(message, source, filename, failed_line);
            false
        }
    }
}

/// Print a failure message with the offending source line.
fn print_run_error(message: &str, source: &str, filename: Option<&str>, line: Option<usize>) {
    let file_prefix = filename.map(|f| format!("{}: ", f)).unwrap_or_default();
    eprintln!("Error: {}{}", file_prefix, message);

    if let Some(line) = line
        && let Some(line_content) = get_line(source, line)
    {
        eprintln!();
        eprintln!("  {} | {}", line, line_content);
        eprintln!(
            "  {} | {}",
            " ".repeat(line.to_string().len()),
            "^".repeat(line_content.trim().len().max(1))
        );
    }
}

/// Get a specific line from source code.
fn get_line(source: &str, line_num: usize) -> Option<String> {
    source
        .lines()
        .nth(line_num.saturating_sub(1))
        .map(|s| s.to_string())
}

fn show(timestamps: bool, payload: &str) {
    let mut channel = OutputChannel::new(io::stdout().lock(), timestamps);
    if let Err(e) = channel.show(payload) {
        eprintln!("Error writing output: {}", e);
    }
}

/// Print trace entries one per line, keeping empty entries.
fn show_trace(timestamps: bool, trace: &[String]) {
    let mut channel = OutputChannel::new(io::stdout().lock(), timestamps);
    if let Err(e) = channel.show_lines(trace.iter().map(String::as_str)) {
        eprintln!("Error writing output: {}", e);
    }
}

/// Start an interactive shell that edits a program buffer and runs it on demand.
fn run_repl(interpreter: &Interpreter, workspace: &Workspace, timestamps: bool) {
    println!("Theta Shell {}", PKG_VERSION);
    println!("Type statements to add them, then .run to execute.");
    println!("Other commands: .show .clear .save PATH .load PATH, 'exit' or Ctrl+D to quit\n");

    let mut buffer = TextBuffer::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => {
                // EOF (Ctrl+D)
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {
                let input = input.trim();

                match input {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    }
                    "" => continue,
                    ".run" => {
                        if buffer.is_empty() {
                            println!("Buffer is empty.");
                        } else {
                            run_program(interpreter, buffer.get(), None, timestamps);
                        }
                    }
                    ".show" => print!("{}", buffer.get()),
                    ".clear" => buffer.clear(),
                    _ => {
                        if let Some(path) = input.strip_prefix(".save ") {
                            match workspace.create(path.trim(), buffer.get()) {
                                Ok(()) => println!("Saved {}", path.trim()),
                                Err(e) => eprintln!("Error: {}", e),
                            }
                        } else if let Some(path) = input.strip_prefix(".load ") {
                            match workspace.read(path.trim()) {
                                Ok(content) => buffer.set(content),
                                Err(e) => eprintln!("Error: {}", e),
                            }
                        } else {
                            buffer.append_line(input);
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}
