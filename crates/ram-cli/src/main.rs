mod common;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use ram_vm::{Machine, MachineConfig, UninitPolicy, WriterSink};

use crate::common::{render_error, TerminalSink};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Uninit {
    /// Reading an unwritten cell is an error
    Fail,
    /// Unwritten cells read as 0
    Zero,
}

impl From<Uninit> for UninitPolicy {
    fn from(u: Uninit) -> Self {
        match u {
            Uninit::Fail => UninitPolicy::Fail,
            Uninit::Zero => UninitPolicy::Zero,
        }
    }
}

/// Run a Random-Access-Machine program and print its output tape.
#[derive(Parser, Debug)]
#[command(name = "ram", version, about)]
struct Cli {
    /// Program file, one instruction per line
    program: PathBuf,

    /// Input tape values, separated by spaces or commas
    #[arg(short = 'i', long = "input", conflicts_with = "input_file")]
    input: Option<String>,

    /// Read the input tape from a file
    #[arg(short = 'f', long = "input-file")]
    input_file: Option<PathBuf>,

    /// Trace every executed instruction
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// What reading an unwritten cell does; defaults to $RAM_UNINIT or fail
    #[arg(long = "uninit", value_enum)]
    uninit: Option<Uninit>,

    /// Write the trace to a file instead of the terminal
    #[arg(long = "trace")]
    trace: Option<PathBuf>,

    /// Machine name shown in the trace
    #[arg(long = "name")]
    name: Option<String>,

    /// Only load and validate the program
    #[arg(long = "check", default_value_t = false)]
    check: bool,
}

fn fail(msg: String) -> ExitCode {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = MachineConfig::from_env();
    if let Some(u) = cli.uninit {
        config.uninit = u.into();
    }
    config.verbose |= cli.verbose;
    let mut machine = Machine::with_config(config);

    match &cli.trace {
        Some(path) => match File::create(path) {
            Ok(file) => machine.set_trace_sink(WriterSink::new(file)),
            Err(e) => return fail(format!("Failed to create {}: {}", path.display(), e)),
        },
        None => {
            let verbose = machine.config().verbose;
            machine.set_trace_sink(TerminalSink { verbose });
        }
    }
    if let Some(name) = cli.name.clone() {
        machine.set_name(name);
    }

    let src = match fs::read_to_string(&cli.program) {
        Ok(s) => s,
        Err(e) => return fail(format!("Failed to read {}: {}", cli.program.display(), e)),
    };
    if let Err(e) = machine.load_code(&src) {
        render_error("Load error", &src, &e);
        return ExitCode::FAILURE;
    }
    if cli.check {
        println!("{} {} instructions, {} labels", "ok:".green().bold(), machine.program().len(), machine.program().labels().len());
        return ExitCode::SUCCESS;
    }

    let input_text = match (&cli.input, &cli.input_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => return fail(format!("Failed to read {}: {}", path.display(), e)),
        },
        (None, None) => String::new(),
    };
    if let Err(e) = machine.load_input_text(&input_text) {
        return fail(e.to_string());
    }

    match machine.run() {
        Ok(output) => {
            println!("{}", join(output.iter()));
            ExitCode::SUCCESS
        }
        Err(failure) => {
            render_error("Runtime error", &src, &failure.error);
            if !failure.partial.is_empty() {
                eprintln!("{} {}", "partial output:".bright_black(), join(failure.partial.iter()));
            }
            ExitCode::FAILURE
        }
    }
}

fn join<'a>(values: impl Iterator<Item = &'a i64>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}
