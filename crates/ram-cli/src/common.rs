use owo_colors::OwoColorize;
use ram_syntax::{Error, ErrorKind};
use ram_vm::{TraceLevel, TraceSink};

pub fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.kind.to_string().red());
    if let Some(line) = err.line {
        match err.col {
            Some(col) => eprintln!("  --> line {}, column {}", line, col),
            None => eprintln!("  --> line {}", line),
        }
        if let Some(src_line) = source.lines().nth(line - 1) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);
            if let Some(col) = err.col {
                let mut marker = " ".repeat(line_num_str.len() + col - 1);
                marker.push('^');
                eprintln!("{}{}", marker.red(), " error here".red());
            }
            eprintln!("     |");
        }
    }
    provide_error_suggestions(&err.kind);
}

pub fn provide_error_suggestions(kind: &ErrorKind) {
    match kind {
        ErrorKind::UnknownOpcode(_) => {
            eprintln!("{}", "Help: Opcodes are upper case and one of:".yellow());
            eprintln!("    {}", "LOAD STORE ADD SUB MULT DIV READ WRITE JUMP JGTZ JZERO HALT".bright_black());
        }
        ErrorKind::MalformedInstruction(_) => {
            eprintln!("{}", "Help: Instructions look like OPCODE(ARG) with an optional label.".yellow());
            eprintln!("    {}", "Example: LOAD(=5) START, STORE(*2), JGTZ(LOOP)".bright_black());
        }
        ErrorKind::DuplicateLabel(_) => {
            eprintln!("{}", "Help: Each label may be declared on one line only.".yellow());
        }
        ErrorKind::LabelNotFound(_) => {
            eprintln!("{}", "Help: Declare the label after the instruction it marks.".yellow());
            eprintln!("    {}", "Example: JZERO(END) LOOP".bright_black());
        }
        ErrorKind::IncompatibleAddressingMode { .. } => {
            eprintln!("{}", "Help: STORE and READ need an address, not a value (drop the '=').".yellow());
        }
        ErrorKind::UninitializedCellAccess(_) => {
            eprintln!("{}", "Help: Write the cell before reading it, or run with --uninit zero.".yellow());
        }
        ErrorKind::InputExhausted => {
            eprintln!("{}", "Help: The program reads more values than the input tape holds.".yellow());
            eprintln!("    {}", "Pass values with --input \"3 1 4\" or --input-file".bright_black());
        }
        ErrorKind::DivisionByZero => {
            eprintln!("{}", "Help: Check the divisor with JZERO before dividing.".yellow());
        }
        ErrorKind::NegativeAddress(_) => {
            eprintln!("{}", "Help: Memory addresses start at 0.".yellow());
        }
        ErrorKind::ArithmeticOverflow | ErrorKind::MalformedInput(_) => {}
    }
}

/// Writes trace events to stderr, coloured by level. Unless `verbose`, only
/// warnings get through.
pub struct TerminalSink {
    pub verbose: bool,
}

impl TraceSink for TerminalSink {
    fn emit(&mut self, level: TraceLevel, message: &str) {
        if !self.verbose && level != TraceLevel::Warning {
            return;
        }
        match level {
            TraceLevel::Detail => eprintln!("{}", message.bright_black()),
            TraceLevel::Info => eprintln!("{}", message.cyan()),
            TraceLevel::Warning => eprintln!("{} {}", "warning:".yellow().bold(), message.yellow()),
        }
    }
}
