//! RAM execution engine.

use std::fmt;

use ram_program::{Position, Program};
use ram_syntax::error::{error, Error, ErrorKind, Result};
use ram_syntax::{Instruction, Opcode};

use crate::config::MachineConfig;
use crate::memory::Memory;
use crate::resolve;
use crate::tape::Tape;
use crate::trace::{TraceLevel, TraceSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineState {
    /// Loaded (or rewound) but not yet stepped.
    Ready,
    Running,
    Halted,
    Failed(Error),
}

impl MachineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MachineState::Halted | MachineState::Failed(_))
    }
}

/// A failed run: the error plus whatever was written before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub error: Error,
    pub partial: Tape,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (partial output: {})", self.error, self.partial)
    }
}

impl std::error::Error for Failure {}

/// Where the cursor goes after an instruction.
enum Flow {
    Next,
    Goto(Position),
    Halt,
}

pub struct Machine {
    config: MachineConfig,
    program: Program,
    memory: Memory,
    input: Tape,
    output: Tape,
    cursor: Position,
    state: MachineState,
    executed: u64,
    sink: Option<Box<dyn TraceSink>>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            memory: Memory::new(config.uninit),
            config,
            program: Program::new(),
            input: Tape::new(),
            output: Tape::new(),
            cursor: 0,
            state: MachineState::Ready,
            executed: 0,
            sink: None,
        }
    }

    // --- configuration ---

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.trace(TraceLevel::Info, || format!("Machine name set {}", name));
        self.config.name = Some(name);
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Whether an event at `level` would reach a sink.
    fn traces(&self, level: TraceLevel) -> bool {
        self.sink.is_some() && (level != TraceLevel::Detail || self.config.verbose)
    }

    fn trace(&mut self, level: TraceLevel, message: impl FnOnce() -> String) {
        if !self.traces(level) {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(level, &message());
        }
    }

    // --- loading ---

    /// Replace the program with `src`. Memory, labels and run state are reset.
    ///
    /// On failure the machine is left holding an empty program.
    pub fn load_code(&mut self, src: &str) -> Result<()> {
        self.install(ram_parser::parse_program(src))
    }

    pub fn load_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.install(ram_parser::parse_lines(lines))
    }

    /// Install an already built program.
    pub fn load_program(&mut self, program: Program) {
        self.program = program;
        self.rewind();
        self.trace(TraceLevel::Info, || "Code set".to_string());
        let count = self.program.len();
        self.trace(TraceLevel::Detail, || format!("Instructions recognized {}", count));
    }

    fn install(&mut self, parsed: Result<Program>) -> Result<()> {
        match parsed {
            Ok(program) => {
                self.load_program(program);
                Ok(())
            }
            Err(e) => {
                self.program.clear();
                self.rewind();
                self.trace(TraceLevel::Info, || format!("Code rejected: {}", e));
                Err(e)
            }
        }
    }

    pub fn load_input(&mut self, values: impl IntoIterator<Item = i64>) {
        self.input = values.into_iter().collect();
        if self.traces(TraceLevel::Info) {
            let tape = self.input.to_string();
            self.trace(TraceLevel::Info, || format!("Input set {}", tape));
        }
    }

    /// Load the input tape from whitespace and/or comma separated integers.
    pub fn load_input_text(&mut self, text: &str) -> Result<()> {
        let values = ram_parser::parse_tape(text)?;
        self.load_input(values);
        Ok(())
    }

    // --- execution ---

    /// Cursor back to the first instruction with empty memory and output.
    /// The input tape is left as is.
    pub fn rewind(&mut self) {
        self.memory.clear();
        self.output.clear();
        self.cursor = 0;
        self.executed = 0;
        self.state = MachineState::Ready;
    }

    /// Back to a freshly constructed machine, keeping the configuration.
    pub fn reset(&mut self) {
        self.program.clear();
        self.input.clear();
        self.rewind();
    }

    /// Execute from the first instruction until HALT, the end of the
    /// program, or an error.
    pub fn run(&mut self) -> std::result::Result<Tape, Failure> {
        self.rewind();
        let banner = match &self.config.name {
            Some(name) => format!("RUNNING {}", name),
            None => "RUNNING".to_string(),
        };
        self.trace(TraceLevel::Detail, || banner);

        let outcome = loop {
            match self.step() {
                Ok(MachineState::Halted) => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(e),
            }
        };

        let executed = self.executed;
        let output = self.output.to_string();
        match outcome {
            Ok(()) => {
                self.trace(TraceLevel::Detail, || "PROGRAM FINISHED".to_string());
                self.trace(TraceLevel::Detail, || format!("Instructions executed {}", executed));
                self.trace(TraceLevel::Info, || format!("Output: {}", output));
                Ok(self.output.clone())
            }
            Err(error) => {
                self.trace(TraceLevel::Detail, || format!("Instructions executed {}", executed));
                self.trace(TraceLevel::Info, || format!("Output: {}", output));
                Err(Failure { error, partial: self.output.clone() })
            }
        }
    }

    /// Execute a single instruction and return the resulting state.
    ///
    /// Stepping a halted machine is a no-op; stepping a failed one returns its
    /// error again.
    pub fn step(&mut self) -> Result<MachineState> {
        match &self.state {
            MachineState::Halted => return Ok(MachineState::Halted),
            MachineState::Failed(e) => return Err(e.clone()),
            MachineState::Ready | MachineState::Running => {}
        }

        let Some(instr) = self.program.get(self.cursor).cloned() else {
            // ran off the end: implicit halt
            self.state = MachineState::Halted;
            return Ok(MachineState::Halted);
        };

        self.state = MachineState::Running;
        self.executed += 1;
        let result = self.execute(&instr);

        for addr in self.memory.take_defaulted() {
            self.trace(TraceLevel::Warning, || format!("Reaching uninitialized cell {}, defaulted to 0", addr));
        }

        match result {
            Ok(flow) => {
                if self.traces(TraceLevel::Detail) {
                    let line = format!("{:>3}. {:<24} -> {}", self.executed, instr.to_string(), self.memory);
                    self.trace(TraceLevel::Detail, || line);
                }
                match flow {
                    Flow::Next => self.cursor += 1,
                    Flow::Goto(pos) => self.cursor = pos,
                    Flow::Halt => {
                        self.cursor = self.program.len();
                        self.state = MachineState::Halted;
                    }
                }
                if self.cursor >= self.program.len() {
                    self.state = MachineState::Halted;
                }
                Ok(self.state.clone())
            }
            Err(e) => {
                let e = match self.program.line_of(self.cursor) {
                    Some(line) => e.at_line(line),
                    None => e,
                };
                let at = self.cursor;
                self.trace(TraceLevel::Warning, || format!("Stopped at instruction {}: {}", at, e));
                self.state = MachineState::Failed(e.clone());
                Err(e)
            }
        }
    }

    fn execute(&mut self, instr: &Instruction) -> Result<Flow> {
        match instr.opcode {
            Opcode::Load => {
                let v = resolve::operand(instr, &mut self.memory)?;
                self.memory.set_accumulator(v);
            }
            Opcode::Store => {
                let dest = resolve::destination(instr, &mut self.memory)?;
                let acc = self.memory.accumulator();
                self.memory.write(dest, acc);
            }
            Opcode::Add | Opcode::Sub | Opcode::Mult | Opcode::Div => {
                let v = resolve::operand(instr, &mut self.memory)?;
                let acc = self.memory.accumulator();
                let result = match instr.opcode {
                    Opcode::Add => acc.checked_add(v),
                    Opcode::Sub => acc.checked_sub(v),
                    Opcode::Mult => acc.checked_mul(v),
                    _ if v == 0 => return error(ErrorKind::DivisionByZero),
                    _ => acc.checked_div(v),
                };
                match result {
                    Some(r) => self.memory.set_accumulator(r),
                    None => return error(ErrorKind::ArithmeticOverflow),
                }
            }
            Opcode::Read => {
                if self.input.is_empty() {
                    return error(ErrorKind::InputExhausted);
                }
                let dest = resolve::destination(instr, &mut self.memory)?;
                if let Some(v) = self.input.pop() {
                    self.memory.write(dest, v);
                }
            }
            Opcode::Write => {
                let v = resolve::operand(instr, &mut self.memory)?;
                self.output.push(v);
            }
            Opcode::Jump => {
                let label = resolve::target(instr)?;
                return Ok(Flow::Goto(self.program.resolve(label)?));
            }
            Opcode::Jgtz | Opcode::Jzero => {
                let label = resolve::target(instr)?;
                let acc = self.memory.accumulator();
                let taken = if instr.opcode == Opcode::Jgtz { acc > 0 } else { acc == 0 };
                if taken {
                    return Ok(Flow::Goto(self.program.resolve(label)?));
                }
            }
            Opcode::Halt => {
                resolve::target(instr)?;
                return Ok(Flow::Halt);
            }
        }
        Ok(Flow::Next)
    }

    // --- inspection ---

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn accumulator(&self) -> i64 {
        self.memory.accumulator()
    }

    pub fn input(&self) -> &Tape {
        &self.input
    }

    pub fn output(&self) -> &Tape {
        &self.output
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Instructions executed since the last rewind.
    pub fn executed(&self) -> u64 {
        self.executed
    }
}
