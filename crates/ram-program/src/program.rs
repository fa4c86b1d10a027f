//! Ordered instruction store with stable positions.

use ram_syntax::error::Result;
use ram_syntax::Instruction;

use crate::labels::LabelTable;

/// Index of an instruction inside a [`Program`]. Used both as the engine's
/// cursor and as a jump target.
pub type Position = usize;

#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    // 1-based source line per instruction, when loaded from text
    lines: Vec<Option<usize>>,
    labels: LabelTable,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instruction and registers the label it declares, if any.
    ///
    /// A duplicate label fails with `DuplicateLabel` and the instruction is not
    /// kept.
    pub fn append(&mut self, instruction: Instruction) -> Result<Position> {
        self.push(instruction, None)
    }

    /// Same as [`Program::append`], remembering the source line it came from.
    pub fn append_from_line(&mut self, instruction: Instruction, line: usize) -> Result<Position> {
        self.push(instruction, Some(line)).map_err(|e| e.at_line(line))
    }

    fn push(&mut self, instruction: Instruction, line: Option<usize>) -> Result<Position> {
        let pos = self.instructions.len();
        if let Some(label) = &instruction.label {
            self.labels.register(label, pos)?;
        }
        self.instructions.push(instruction);
        self.lines.push(line);
        Ok(pos)
    }

    pub fn register(&mut self, label: &str, pos: Position) -> Result<()> {
        self.labels.register(label, pos)
    }

    pub fn resolve(&self, label: &str) -> Result<Position> {
        self.labels.resolve(label)
    }

    pub fn get(&self, pos: Position) -> Option<&Instruction> {
        self.instructions.get(pos)
    }

    /// Source line of the instruction at `pos`, if it was loaded from text.
    pub fn line_of(&self, pos: Position) -> Option<usize> {
        self.lines.get(pos).copied().flatten()
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
        self.lines.clear();
        self.labels.clear();
    }
}
