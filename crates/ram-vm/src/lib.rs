//! RAM VM: executes decoded RAM programs.
//!
//! A [`Machine`] owns one program, its memory, an input tape and an output
//! tape. Load code and input, then [`Machine::run`] to get the output tape:
//!
//! ```rust
//! use ram_vm::Machine;
//!
//! let mut machine = Machine::new();
//! machine.load_code("READ(1)\nLOAD(1)\nMULT(=2)\nWRITE(0)\nHALT()").unwrap();
//! machine.load_input([21]);
//! assert_eq!(machine.run().unwrap().to_vec(), vec![42]);
//! ```

pub mod config;
pub mod machine;
pub mod memory;
pub mod resolve;
pub mod tape;
pub mod trace;

pub use config::{MachineConfig, UninitPolicy};
pub use machine::{Failure, Machine, MachineState};
pub use memory::{Address, Memory, ACCUMULATOR};
pub use tape::Tape;
pub use trace::{TraceLevel, TraceSink, WriterSink};
