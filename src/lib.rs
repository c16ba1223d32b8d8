//! Virtual machine for the IPPcode23 three-address instruction language.
//!
//! The crate is deliberately free of XML and file plumbing: a [`Program`] is
//! plain data (an ordered instruction vector plus a label table) and the
//! [`Machine`] reads its `READ` channel from any `BufRead` and writes `WRITE`
//! payloads to any `Write`, so whole programs run in memory. The `ippint`
//! frontend crate builds programs from the XML source format and provides the
//! command line binary.

pub mod error;
pub mod frame;
pub mod io;
pub mod literal;
pub mod machine;
pub mod opcode;
pub mod program;
pub mod value;

pub use crate::error::Fault;
pub use crate::frame::{Frame, FrameStore, FrameTag};
pub use crate::io::LineInput;
pub use crate::machine::Machine;
pub use crate::opcode::Opcode;
pub use crate::program::{Instruction, LiteralKind, Operand, Program};
pub use crate::value::Value;
