/*!
## Machine module

The interpreter engine: program memory, variables and arrays,
expression evaluation, statement dispatch, and the execution driver.

*/

/// Byte offset into program memory. Offsets stay valid while a program
/// runs; only edits move lines around, and edits only happen between
/// runs.
pub type Address = usize;

/// Default program memory, in bytes.
pub const PROGRAM_RAM: usize = 1024;
/// Default array memory, in bytes.
pub const ARRAY_RAM: usize = 1024;
/// GOSUB return-stack depth.
pub const GOSUB_DEPTH: usize = 8;
/// FOR frame-stack depth.
pub const FOR_DEPTH: usize = 8;
/// Most arrays a program can DIM.
pub const MAX_ARRAYS: usize = 8;
/// Longest accepted program-line body.
pub const MAX_LINE_LEN: usize = 255;

mod eval;
mod io;
mod rand;
mod runtime;
mod stack;
mod statement;
mod store;
mod var;

pub use io::BasicIo;
pub use rand::Rand;
pub use runtime::Runtime;
pub use stack::Stack;
pub use store::Store;
pub use var::Var;
