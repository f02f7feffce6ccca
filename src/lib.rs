//! # 1K BASIC
//!
//! A minimal BASIC of the ZX80 school, sized for hosts that provide
//! nothing but character I/O.
//! ```text
//! 1K BASIC
//! READY.
//! █
//! ```
//!
//! Programs live in a fixed 1K byte slab exactly as typed; there is no
//! tokenizer and no heap. Integers are the only value type, variables
//! are the letters A through Z, and arrays come from a second fixed
//! slab. The engine reaches the outside world through the
//! [`mach::BasicIo`] trait — one byte out, one line in, and a break
//! poll — so the same core runs behind a serial port, a socket, or the
//! terminal front-end in this crate.
//!
//! Everything else, from the program store to the FOR stack, is owned
//! by [`mach::Runtime`]. Feed it lines:
//!
//! ```text
//! 10 FOR I=1 TO 3
//! 20 PRINT I
//! 30 NEXT I
//! RUN
//! ```

pub mod lang;
pub mod mach;
