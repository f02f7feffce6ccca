use super::io::{self, BasicIo};
use super::rand::Rand;
use super::stack::Stack;
use super::statement::Flow;
use super::store::Store;
use super::var::Var;
use super::{Address, ARRAY_RAM, FOR_DEPTH, GOSUB_DEPTH, MAX_LINE_LEN, PROGRAM_RAM};
use crate::error;
use crate::lang::{Cursor, Error, ErrorCode};

type Result<T> = std::result::Result<T, Error>;

/// One FOR in flight: induction variable, terminal value, step, and the
/// record to re-enter on NEXT.
#[derive(Debug, Clone, Copy)]
pub(super) struct ForFrame {
    pub(super) var: usize,
    pub(super) end: i32,
    pub(super) step: i32,
    pub(super) body: Address,
}

/// ## The interpreter
///
/// Owns program memory, the variable bank, both control stacks, the
/// continuation slot, and the PRNG. The host is reached only through
/// the borrowed [`BasicIo`] adapter. All storage is reserved at
/// construction; nothing allocates once a program is running.
pub struct Runtime<'io> {
    pub(super) store: Store,
    pub(super) vars: Var,
    pub(super) gosub: Stack<Address>,
    pub(super) fors: Stack<ForFrame>,
    pub(super) cont: Option<Address>,
    pub(super) rand: Rand,
    pub(super) io: &'io mut dyn BasicIo,
}

impl<'io> Runtime<'io> {
    /// An engine with the stock 1K program slab and 1K array slab.
    pub fn new(io: &'io mut dyn BasicIo) -> Runtime<'io> {
        Runtime::with_ram(PROGRAM_RAM, ARRAY_RAM, io)
    }

    /// An engine over host-chosen slab sizes, in bytes.
    pub fn with_ram(program_ram: usize, array_ram: usize, io: &'io mut dyn BasicIo) -> Runtime<'io> {
        Runtime {
            store: Store::new(program_ram),
            vars: Var::new(array_ram),
            gosub: Stack::new(GOSUB_DEPTH, ErrorCode::StackOverflow),
            fors: Stack::new(FOR_DEPTH, ErrorCode::StackOverflow),
            cont: None,
            rand: Rand::new(),
            io,
        }
    }

    /// Full clear, as NEW: program, variables, arrays, stacks,
    /// continuation, PRNG.
    pub fn reset(&mut self) {
        self.store.clear();
        self.vars.clear();
        self.gosub.clear();
        self.fors.clear();
        self.cont = None;
        self.rand = Rand::new();
    }

    /// Process one host-supplied line: a leading line number edits the
    /// program, anything else executes at once. Errors have already
    /// been reported through the adapter when this returns; the value
    /// is for hosts that want to inspect them.
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        let mut c = Cursor::new(line.as_bytes());
        if c.at_end() {
            return Ok(());
        }
        if c.at_digit() {
            self.edit(&mut c)
        } else {
            self.immediate(c.rest())
        }
    }

    /// As immediate `RUN`: reset the control stacks and the
    /// continuation, then execute from the first stored line.
    pub fn run(&mut self) -> Result<()> {
        self.clear_run_state();
        self.exec_from(0)
    }

    /// As immediate `LIST`.
    pub fn list(&mut self) {
        self.list_program();
    }

    fn edit(&mut self, c: &mut Cursor) -> Result<()> {
        let number = match c.number() {
            Some(n) if (0..=65535).contains(&n) => n as u16,
            _ => {
                io::write_str(self.io, ErrorCode::BadLine.message());
                io::write_newline(self.io);
                return Err(error!(BadLine));
            }
        };
        if c.at_end() {
            self.store.delete(number);
            return Ok(());
        }
        if let Err(e) = self.store.insert(number, c.rest()) {
            io::write_str(self.io, e.code().message());
            io::write_newline(self.io);
            return Err(e);
        }
        Ok(())
    }

    fn immediate(&mut self, text: &[u8]) -> Result<()> {
        match self.statement(text, None) {
            Err(e) => {
                // whatever the detail, the operator typed something wrong
                io::write_str(self.io, ErrorCode::SyntaxError.message());
                io::write_newline(self.io);
                Err(e)
            }
            Ok(Flow::Resume(at)) => self.exec_from(at),
            Ok(Flow::Goto(line)) => {
                let at = self.resolve(line)?;
                self.exec_from(at)
            }
            Ok(Flow::Run(target)) => {
                self.clear_run_state();
                let at = match target {
                    Some(line) => self.resolve(line)?,
                    None => 0,
                };
                self.exec_from(at)
            }
            Ok(Flow::Next) | Ok(Flow::Halt) => Ok(()),
        }
    }

    /// The driver. Walks records from `start` until the program runs
    /// out, a statement halts, or the host asks for a break.
    fn exec_from(&mut self, start: Address) -> Result<()> {
        let mut pc = start;
        while pc < self.store.prog_end() {
            if self.io.break_check() {
                self.cont = Some(self.store.next(pc));
                io::write_str(self.io, ErrorCode::Break.message());
                io::write_newline(self.io);
                return Ok(());
            }
            // the body is copied out so POKE can hit any slab byte,
            // including its own line, while the text is being parsed
            let mut buf = [0u8; MAX_LINE_LEN];
            let (number, body_len) = {
                let (number, body) = self.store.line_at(pc);
                let body_len = body.len().min(MAX_LINE_LEN);
                buf[..body_len].copy_from_slice(&body[..body_len]);
                (number, body_len)
            };
            let next = self.store.next(pc);
            match self.statement(&buf[..body_len], Some(next)) {
                Err(e) => {
                    io::write_str(self.io, "ERROR IN ");
                    io::write_int(self.io, i32::from(number));
                    io::write_newline(self.io);
                    return Err(e.in_line(number));
                }
                Ok(Flow::Halt) => return Ok(()),
                Ok(Flow::Resume(at)) => pc = at,
                Ok(Flow::Goto(line)) => pc = self.resolve(line)?,
                Ok(Flow::Run(target)) => {
                    self.clear_run_state();
                    pc = match target {
                        Some(line) => self.resolve(line)?,
                        None => 0,
                    };
                }
                Ok(Flow::Next) => pc = next,
            }
        }
        Ok(())
    }

    fn resolve(&mut self, line: u16) -> Result<Address> {
        match self.store.find(line) {
            Some(at) => Ok(at),
            None => {
                io::write_str(self.io, ErrorCode::LineNotFound.message());
                io::write_newline(self.io);
                Err(error!(LineNotFound))
            }
        }
    }

    fn clear_run_state(&mut self) {
        self.gosub.clear();
        self.fors.clear();
        self.cont = None;
    }

    pub(super) fn list_program(&mut self) {
        for (_, number, body) in self.store.iter() {
            io::write_int(self.io, i32::from(number));
            self.io.write_char(b' ');
            io::write_bytes(self.io, body);
            io::write_newline(self.io);
        }
    }
}
