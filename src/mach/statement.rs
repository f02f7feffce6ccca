use super::io;
use super::runtime::{ForFrame, Runtime};
use super::Address;
use crate::error;
use crate::lang::{Cursor, Error};

type Result<T> = std::result::Result<T, Error>;

/// What a statement asks the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    /// Carry on with the following line.
    Next,
    /// Jump to a numbered line.
    Goto(u16),
    /// Resume at a saved program position (RETURN, NEXT, CONT).
    Resume(Address),
    /// Start over: reset the control stacks, then enter at the given
    /// line or at the top of the program.
    Run(Option<u16>),
    /// Stop executing.
    Halt,
}

fn line_number(c: &mut Cursor) -> Result<u16> {
    match c.number() {
        Some(n) if (0..=65535).contains(&n) => Ok(n as u16),
        _ => Err(error!(SyntaxError)),
    }
}

/// ## Statement dispatch
///
/// One routine per keyword. `next_line` is the record after the one
/// being executed; immediate statements have none, which rules out FOR
/// and GOSUB outside a program. A statement either completes or errors;
/// nothing below leaves half-applied state the driver would have to
/// undo.
impl<'io> Runtime<'io> {
    pub(super) fn statement(&mut self, text: &[u8], next_line: Option<Address>) -> Result<Flow> {
        let mut c = Cursor::new(text);
        if c.at_end() {
            return Ok(Flow::Next);
        }
        if c.keyword("REM") {
            return Ok(Flow::Next);
        }
        if c.keyword("PRINT") {
            return self.st_print(&mut c);
        }
        if c.keyword("LET") {
            return self.st_let(&mut c);
        }
        if c.keyword("INPUT") {
            return self.st_input(&mut c);
        }
        if c.keyword("GOTO") {
            return Ok(Flow::Goto(line_number(&mut c)?));
        }
        if c.keyword("IF") {
            return self.st_if(&mut c, next_line);
        }
        if c.keyword("END") {
            self.cont = None;
            return Ok(Flow::Halt);
        }
        if c.keyword("STOP") {
            if next_line.is_some() {
                self.cont = next_line;
            }
            return Ok(Flow::Halt);
        }
        if c.keyword("RUN") {
            return self.st_run(&mut c);
        }
        if c.keyword("LIST") {
            self.list_program();
            return Ok(Flow::Next);
        }
        if c.keyword("NEW") {
            self.reset();
            return Ok(Flow::Next);
        }
        if c.keyword("CLS") {
            for _ in 0..8 {
                io::write_newline(self.io);
            }
            return Ok(Flow::Next);
        }
        if c.keyword("CONTINUE") || c.keyword("CONT") {
            // the slot survives, so a later STOP simply retargets it
            return match self.cont {
                Some(at) => Ok(Flow::Resume(at)),
                None => Err(error!(CantContinue)),
            };
        }
        if c.keyword("GOSUB") {
            return self.st_gosub(&mut c, next_line);
        }
        if c.keyword("RETURN") {
            return match self.gosub.pop() {
                Some(at) => Ok(Flow::Resume(at)),
                None => Err(error!(ReturnWithoutGosub)),
            };
        }
        if c.keyword("FOR") {
            return self.st_for(&mut c, next_line);
        }
        if c.keyword("NEXT") {
            return self.st_next(&mut c);
        }
        if c.keyword("POKE") {
            return self.st_poke(&mut c);
        }
        if c.keyword("RANDOMISE") || c.keyword("RAND") {
            return self.st_rand(&mut c);
        }
        if c.keyword("DIM") {
            return self.st_dim(&mut c);
        }
        if c.keyword("SAVE") || c.keyword("LOAD") {
            // storage belongs to the host; accept the line and move on
            return Ok(Flow::Next);
        }
        // no keyword left: a bare `V=…` or `V(…)=…` assignment
        let mut look = c.clone();
        if look.letter().is_some() {
            look.skip_ws();
            if matches!(look.peek(), Some(b'=') | Some(b'(')) {
                return self.st_let(&mut c);
            }
        }
        Err(error!(SyntaxError))
    }

    fn st_print(&mut self, c: &mut Cursor) -> Result<Flow> {
        if c.at_end() {
            io::write_newline(self.io);
            return Ok(Flow::Next);
        }
        let mut suppress_newline = false;
        loop {
            c.skip_ws();
            if c.peek() == Some(b'"') {
                c.bump();
                while let Some(b) = c.bump() {
                    if b == b'"' {
                        break;
                    }
                    self.io.write_char(b);
                }
            } else {
                let v = self.expr(c)?;
                io::write_int(self.io, v);
            }
            if c.eat(b';') {
                // only a trailing semicolon holds the newline back
                if c.at_end() {
                    suppress_newline = true;
                    break;
                }
            } else if c.eat(b',') {
                self.io.write_char(b' ');
                if c.at_end() {
                    break;
                }
            } else {
                break;
            }
        }
        if !suppress_newline {
            io::write_newline(self.io);
        }
        Ok(Flow::Next)
    }

    fn st_let(&mut self, c: &mut Cursor) -> Result<Flow> {
        let var = c.letter().ok_or_else(|| error!(SyntaxError))?;
        let mut look = c.clone();
        look.skip_ws();
        let subscript = if look.peek() == Some(b'(') {
            Some(self.indices(c)?)
        } else {
            None
        };
        if !c.eat(b'=') {
            return Err(error!(SyntaxError));
        }
        let value = self.expr(c)?;
        match subscript {
            None => self.vars.store(var, value),
            Some((i, j, dims)) => self.vars.set_cell(var, dims, i, j, value)?,
        }
        Ok(Flow::Next)
    }

    fn st_input(&mut self, c: &mut Cursor) -> Result<Flow> {
        let var = c.letter().ok_or_else(|| error!(SyntaxError))?;
        io::write_str(self.io, "? ");
        let mut buf = [0u8; 64];
        let len = match self.io.read_line(&mut buf) {
            Some(len) => len.min(buf.len()),
            None => return Err(error!(SyntaxError)),
        };
        // empty or non-numeric replies become 0
        let value = Cursor::new(&buf[..len]).number().unwrap_or(0);
        self.vars.store(var, value);
        Ok(Flow::Next)
    }

    fn st_if(&mut self, c: &mut Cursor, next_line: Option<Address>) -> Result<Flow> {
        let cond = self.expr(c)?;
        if !c.keyword("THEN") {
            return Err(error!(SyntaxError));
        }
        if cond == 0 {
            return Ok(Flow::Next);
        }
        if c.at_digit() {
            return Ok(Flow::Goto(line_number(c)?));
        }
        c.skip_ws();
        self.statement(c.rest(), next_line)
    }

    fn st_gosub(&mut self, c: &mut Cursor, next_line: Option<Address>) -> Result<Flow> {
        let next = next_line.ok_or_else(|| error!(IllegalDirect))?;
        let target = line_number(c)?;
        self.gosub.push(next)?;
        Ok(Flow::Goto(target))
    }

    fn st_for(&mut self, c: &mut Cursor, next_line: Option<Address>) -> Result<Flow> {
        let next = next_line.ok_or_else(|| error!(IllegalDirect))?;
        let var = c.letter().ok_or_else(|| error!(SyntaxError))?;
        if !c.eat(b'=') {
            return Err(error!(SyntaxError));
        }
        let start = self.expr(c)?;
        if !c.keyword("TO") {
            return Err(error!(SyntaxError));
        }
        let end = self.expr(c)?;
        let step = if c.keyword("STEP") { self.expr(c)? } else { 1 };
        if self.fors.is_full() {
            return Err(error!(StackOverflow));
        }
        self.vars.store(var, start);
        let looping = if step >= 0 { start <= end } else { start >= end };
        if !looping {
            return self.skip_for_body(var, next);
        }
        self.fors.push(ForFrame {
            var,
            end,
            step,
            body: next,
        })?;
        Ok(Flow::Next)
    }

    /// A loop that never runs: scan forward for the matching NEXT,
    /// honouring nesting, and land on the line after it.
    fn skip_for_body(&self, var: usize, from: Address) -> Result<Flow> {
        let mut depth = 0usize;
        for (at, _, body) in self.store.iter_from(from) {
            let mut t = Cursor::new(body);
            if t.keyword("FOR") {
                depth += 1;
            } else if t.keyword("NEXT") {
                let named = if t.at_end() {
                    None
                } else {
                    Some(t.letter().ok_or_else(|| error!(SyntaxError))?)
                };
                if depth == 0 && named.map_or(true, |n| n == var) {
                    return Ok(Flow::Resume(self.store.next(at)));
                }
                if depth > 0 {
                    depth -= 1;
                }
            }
        }
        Err(error!(ForWithoutNext))
    }

    fn st_next(&mut self, c: &mut Cursor) -> Result<Flow> {
        let frame = match self.fors.last() {
            Some(frame) => *frame,
            None => return Err(error!(NextWithoutFor)),
        };
        if !c.at_end() {
            let named = c.letter().ok_or_else(|| error!(SyntaxError))?;
            if named != frame.var {
                return Err(error!(NextWithoutFor));
            }
        }
        let value = self.vars.fetch(frame.var).wrapping_add(frame.step);
        self.vars.store(frame.var, value);
        let looping = if frame.step >= 0 {
            value <= frame.end
        } else {
            value >= frame.end
        };
        if looping {
            Ok(Flow::Resume(frame.body))
        } else {
            self.fors.pop();
            Ok(Flow::Next)
        }
    }

    fn st_run(&mut self, c: &mut Cursor) -> Result<Flow> {
        if c.at_end() {
            return Ok(Flow::Run(None));
        }
        Ok(Flow::Run(Some(line_number(c)?)))
    }

    fn st_poke(&mut self, c: &mut Cursor) -> Result<Flow> {
        let addr = self.expr(c)?;
        if !c.eat(b',') {
            return Err(error!(SyntaxError));
        }
        let value = self.expr(c)?;
        self.store.poke(addr, value);
        Ok(Flow::Next)
    }

    fn st_rand(&mut self, c: &mut Cursor) -> Result<Flow> {
        if c.at_end() {
            self.rand.seed(self.store.prog_end() as u32 + 1);
        } else {
            let seed = self.expr(c)?;
            self.rand.seed(seed as u32);
        }
        Ok(Flow::Next)
    }

    fn st_dim(&mut self, c: &mut Cursor) -> Result<Flow> {
        loop {
            let var = c.letter().ok_or_else(|| error!(SyntaxError))?;
            let (size1, size2, dims) = self.indices(c)?;
            self.vars.dim(var, dims, size1, size2)?;
            if !c.eat(b',') {
                return Ok(Flow::Next);
            }
        }
    }
}
