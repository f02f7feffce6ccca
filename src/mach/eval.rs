use super::runtime::Runtime;
use crate::error;
use crate::lang::{Cursor, Error};

type Result<T> = std::result::Result<T, Error>;

enum Relop {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// ## Expression evaluation
///
/// Recursive descent, evaluated as it parses; there is no intermediate
/// form. Precedence from loosest to tightest: at most one relational
/// comparison, then additive, multiplicative, unary sign, primaries.
/// Relational results are BASIC-truthy: -1 for true, 0 for false, so
/// they compose with IF and with arithmetic alike.
///
/// All arithmetic wraps. Division truncates toward zero and dividing by
/// zero quietly yields 0.
impl<'io> Runtime<'io> {
    pub(super) fn expr(&mut self, c: &mut Cursor) -> Result<i32> {
        let lhs = self.arith(c)?;
        c.skip_ws();
        let op = match c.peek() {
            Some(b'=') => {
                c.bump();
                Relop::Eq
            }
            Some(b'<') => {
                c.bump();
                if c.peek() == Some(b'>') {
                    c.bump();
                    Relop::Ne
                } else if c.peek() == Some(b'=') {
                    c.bump();
                    Relop::Le
                } else {
                    Relop::Lt
                }
            }
            Some(b'>') => {
                c.bump();
                if c.peek() == Some(b'=') {
                    c.bump();
                    Relop::Ge
                } else {
                    Relop::Gt
                }
            }
            _ => return Ok(lhs),
        };
        let rhs = self.arith(c)?;
        let truth = match op {
            Relop::Eq => lhs == rhs,
            Relop::Ne => lhs != rhs,
            Relop::Lt => lhs < rhs,
            Relop::Le => lhs <= rhs,
            Relop::Gt => lhs > rhs,
            Relop::Ge => lhs >= rhs,
        };
        Ok(if truth { -1 } else { 0 })
    }

    fn arith(&mut self, c: &mut Cursor) -> Result<i32> {
        let mut acc = self.term(c)?;
        loop {
            c.skip_ws();
            match c.peek() {
                Some(b'+') => {
                    c.bump();
                    acc = acc.wrapping_add(self.term(c)?);
                }
                Some(b'-') => {
                    c.bump();
                    acc = acc.wrapping_sub(self.term(c)?);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self, c: &mut Cursor) -> Result<i32> {
        let mut acc = self.factor(c)?;
        loop {
            c.skip_ws();
            match c.peek() {
                Some(b'*') => {
                    c.bump();
                    acc = acc.wrapping_mul(self.factor(c)?);
                }
                Some(b'/') => {
                    c.bump();
                    let rhs = self.factor(c)?;
                    acc = if rhs == 0 { 0 } else { acc.wrapping_div(rhs) };
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self, c: &mut Cursor) -> Result<i32> {
        c.skip_ws();
        match c.peek() {
            Some(b'(') => {
                c.bump();
                let v = self.expr(c)?;
                if !c.eat(b')') {
                    return Err(error!(SyntaxError));
                }
                Ok(v)
            }
            Some(b'+') => {
                c.bump();
                self.factor(c)
            }
            Some(b'-') => {
                c.bump();
                Ok(self.factor(c)?.wrapping_neg())
            }
            _ => {
                if c.keyword("RND") {
                    let range = self.argument(c)?;
                    return Ok(self.rand.next(range));
                }
                if c.keyword("PEEK") {
                    let addr = self.argument(c)?;
                    return Ok(self.store.peek(addr));
                }
                if let Some(var) = c.letter() {
                    let mut look = c.clone();
                    look.skip_ws();
                    if look.peek() == Some(b'(') {
                        let (i, j, dims) = self.indices(c)?;
                        return self.vars.cell(var, dims, i, j);
                    }
                    return Ok(self.vars.fetch(var));
                }
                c.number().ok_or_else(|| error!(SyntaxError))
            }
        }
    }

    /// The one parenthesised argument RND and PEEK take.
    fn argument(&mut self, c: &mut Cursor) -> Result<i32> {
        if !c.eat(b'(') {
            return Err(error!(SyntaxError));
        }
        let v = self.expr(c)?;
        if !c.eat(b')') {
            return Err(error!(SyntaxError));
        }
        Ok(v)
    }

    /// `(i)` or `(i,j)` subscripts, shared by array reads, array
    /// assignment, and DIM.
    pub(super) fn indices(&mut self, c: &mut Cursor) -> Result<(i32, i32, u8)> {
        if !c.eat(b'(') {
            return Err(error!(SyntaxError));
        }
        let i = self.expr(c)?;
        let mut j = 0;
        let mut dims = 1;
        if c.eat(b',') {
            j = self.expr(c)?;
            dims = 2;
        }
        if !c.eat(b')') {
            return Err(error!(SyntaxError));
        }
        Ok((i, j, dims))
    }
}
