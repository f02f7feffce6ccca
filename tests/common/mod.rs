#![allow(dead_code)]

use basic::mach::{BasicIo, Runtime};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Scripted host for driving the engine in tests. Clones share state,
/// so keep one clone outside the `Runtime` borrow to watch the output,
/// queue INPUT replies, and schedule break requests mid-session.
#[derive(Clone, Default)]
pub struct TestIo {
    out: Rc<RefCell<Vec<u8>>>,
    replies: Rc<RefCell<VecDeque<String>>>,
    break_after: Rc<Cell<Option<usize>>>,
}

impl TestIo {
    pub fn new() -> TestIo {
        TestIo::default()
    }

    /// Everything the engine has written so far.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }

    /// As `text`, but clears the capture for staged assertions.
    pub fn take_text(&self) -> String {
        let bytes: Vec<u8> = self.out.borrow_mut().drain(..).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Queue one INPUT reply.
    pub fn reply(&self, s: &str) {
        self.replies.borrow_mut().push_back(s.to_string());
    }

    /// Answer the break poll with true after `polls` false polls.
    pub fn break_after(&self, polls: usize) {
        self.break_after.set(Some(polls));
    }
}

impl BasicIo for TestIo {
    fn write_char(&mut self, c: u8) {
        self.out.borrow_mut().push(c);
    }

    fn read_line(&mut self, buf: &mut [u8]) -> Option<usize> {
        let reply = self.replies.borrow_mut().pop_front()?;
        let bytes = reply.as_bytes();
        let len = bytes.len().min(buf.len());
        buf[..len].copy_from_slice(&bytes[..len]);
        Some(len)
    }

    fn break_check(&mut self) -> bool {
        match self.break_after.get() {
            Some(0) => {
                self.break_after.set(None);
                true
            }
            Some(n) => {
                self.break_after.set(Some(n - 1));
                false
            }
            None => false,
        }
    }
}

/// Feed each line through a fresh engine and return everything it
/// wrote.
pub fn session(lines: &[&str]) -> String {
    let io = TestIo::new();
    let mut host = io.clone();
    let mut basic = Runtime::new(&mut host);
    for line in lines {
        let _ = basic.handle_line(line);
    }
    io.text()
}
