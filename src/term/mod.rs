extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use ansi_term::Style;
use basic::mach::{BasicIo, Runtime};
use linefeed::{DefaultTerminal, Interface, ReadResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    if std::env::args().count() > 2 {
        println!("Usage: basic1k [FILENAME]");
        return;
    }
    let mut args = std::env::args();
    let _executable = args.next();
    let filename = match args.next() {
        Some(f) => f,
        _ => "".into(),
    };
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
        return;
    }
    if let Err(error) = main_loop(interrupted, filename) {
        eprintln!("{}", error);
    }
}

fn main_loop(interrupted: Arc<AtomicBool>, filename: String) -> std::io::Result<()> {
    let command = Interface::new("1k-basic")?;
    println!("{}", Style::new().bold().paint("1K BASIC"));
    println!("READY.");

    let break_flag = interrupted.clone();
    let mut console = Console {
        command: &command,
        interrupted,
    };
    let mut runtime = Runtime::new(&mut console);

    if !filename.is_empty() {
        match fs::read_to_string(&filename) {
            Ok(text) => {
                for line in text.lines() {
                    let _ = runtime.handle_line(line);
                }
            }
            Err(error) => {
                println!("{}", Style::new().bold().paint(error.to_string()));
                return Ok(());
            }
        }
    }

    loop {
        let _ = std::io::stdout().flush();
        match command.read_line() {
            Ok(ReadResult::Input(line)) => {
                // a break request raised while idle is stale
                break_flag.store(false, Ordering::SeqCst);
                let _ = runtime.handle_line(&line);
                if !line.trim().is_empty() {
                    command.add_history_unique(line);
                }
            }
            Ok(ReadResult::Signal(_)) | Ok(ReadResult::Eof) => break,
            Err(ref error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
    Ok(())
}

/// The engine's view of the terminal: bytes to stdout, INPUT replies
/// from the line editor, break requests from the Ctrl-C flag.
struct Console<'a> {
    command: &'a Interface<DefaultTerminal>,
    interrupted: Arc<AtomicBool>,
}

impl<'a> BasicIo for Console<'a> {
    fn write_char(&mut self, c: u8) {
        let mut out = std::io::stdout();
        let _ = out.write_all(&[c]);
        if c == b'\n' {
            let _ = out.flush();
        }
    }

    fn read_line(&mut self, buf: &mut [u8]) -> Option<usize> {
        let _ = std::io::stdout().flush();
        match self.command.read_line() {
            Ok(ReadResult::Input(reply)) => {
                let bytes = reply.as_bytes();
                let len = bytes.len().min(buf.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                Some(len)
            }
            _ => None,
        }
    }

    fn break_check(&mut self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}
