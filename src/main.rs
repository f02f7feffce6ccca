//! Console host for 1K BASIC.

mod term;

fn main() {
    term::main();
}
