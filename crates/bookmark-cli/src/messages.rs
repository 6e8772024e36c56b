use std::io;
use std::io::Write;

use yansi::Paint;

pub fn success(text: &str) {
    println!("{} {text}", Paint::green("✓").bold());
}

pub fn warning(text: &str) {
    println!("{} {text}", Paint::yellow("!").bold());
}

pub fn error<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{} {text}", Paint::red("✗").bold())
}
