use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Kind of message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Error,
    Hint,
}

fn paint(message: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Info => message.green(),
        Tone::Warning => message.yellow(),
        Tone::Error => message.red().bold(),
        Tone::Hint => message.cyan().bold(),
    }
}

/// Write one line to `out`. Colors are only added when `color` is set, usually from
/// `IsTerminal` on the same stream.
pub fn write_styled<W: Write>(out: &mut W, color: bool, tone: Tone, message: &str) -> io::Result<()> {
    if color {
        writeln!(out, "{}", paint(message, tone))
    } else {
        writeln!(out, "{}", message)
    }
}
