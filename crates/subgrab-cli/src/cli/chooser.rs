//! Interactive selection on the terminal.

use std::io::{self, BufRead, Write};

use subgrab_core::select::{Chooser, FirstChoice};

/// Prints a numbered list on stderr and reads the choice from stdin.
/// Empty or invalid input counts as dismissing the prompt.
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn select(&self, heading: &str, items: &[String]) -> Option<usize> {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{}", heading);
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(err, "  {:>2}) {}", i + 1, item);
        }
        let _ = write!(err, "choice [1]: ");
        let _ = err.flush();

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        parse_choice(&line, items.len())
    }
}

/// 1-based input to a 0-based index.
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

pub fn chooser(first: bool) -> Box<dyn Chooser> {
    if first {
        Box::new(FirstChoice)
    } else {
        Box::new(TerminalChooser)
    }
}
