//! `subgrab classify` – show how names are classified.

use subgrab_core::classify::{self, Classification};

fn label(c: Classification) -> &'static str {
    match c {
        Classification::Subtitle => "subtitle",
        Classification::AccessibleArchive => "archive",
        Classification::InaccessibleArchive => "archive (cannot open)",
        Classification::Unknown => "unknown",
    }
}

pub fn run_classify(names: &[String]) {
    for name in names {
        println!("{:<24} {}", label(classify::classify(name)), name);
    }
}
