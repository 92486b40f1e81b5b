//! Picking one subtitle out of the candidates found in an archive.

use crate::walker::SubtitleCandidate;

/// Heading shown when the user has to pick a file.
pub const SELECT_HEADING: &str = "Select a subtitle from the archive";

/// Asks the user to pick one item. Returns the chosen index, or `None` when
/// the prompt was dismissed.
pub trait Chooser {
    fn select(&self, heading: &str, items: &[String]) -> Option<usize>;
}

/// Chooser that never picks, so the first candidate always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl Chooser for FirstChoice {
    fn select(&self, _heading: &str, _items: &[String]) -> Option<usize> {
        None
    }
}

/// Decide which candidate to use.
///
/// No candidates gives `None`; a single candidate is returned without asking.
/// With several, the chooser is asked; a dismissed prompt (or an index out of
/// range) falls back to the first candidate in traversal order.
pub fn resolve(
    mut candidates: Vec<SubtitleCandidate>,
    chooser: &dyn Chooser,
) -> Option<SubtitleCandidate> {
    match candidates.len() {
        0 => None,
        1 => candidates.pop(),
        n => {
            let titles: Vec<String> = candidates.iter().map(|c| c.display_title.clone()).collect();
            let index = match chooser.select(SELECT_HEADING, &titles) {
                Some(i) if i < n => i,
                Some(i) => {
                    tracing::warn!("chooser returned index {} of {}, using first", i, n);
                    0
                }
                None => {
                    tracing::debug!("selection dismissed, using first candidate");
                    0
                }
            };
            Some(candidates.swap_remove(index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cand(name: &str) -> SubtitleCandidate {
        SubtitleCandidate {
            display_title: crate::classify::display_title(name),
            full_path: format!("zip://x/{}", name),
        }
    }

    struct Fixed {
        pick: Option<usize>,
        asked: Cell<bool>,
    }

    impl Chooser for Fixed {
        fn select(&self, _heading: &str, _items: &[String]) -> Option<usize> {
            self.asked.set(true);
            self.pick
        }
    }

    fn fixed(pick: Option<usize>) -> Fixed {
        Fixed {
            pick,
            asked: Cell::new(false),
        }
    }

    #[test]
    fn empty_is_none() {
        assert!(resolve(Vec::new(), &FirstChoice).is_none());
    }

    #[test]
    fn single_is_returned_without_prompt() {
        let chooser = fixed(Some(5));
        let got = resolve(vec![cand("a.srt")], &chooser).unwrap();
        assert_eq!(got.full_path, "zip://x/a.srt");
        assert!(!chooser.asked.get());
    }

    #[test]
    fn dismissed_prompt_defaults_to_first() {
        let got = resolve(vec![cand("a.srt"), cand("b.ass"), cand("c.ssa")], &FirstChoice).unwrap();
        assert_eq!(got.display_title, "[srt]a.srt");
    }

    #[test]
    fn user_choice_is_honored() {
        let chooser = fixed(Some(2));
        let got = resolve(vec![cand("a.srt"), cand("b.ass"), cand("c.ssa")], &chooser).unwrap();
        assert_eq!(got.display_title, "[ssa]c.ssa");
        assert!(chooser.asked.get());
    }

    #[test]
    fn out_of_range_choice_defaults_to_first() {
        let got = resolve(vec![cand("a.srt"), cand("b.ass")], &fixed(Some(9))).unwrap();
        assert_eq!(got.display_title, "[srt]a.srt");
    }
}
