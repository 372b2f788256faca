//! Post-processing of predicted trees

use covington_core::{Sentence, ROOT_ID};
use tracing::trace;

/// Coarse tag preferred when choosing the surviving root
pub const VERB_TAG: &str = "VERB";

/// Keep a single dependent of the synthetic root.
///
/// The first root-attached token tagged [`VERB_TAG`], or failing that the
/// leftmost root-attached token, stays on the root. Every other
/// root-attached token is re-attached to it with its label unchanged.
/// Returns the surviving root when a repair was made.
pub fn enforce_single_root(sentence: &mut Sentence) -> Option<usize> {
    let rooted: Vec<(usize, bool)> = sentence
        .words()
        .iter()
        .filter(|t| t.pred_head == ROOT_ID)
        .map(|t| (t.id, t.cpos == VERB_TAG))
        .collect();

    if rooted.len() < 2 {
        return None;
    }

    let keep = rooted
        .iter()
        .find(|(_, is_verb)| *is_verb)
        .unwrap_or(&rooted[0])
        .0;

    for token in sentence.words_mut() {
        if token.pred_head == ROOT_ID && token.id != keep {
            token.pred_head = keep;
        }
    }
    trace!(root = keep, reattached = rooted.len() - 1, "single root enforced");
    Some(keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use covington_core::Token;

    fn predicted(rows: &[(&str, usize, &str)]) -> Sentence {
        let words = rows
            .iter()
            .enumerate()
            .map(|(i, &(cpos, head, label))| {
                let mut token = Token::new(i + 1, format!("w{}", i + 1)).with_tags("_", cpos, "_", "_");
                token.pred_head = head;
                token.pred_label = label.to_string();
                token
            })
            .collect();
        Sentence::new(words).unwrap()
    }

    #[test]
    fn test_prefers_first_verb() {
        let mut s = predicted(&[
            ("NOUN", 0, "root"),
            ("VERB", 0, "root"),
            ("NOUN", 2, "obj"),
            ("VERB", 0, "conj"),
        ]);
        assert_eq!(enforce_single_root(&mut s), Some(2));
        assert_eq!(s.predicted_heads(), vec![2, 0, 2, 2]);
        assert_eq!(s.predicted_labels(), vec!["root", "root", "obj", "conj"]);
    }

    #[test]
    fn test_falls_back_to_leftmost() {
        let mut s = predicted(&[("ADJ", 2, "amod"), ("NOUN", 0, "root"), ("NOUN", 0, "root")]);
        assert_eq!(enforce_single_root(&mut s), Some(2));
        assert_eq!(s.predicted_heads(), vec![2, 0, 2]);
    }

    #[test]
    fn test_single_root_is_untouched() {
        let mut s = predicted(&[("NOUN", 2, "nsubj"), ("VERB", 0, "root")]);
        assert_eq!(enforce_single_root(&mut s), None);
        assert_eq!(s.predicted_heads(), vec![2, 0]);
    }
}
