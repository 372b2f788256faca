//! Sentence: the synthetic root followed by tokens `1..=n`

use crate::arcs::ArcSet;
use crate::error::{ParseError, Result};
use crate::token::{Token, ROOT_ID, ROOT_LABEL};
use crate::vocabulary::Vocabulary;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered tokens of one sentence, root first
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Token>", into = "Vec<Token>"))]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Build from the real tokens (ids `1..=n` in order); the root is prepended
    pub fn new(words: Vec<Token>) -> Result<Self> {
        if words.is_empty() {
            return Err(ParseError::malformed("sentence has no tokens"));
        }
        for (position, token) in words.iter().enumerate() {
            if token.id != position + 1 {
                return Err(ParseError::malformed(format!(
                    "token at position {} has id {}",
                    position + 1,
                    token.id
                )));
            }
        }

        let n = words.len();
        for token in &words {
            if let Some(head) = token.gold_head {
                if head > n {
                    return Err(ParseError::malformed(format!(
                        "token {} has gold head {} outside the sentence",
                        token.id, head
                    )));
                }
                if head == token.id {
                    return Err(ParseError::malformed(format!(
                        "token {} is its own gold head",
                        token.id
                    )));
                }
            }
        }

        let mut tokens = Vec::with_capacity(n + 1);
        tokens.push(Token::root());
        tokens.extend(words);
        Ok(Self { tokens })
    }

    /// Build from a token sequence that may already start with the root
    pub fn from_tokens(mut tokens: Vec<Token>) -> Result<Self> {
        if tokens.first().is_some_and(Token::is_root) {
            tokens.remove(0);
        }
        Self::new(tokens)
    }

    /// Number of real tokens
    pub fn len(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Always false for a constructed sentence
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tokens including the root
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Real tokens, without the root
    pub fn words(&self) -> &[Token] {
        &self.tokens[1..]
    }

    /// Mutable access to the real tokens
    pub fn words_mut(&mut self) -> &mut [Token] {
        &mut self.tokens[1..]
    }

    /// Token by id (0 is the root)
    pub fn token(&self, id: usize) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Gold head of a token, if annotated
    pub fn gold_head(&self, id: usize) -> Option<usize> {
        self.token(id).and_then(|t| t.gold_head)
    }

    /// Gold label of a token, if annotated
    pub fn gold_label(&self, id: usize) -> Option<&str> {
        self.token(id).and_then(|t| t.gold_label.as_deref())
    }

    /// Whether every real token has a gold head
    pub fn has_gold(&self) -> bool {
        self.words().iter().all(|t| t.gold_head.is_some())
    }

    /// Copy a terminal arc set onto the prediction slots.
    ///
    /// Tokens without an arc hang from the root with [`ROOT_LABEL`].
    pub fn apply_arcs(&mut self, arcs: &ArcSet, vocab: &Vocabulary) -> Result<()> {
        let mut predictions = Vec::with_capacity(self.len());
        for token in self.words() {
            predictions.push(match arcs.get(token.id) {
                Some((head, label)) => (head, vocab.label(label)?.to_string()),
                None => (ROOT_ID, ROOT_LABEL.to_string()),
            });
        }
        for (token, (head, label)) in self.words_mut().iter_mut().zip(predictions) {
            token.pred_head = head;
            token.pred_label = label;
        }
        Ok(())
    }

    /// Reset every prediction to the root attachment
    pub fn clear_predictions(&mut self) {
        for token in self.words_mut() {
            token.reset_prediction();
        }
    }

    /// Predicted heads of tokens `1..=n`
    pub fn predicted_heads(&self) -> Vec<usize> {
        self.words().iter().map(|t| t.pred_head).collect()
    }

    /// Predicted labels of tokens `1..=n`
    pub fn predicted_labels(&self) -> Vec<&str> {
        self.words().iter().map(|t| t.pred_label.as_str()).collect()
    }

    /// Surface forms joined by spaces
    pub fn text(&self) -> String {
        self.words()
            .iter()
            .map(|t| t.form.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<Vec<Token>> for Sentence {
    type Error = ParseError;

    fn try_from(tokens: Vec<Token>) -> Result<Self> {
        Self::from_tokens(tokens)
    }
}

impl From<Sentence> for Vec<Token> {
    fn from(sentence: Sentence) -> Self {
        sentence.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(heads: &[usize]) -> Vec<Token> {
        heads
            .iter()
            .enumerate()
            .map(|(i, &h)| Token::new(i + 1, format!("w{}", i + 1)).with_gold(h, "dep"))
            .collect()
    }

    #[test]
    fn test_new_prepends_root() {
        let sentence = Sentence::new(words(&[2, 0])).unwrap();
        assert_eq!(sentence.len(), 2);
        assert!(sentence.tokens()[0].is_root());
        assert_eq!(sentence.gold_head(1), Some(2));
        assert_eq!(sentence.gold_label(2), Some("dep"));
        assert!(sentence.has_gold());
        assert_eq!(sentence.text(), "w1 w2");
    }

    #[test]
    fn test_rejects_empty_and_inconsistent_ids() {
        assert!(matches!(
            Sentence::new(Vec::new()),
            Err(ParseError::MalformedSentence { .. })
        ));

        let gap = vec![Token::new(1, "a"), Token::new(3, "b")];
        assert!(matches!(
            Sentence::new(gap),
            Err(ParseError::MalformedSentence { .. })
        ));

        assert!(Sentence::new(words(&[5])).is_err());
        assert!(Sentence::new(words(&[1])).is_err());
    }

    #[test]
    fn test_from_tokens_accepts_leading_root() {
        let mut tokens = vec![Token::root()];
        tokens.extend(words(&[0]));
        let sentence = Sentence::from_tokens(tokens).unwrap();
        assert_eq!(sentence.len(), 1);
    }

    #[test]
    fn test_apply_arcs_defaults_to_root() {
        let vocab = Vocabulary::from_labels(["amod"]);
        let amod = vocab.id("amod").unwrap();
        let mut sentence = Sentence::new(words(&[2, 0, 2])).unwrap();
        let mut arcs = ArcSet::new(3);
        arcs.insert(2, 1, amod).unwrap();

        sentence.apply_arcs(&arcs, &vocab).unwrap();
        assert_eq!(sentence.predicted_heads(), vec![2, 0, 0]);
        assert_eq!(sentence.predicted_labels(), vec!["amod", "root", "root"]);

        sentence.clear_predictions();
        assert_eq!(sentence.predicted_heads(), vec![0, 0, 0]);
    }

    #[test]
    fn test_apply_arcs_rejects_foreign_labels() {
        let foreign = Vocabulary::from_labels(["a", "b"]).id("b").unwrap();
        let mut sentence = Sentence::new(words(&[0, 1])).unwrap();
        let mut arcs = ArcSet::new(2);
        arcs.insert(1, 2, foreign).unwrap();
        let vocab = Vocabulary::from_labels(["a"]);
        assert_eq!(
            sentence.apply_arcs(&arcs, &vocab),
            Err(ParseError::UnknownLabelId(1))
        );
        assert_eq!(sentence.predicted_heads(), vec![0, 0]);
    }
}
