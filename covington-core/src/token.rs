//! Token records
//!
//! A token carries immutable input annotation, an optional gold attachment
//! and a mutable prediction slot that the decoder fills in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Id of the synthetic root token
pub const ROOT_ID: usize = 0;

/// Label given to dependents left attached to the synthetic root
pub const ROOT_LABEL: &str = "root";

const ROOT_FORM: &str = "*root*";
const ROOT_LEMMA: &str = "*root-lemma*";
const ROOT_CPOS: &str = "ROOT-CPOS";
const ROOT_POS: &str = "ROOT-POS";
const ROOT_FEATS: &str = "FEATS-ROOT";

/// One line of input: a word plus its annotation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// Position in the sentence, 1-based; 0 is the synthetic root
    pub id: usize,
    /// Surface form
    pub form: String,
    /// Normalised form for feature extraction
    pub norm: String,
    /// Lemma
    pub lemma: String,
    /// Coarse part-of-speech tag
    pub cpos: String,
    /// Fine part-of-speech tag
    pub pos: String,
    /// Morphological features, kept opaque
    pub feats: String,
    /// Gold head id, if annotated
    pub gold_head: Option<usize>,
    /// Gold relation label, if annotated
    pub gold_label: Option<String>,
    /// Predicted head id
    pub pred_head: usize,
    /// Predicted relation label
    pub pred_label: String,
}

impl Token {
    /// Create a token with the given id and form and empty annotation
    pub fn new(id: usize, form: impl Into<String>) -> Self {
        let form = form.into();
        Self {
            id,
            norm: form.to_lowercase(),
            form,
            lemma: "_".to_string(),
            cpos: "_".to_string(),
            pos: "_".to_string(),
            feats: "_".to_string(),
            gold_head: None,
            gold_label: None,
            pred_head: ROOT_ID,
            pred_label: ROOT_LABEL.to_string(),
        }
    }

    /// The synthetic root token
    pub fn root() -> Self {
        Self {
            id: ROOT_ID,
            form: ROOT_FORM.to_string(),
            norm: ROOT_FORM.to_string(),
            lemma: ROOT_LEMMA.to_string(),
            cpos: ROOT_CPOS.to_string(),
            pos: ROOT_POS.to_string(),
            feats: ROOT_FEATS.to_string(),
            gold_head: None,
            gold_label: None,
            pred_head: ROOT_ID,
            pred_label: ROOT_LABEL.to_string(),
        }
    }

    /// Set lemma, coarse tag, fine tag and features
    pub fn with_tags(
        mut self,
        lemma: impl Into<String>,
        cpos: impl Into<String>,
        pos: impl Into<String>,
        feats: impl Into<String>,
    ) -> Self {
        self.lemma = lemma.into();
        self.cpos = cpos.into();
        self.pos = pos.into();
        self.feats = feats.into();
        self
    }

    /// Attach a gold head and label
    pub fn with_gold(mut self, head: usize, label: impl Into<String>) -> Self {
        self.gold_head = Some(head);
        self.gold_label = Some(label.into());
        self
    }

    /// Override the normalised form
    pub fn with_norm(mut self, norm: impl Into<String>) -> Self {
        self.norm = norm.into();
        self
    }

    /// Whether this is the synthetic root
    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// Reset the prediction slot to the root attachment
    pub fn reset_prediction(&mut self) {
        self.pred_head = ROOT_ID;
        self.pred_label = ROOT_LABEL.to_string();
    }
}
