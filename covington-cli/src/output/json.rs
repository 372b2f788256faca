//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use covington_core::{Sentence, Token};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs sentences as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    sentences: Vec<SentenceData>,
}

/// One sentence in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    /// Surface forms joined by spaces
    pub text: String,
    /// Tokens in order
    pub tokens: Vec<TokenData>,
}

/// One token in the JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenData {
    /// 1-based id
    pub id: usize,
    /// Surface form
    pub form: String,
    /// Coarse tag
    pub cpos: String,
    /// Predicted head
    pub head: usize,
    /// Predicted label
    pub label: String,
    /// Gold head, when annotated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold_head: Option<usize>,
    /// Gold label, when annotated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold_label: Option<String>,
}

impl From<&Token> for TokenData {
    fn from(token: &Token) -> Self {
        Self {
            id: token.id,
            form: token.form.clone(),
            cpos: token.cpos.clone(),
            head: token.pred_head,
            label: token.pred_label.clone(),
            gold_head: token.gold_head,
            gold_label: token.gold_label.clone(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, sentence: &Sentence) -> Result<()> {
        self.sentences.push(SentenceData {
            text: sentence.text(),
            tokens: sentence.words().iter().map(TokenData::from).collect(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.sentences)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{create_formatter, OutputFormat};

    fn parsed() -> Sentence {
        let mut sentence = Sentence::new(vec![
            Token::new(1, "Hi").with_gold(0, "root"),
            Token::new(2, "there").with_gold(1, "advmod"),
        ])
        .unwrap();
        sentence.words_mut()[1].pred_head = 1;
        sentence.words_mut()[1].pred_label = "advmod".to_string();
        sentence
    }

    #[test]
    fn test_json_output_shape() {
        let mut out = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut out, false);
            formatter.format_sentence(&parsed()).unwrap();
            formatter.finish().unwrap();
        }

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["text"], "Hi there");
        assert_eq!(value[0]["tokens"][1]["head"], 1);
        assert_eq!(value[0]["tokens"][1]["label"], "advmod");
        assert_eq!(value[0]["tokens"][0]["gold_head"], 0);
    }

    #[test]
    fn test_unannotated_tokens_omit_gold_fields() {
        let sentence = Sentence::new(vec![Token::new(1, "Hi")]).unwrap();
        let data = TokenData::from(&sentence.words()[0]);
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("gold_head"));
    }

    #[test]
    fn test_conll_formatter_through_factory() {
        let mut out = Vec::new();
        {
            let mut formatter = create_formatter(OutputFormat::Conll, Box::new(&mut out), true);
            formatter.format_sentence(&parsed()).unwrap();
            formatter.finish().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "1\tHi\t_\t_\t_\t_\t0\troot\t_\t_\n2\tthere\t_\t_\t_\t_\t1\tadvmod\t_\t_\n\n"
        );
    }
}
