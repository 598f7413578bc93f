use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::Token;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Standard tokenizer: lowercases, strips punctuation except hyphens,
/// collapses whitespace, and drops single-character tokens.
#[derive(Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        // Replace everything that is not alphanumeric or a hyphen with a
        // space, then split on whitespace.
        let mut cleaned = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch.is_alphanumeric() || ch == '-' {
                for lower in ch.to_lowercase() {
                    cleaned.push(lower);
                }
            } else {
                cleaned.push(' ');
            }
        }

        let mut tokens = Vec::new();
        let mut position = 0u32;

        for word in cleaned.split_whitespace() {
            let word = word.trim_matches('-');
            if word.graphemes(true).count() <= 1 || word.len() > self.max_token_length {
                continue;
            }
            tokens.push(Token::new(word.to_string(), position));
            position += 1;
        }

        tokens
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        let tokenizer = StandardTokenizer::default();
        let tokens = tokenizer.tokenize("Hello, World! (Test: 123)");
        assert_eq!(texts(&tokens), vec!["hello", "world", "test", "123"]);
    }

    #[test]
    fn keeps_hyphens_inside_words() {
        let tokenizer = StandardTokenizer::default();
        let tokens = tokenizer.tokenize("set-aside opportunity");
        assert_eq!(texts(&tokens), vec!["set-aside", "opportunity"]);
    }

    #[test]
    fn drops_single_character_tokens() {
        let tokenizer = StandardTokenizer::default();
        let tokens = tokenizer.tokenize("a b contract I x");
        assert_eq!(texts(&tokens), vec!["contract"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let tokenizer = StandardTokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn positions_are_sequential() {
        let tokenizer = StandardTokenizer::default();
        let tokens = tokenizer.tokenize("small business award");
        let positions: Vec<u32> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }
}
