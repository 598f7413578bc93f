use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::stemmer::LightStemFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};

/// Text analysis pipeline: one tokenizer followed by an ordered filter
/// chain. Pure and total; empty input yields an empty token stream.
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Standard indexing pipeline: tokenize, drop stop words, light-stem.
    pub fn standard() -> Self {
        Analyzer::new(
            "standard".to_string(),
            Box::new(StandardTokenizer::default()),
        )
        .add_filter(Box::new(StopWordFilter::english()))
        .add_filter(Box::new(LightStemFilter))
    }

    /// Same pipeline without stemming, for queries that opt out of it.
    pub fn unstemmed() -> Self {
        Analyzer::new(
            "unstemmed".to_string(),
            Box::new(StandardTokenizer::default()),
        )
        .add_filter(Box::new(StopWordFilter::english()))
    }
}

impl Clone for Analyzer {
    fn clone(&self) -> Self {
        Analyzer {
            tokenizer: self.tokenizer.clone_box(),
            filters: self.filters.iter().map(|f| f.clone_box()).collect(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn standard_pipeline_normalizes() {
        let analyzer = Analyzer::standard();
        let tokens = analyzer.analyze("The Contracting Officers awarded it!");
        assert_eq!(texts(&tokens), vec!["contract", "officer", "award"]);
    }

    #[test]
    fn unstemmed_pipeline_keeps_suffixes() {
        let analyzer = Analyzer::unstemmed();
        let tokens = analyzer.analyze("awarded contracts");
        assert_eq!(texts(&tokens), vec!["awarded", "contracts"]);
    }

    #[test]
    fn analyze_never_fails_on_odd_input() {
        let analyzer = Analyzer::standard();
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("!!! ??? ...").is_empty());
        assert_eq!(texts(&analyzer.analyze("naïve café")), vec!["naïve", "café"]);
    }
}
