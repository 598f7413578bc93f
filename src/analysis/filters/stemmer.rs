use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Light suffix stripper. Tokens longer than three characters lose a
/// trailing "ing", "ed", or "s" (first match wins). Deliberately much
/// weaker than a Snowball stemmer: the query side applies the identical
/// rules, so the two always agree.
pub struct LightStemFilter;

impl LightStemFilter {
    pub fn stem(word: &str) -> &str {
        if word.chars().count() <= 3 {
            return word;
        }

        if let Some(base) = word.strip_suffix("ing") {
            return base;
        }
        if let Some(base) = word.strip_suffix("ed") {
            return base;
        }
        if let Some(base) = word.strip_suffix('s') {
            return base;
        }

        word
    }
}

impl TokenFilter for LightStemFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut token| {
                let stemmed = Self::stem(&token.text);
                if stemmed != token.text {
                    token.text = stemmed.to_string();
                }
                token
            })
            .collect()
    }

    fn name(&self) -> &str {
        "light_stem"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(LightStemFilter)
    }
}
