use std::collections::HashMap;

/// Fixed term -> alternate-phrasings table. Lexical only; expanded terms
/// participate in retrieval and scoring exactly like the originals.
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        SynonymTable { entries }
    }

    /// The procurement-domain table. Keys are matched against normalized
    /// query terms, so they are written in post-analysis form.
    pub fn procurement() -> Self {
        let mut entries = HashMap::new();
        let mut add = |term: &str, phrases: &[&str]| {
            entries.insert(
                term.to_string(),
                phrases.iter().map(|p| p.to_string()).collect(),
            );
        };

        add("rfp", &["request for proposal"]);
        add("rfq", &["request for quote"]);
        add("rfi", &["request for information"]);
        add("contract", &["award", "agreement"]);
        add("proposal", &["bid", "offer"]);
        add("solicitation", &["opportunity", "notice"]);
        add("vendor", &["supplier", "contractor"]);
        add("naic", &["industry code"]);

        SynonymTable::new(entries)
    }

    /// Alternate phrasings for a normalized term, if any.
    pub fn phrases_for(&self, term: &str) -> Option<&[String]> {
        self.entries.get(term).map(Vec::as_slice)
    }
}
