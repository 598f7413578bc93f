use crate::search::results::HighlightFragment;

/// Extract highlighted fragments for each matched term: up to
/// `max_per_term` occurrences, each with `window` characters of context on
/// both sides, ellipses added where the window clips mid-document.
///
/// Matching is case-insensitive and operates on characters, never slicing
/// mid code point. Normalized terms are prefixes of their surface forms
/// (the stemmer only strips suffixes), so plain substring search finds
/// them.
pub fn highlight_terms(
    content: &str,
    terms: &[String],
    max_per_term: usize,
    window: usize,
) -> Vec<HighlightFragment> {
    if content.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = content.chars().collect();
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let mut fragments = Vec::new();
    for term in terms {
        let needle: Vec<char> = term.to_lowercase().chars().collect();
        if needle.is_empty() || needle.len() > lower.len() {
            continue;
        }

        let mut found = 0;
        let mut i = 0;
        while found < max_per_term && i + needle.len() <= lower.len() {
            if lower[i..i + needle.len()] == needle[..] {
                fragments.push(extract_fragment(&chars, i, i + needle.len(), window));
                found += 1;
                i += needle.len();
            } else {
                i += 1;
            }
        }

        if found > 0 {
            // Tag the last pushed fragments with the term.
            let start = fragments.len() - found;
            for fragment in &mut fragments[start..] {
                fragment.term = term.clone();
            }
        }
    }

    fragments
}

fn extract_fragment(
    chars: &[char],
    match_start: usize,
    match_end: usize,
    window: usize,
) -> HighlightFragment {
    let start = match_start.saturating_sub(window);
    let end = (match_end + window).min(chars.len());

    let mut fragment = String::new();
    if start > 0 {
        fragment.push_str("...");
    }
    fragment.extend(&chars[start..match_start]);
    fragment.push_str("<mark>");
    fragment.extend(&chars[match_start..match_end]);
    fragment.push_str("</mark>");
    fragment.extend(&chars[match_end..end]);
    if end < chars.len() {
        fragment.push_str("...");
    }

    HighlightFragment {
        term: String::new(),
        fragment,
    }
}
