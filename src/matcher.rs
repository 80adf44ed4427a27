use regex::Regex;

use crate::error::Result;

/// Counts whole-word occurrences of `term` in already-lowercased content.
///
/// The term is escaped so any regex metacharacters in a skill name match
/// literally, then anchored on word boundaries so "java" does not match
/// inside "javascript". Multi-word terms match as a contiguous phrase.
/// Callers lowercase the content once per document, not per term.
pub fn count_occurrences(content_lower: &str, term: &str) -> Result<usize> {
    let pattern = format!(r"\b{}\b", regex::escape(&term.to_lowercase()));
    let re = Regex::new(&pattern)?;
    Ok(re.find_iter(content_lower).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_whole_words_only() {
        // "java" must not match inside "javascript"
        assert_eq!(count_occurrences("javascript and java", "java").unwrap(), 1);
        assert_eq!(count_occurrences("javascript", "java").unwrap(), 0);
    }

    #[test]
    fn matches_are_case_insensitive_via_lowered_term() {
        assert_eq!(count_occurrences("i know go and rust", "Go").unwrap(), 1);
    }

    #[test]
    fn multi_word_terms_match_as_phrase() {
        assert_eq!(
            count_occurrences("i use machine learning daily", "machine learning").unwrap(),
            1
        );
        assert_eq!(
            count_occurrences("machine vision and learning theory", "machine learning").unwrap(),
            0
        );
    }

    #[test]
    fn counts_every_occurrence() {
        assert_eq!(
            count_occurrences("rust, more rust, then rust again", "rust").unwrap(),
            3
        );
    }

    #[test]
    fn escapes_regex_metacharacters_in_terms() {
        // Terms with metacharacters compile and match literally
        assert_eq!(count_occurrences("we ship node.js services", "node.js").unwrap(), 1);
        // "node js" must not be matched by the dot as a wildcard
        assert_eq!(count_occurrences("we ship node js services", "node.js").unwrap(), 0);
        assert_eq!(count_occurrences("mostly c++ code", "c++").unwrap(), 0);
    }

    #[test]
    fn no_match_is_zero_not_an_error() {
        assert_eq!(count_occurrences("", "rust").unwrap(), 0);
        assert_eq!(count_occurrences("nothing relevant here", "rust").unwrap(), 0);
    }
}
