use std::collections::BTreeMap;

use super::{current_word, scrape, vocab, Candidate, CandidateSource, WordSpan};
use crate::buffer::TextBuffer;
use crate::constants::completion::MAX_CANDIDATES;
use crate::language::Language;

/// Computes ranked candidates for a word prefix.
#[derive(Debug, Clone)]
pub struct CompletionEngine {
    limit: usize,
}

impl CompletionEngine {
    pub fn new() -> Self {
        Self {
            limit: MAX_CANDIDATES,
        }
    }

    /// Candidates whose text starts with `word`, ignoring case.
    ///
    /// Sources are merged in priority order so a duplicate keeps the source of
    /// its first producer; the result is sorted and truncated to the limit.
    pub fn candidates(&self, word: &str, language: Language, code: &str) -> Vec<Candidate> {
        if word.is_empty() {
            return Vec::new();
        }
        let prefix = word.to_lowercase();
        let matches = |name: &str| name.to_lowercase().starts_with(&prefix);

        let vocab = vocab::for_language(language);
        let mut merged: BTreeMap<String, CandidateSource> = BTreeMap::new();
        let statics = [
            (vocab.builtins, CandidateSource::Builtin),
            (vocab.keywords, CandidateSource::Keyword),
            (vocab.words, CandidateSource::Vocabulary),
        ];
        for (names, source) in statics {
            for name in names {
                if matches(name) {
                    merged.entry(name.to_string()).or_insert(source);
                }
            }
        }
        for name in scrape::scrape_identifiers(code) {
            if matches(&name) {
                merged.entry(name).or_insert(CandidateSource::Scraped);
            }
        }

        merged
            .into_iter()
            .take(self.limit)
            .map(|(text, source)| Candidate { text, source })
            .collect()
    }

    /// Word under the caret and its candidates. `None` when there is no word.
    pub fn complete_at(
        &self,
        buffer: &TextBuffer,
        language: Language,
    ) -> Option<(WordSpan, Vec<Candidate>)> {
        let word = current_word(buffer)?;
        let candidates = self.candidates(&word.text, language, &buffer.text());
        tracing::debug!("{} candidates for {:?}", candidates.len(), word.text);
        Some((word, candidates))
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the anchored word with `candidate`. Builtins get `()` appended with
/// the caret left between the parentheses.
pub fn commit(buffer: &mut TextBuffer, anchor: &WordSpan, candidate: &Candidate) {
    let name_len = candidate.text.chars().count();
    if candidate.wants_call_parens() {
        let text = format!("{}()", candidate.text);
        buffer.replace_in_line(anchor.line, anchor.start, anchor.end, &text);
        buffer.set_caret(anchor.line, anchor.start + name_len + 1);
    } else {
        buffer.replace_in_line(anchor.line, anchor.start, anchor.end, &candidate.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Caret;
    use crate::completion::current_word;

    fn texts(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_prefix_match_is_case_insensitive_and_sorted() {
        let engine = CompletionEngine::new();
        let found = engine.candidates("tr", Language::Python, "");
        assert_eq!(texts(&found), vec!["True", "try"]);
        assert_eq!(found[0].source, CandidateSource::Keyword);
    }

    #[test]
    fn test_duplicates_keep_highest_priority_source() {
        let engine = CompletionEngine::new();
        let found = engine.candidates("print", Language::Python, "print = 3\n");
        assert_eq!(found, vec![Candidate::new("print", CandidateSource::Builtin)]);
    }

    #[test]
    fn test_scraped_names_are_offered() {
        let engine = CompletionEngine::new();
        let code = "counter_total = 0\ncounter_max = 10\n";
        let found = engine.candidates("counter", Language::Python, code);
        assert_eq!(texts(&found), vec!["counter_max", "counter_total"]);
        assert!(found.iter().all(|c| c.source == CandidateSource::Scraped));
    }

    #[test]
    fn test_result_is_capped() {
        let code: String = (0..50).map(|i| format!("item_{i:02} = {i}\n")).collect();
        let found = CompletionEngine::new().candidates("item_", Language::Python, &code);
        assert_eq!(found.len(), MAX_CANDIDATES);
        assert_eq!(found[0].text, "item_00");
        assert_eq!(found[19].text, "item_19");
    }

    #[test]
    fn test_empty_word_has_no_candidates() {
        assert!(CompletionEngine::new()
            .candidates("", Language::Python, "x = 1")
            .is_empty());
    }

    #[test]
    fn test_commit_builtin_adds_parens() {
        let mut buf = TextBuffer::from_text("pri");
        buf.set_caret(0, 3);
        let anchor = current_word(&buf).unwrap();
        commit(&mut buf, &anchor, &Candidate::new("print", CandidateSource::Builtin));
        assert_eq!(buf.text(), "print()");
        assert_eq!(buf.caret(), Caret::new(0, 6));
    }

    #[test]
    fn test_commit_replaces_only_the_word() {
        let mut buf = TextBuffer::from_text("x = val + 1\nnext");
        buf.set_caret(0, 6);
        let anchor = current_word(&buf).unwrap();
        commit(&mut buf, &anchor, &Candidate::new("value", CandidateSource::Scraped));
        assert_eq!(buf.text(), "x = value + 1\nnext");
        assert_eq!(buf.caret(), Caret::new(0, 9));
    }
}
