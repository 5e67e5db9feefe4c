//! Posting skill extractor: picks which fields of a posting to mine.
//!
//! Employer-tagged `key_skills` win outright and are returned verbatim. Only
//! when a posting has none do we fall back to running the vocabulary matcher
//! over its free text (snippet requirement + responsibility + description).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::posting::Posting;
use crate::skills::matcher::VocabularyMatcher;
use crate::skills::SkillHit;

/// HTML tags. hh.ru wraps query hits in `<highlighttext>` and descriptions are HTML.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

pub struct SkillExtractor {
    matcher: VocabularyMatcher,
}

impl SkillExtractor {
    pub fn new(matcher: VocabularyMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &VocabularyMatcher {
        &self.matcher
    }

    /// Never fails: a posting without any usable field yields an empty set.
    pub fn extract(&self, posting: &Posting) -> SkillHit {
        let tagged: SkillHit = posting.structured_skills().map(str::to_string).collect();
        if !tagged.is_empty() {
            return tagged;
        }

        let text = free_text(posting);
        self.matcher.matches(Some(&text))
    }
}

fn free_text(posting: &Posting) -> String {
    [
        posting.requirement(),
        posting.responsibility(),
        posting.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(|field| MARKUP.replace_all(field, " "))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::posting::{SkillTag, Snippet};
    use crate::skills::vocabulary::SkillVocabulary;

    fn extractor(terms: &[&str]) -> SkillExtractor {
        let vocabulary = Arc::new(SkillVocabulary::new(terms));
        SkillExtractor::new(VocabularyMatcher::new(vocabulary).unwrap())
    }

    fn snippet(requirement: Option<&str>, responsibility: Option<&str>) -> Option<Snippet> {
        Some(Snippet {
            requirement: requirement.map(str::to_string),
            responsibility: responsibility.map(str::to_string),
        })
    }

    fn hit(terms: &[&str]) -> SkillHit {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_structured_skills_pass_through_verbatim() {
        let posting = Posting {
            skills: Some(vec![
                SkillTag { name: "Python".to_string() },
                SkillTag { name: "SQL".to_string() },
            ]),
            snippet: snippet(Some("docker kubernetes machine learning"), None),
            ..Default::default()
        };

        let ex = extractor(&["docker", "kubernetes", "machine learning", "python"]);
        assert_eq!(ex.extract(&posting), hit(&["Python", "SQL"]));
    }

    #[test]
    fn test_unknown_structured_skills_are_not_filtered() {
        let posting = Posting {
            skills: Some(vec![SkillTag { name: "Переговоры".to_string() }]),
            ..Default::default()
        };
        assert_eq!(extractor(&["python"]).extract(&posting), hit(&["Переговоры"]));
    }

    #[test]
    fn test_empty_skill_list_falls_back_to_text() {
        let posting = Posting {
            skills: Some(vec![]),
            snippet: snippet(Some("Python, SQL"), Some("maintain Docker images")),
            ..Default::default()
        };
        assert_eq!(
            extractor(&["python", "sql", "docker"]).extract(&posting),
            hit(&["python", "sql", "docker"])
        );
    }

    #[test]
    fn test_blank_skill_names_fall_back_to_text() {
        let posting = Posting {
            skills: Some(vec![SkillTag { name: " ".to_string() }]),
            snippet: snippet(Some("git"), None),
            ..Default::default()
        };
        assert_eq!(extractor(&["git"]).extract(&posting), hit(&["git"]));
    }

    #[test]
    fn test_highlight_markup_is_stripped_before_phrase_matching() {
        let posting = Posting {
            snippet: snippet(
                Some("Знание <highlighttext>machine</highlighttext> learning и Python"),
                None,
            ),
            ..Default::default()
        };
        assert_eq!(
            extractor(&["machine learning", "python"]).extract(&posting),
            hit(&["machine learning", "python"])
        );
    }

    #[test]
    fn test_description_is_mined_when_snippet_missing() {
        let posting = Posting {
            description: Some("<ul><li>Kafka</li><li>big data</li></ul>".to_string()),
            ..Default::default()
        };
        assert_eq!(
            extractor(&["kafka", "big data"]).extract(&posting),
            hit(&["kafka", "big data"])
        );
    }

    #[test]
    fn test_repeated_mentions_count_once() {
        let posting = Posting {
            snippet: snippet(Some("python python"), Some("more python")),
            ..Default::default()
        };
        assert_eq!(extractor(&["python"]).extract(&posting), hit(&["python"]));
    }

    #[test]
    fn test_malformed_posting_yields_empty_set() {
        assert!(extractor(&["python"]).extract(&Posting::default()).is_empty());
    }
}
