use std::fmt::Write;

use crate::session::messages::NO_SKILLS;
use crate::skills::aggregator::BatchResult;

/// Renders the top `top_n` skills of a batch as display text.
///
/// The analyzed count is always stated; an empty ranking gets its own message
/// instead of an empty list.
pub fn format_report(result: &BatchResult, top_n: usize) -> String {
    let mut report = format!("Vacancies analyzed: {}\n", result.analyzed_count);

    if result.ranked.is_empty() {
        report.push_str(NO_SKILLS);
        return report;
    }

    let shown = result.ranked.len().min(top_n);
    let _ = writeln!(report, "Top {shown} skills:");
    for (position, entry) in result.ranked.iter().take(top_n).enumerate() {
        let _ = writeln!(
            report,
            "{}. {}: {}",
            position + 1,
            capitalize(&entry.skill),
            entry.count
        );
    }

    report.truncate(report.trim_end().len());
    report
}

/// Upper-cases the first character only: "ci/cd" becomes "Ci/cd".
pub fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::aggregator::SkillCount;

    fn result(ranked: &[(&str, usize)], analyzed_count: usize) -> BatchResult {
        BatchResult {
            ranked: ranked
                .iter()
                .map(|&(skill, count)| SkillCount {
                    skill: skill.to_string(),
                    count,
                })
                .collect(),
            analyzed_count,
        }
    }

    #[test]
    fn test_lists_ranked_skills_one_indexed() {
        let report = format_report(&result(&[("python", 12), ("sql", 7)], 20), 10);
        assert_eq!(
            report,
            "Vacancies analyzed: 20\nTop 2 skills:\n1. Python: 12\n2. Sql: 7"
        );
    }

    #[test]
    fn test_truncates_to_top_n() {
        let report = format_report(&result(&[("a", 3), ("b", 2), ("c", 1)], 3), 2);
        assert!(report.contains("Top 2 skills:"));
        assert!(report.contains("2. B: 2"));
        assert!(!report.contains("C: 1"));
    }

    #[test]
    fn test_empty_ranking_is_distinct_and_reports_count() {
        let empty = format_report(&result(&[], 5), 10);
        assert!(empty.contains('5'));
        assert!(empty.contains(NO_SKILLS));
        assert_ne!(empty, format_report(&result(&[("python", 1)], 5), 10));
    }

    #[test]
    fn test_zero_analyzed() {
        let report = format_report(&BatchResult::default(), 10);
        assert_eq!(report, format!("Vacancies analyzed: 0\n{NO_SKILLS}"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("machine learning"), "Machine learning");
        assert_eq!(capitalize("c++"), "C++");
        assert_eq!(capitalize("английский"), "Английский");
        assert_eq!(capitalize(""), "");
    }
}
