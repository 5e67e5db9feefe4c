pub mod handlers;

use crate::models::posting::Posting;

/// One block per posting: "title - employer" then the link, blocks separated by a blank line.
pub fn format_search_results(postings: &[Posting]) -> String {
    postings
        .iter()
        .map(format_posting)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_posting(posting: &Posting) -> String {
    let title = posting.name.as_deref().unwrap_or("Untitled vacancy");
    let mut line = match posting.employer_name() {
        Some(employer) => format!("{title} - {employer}"),
        None => title.to_string(),
    };
    if let Some(url) = posting.alternate_url.as_deref() {
        line.push('\n');
        line.push_str(url);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::Employer;

    #[test]
    fn test_formats_title_employer_and_link() {
        let postings = vec![
            Posting {
                name: Some("Rust developer".into()),
                employer: Some(Employer {
                    name: Some("Acme".into()),
                }),
                alternate_url: Some("https://hh.ru/vacancy/1".into()),
                ..Default::default()
            },
            Posting {
                name: Some("Go developer".into()),
                ..Default::default()
            },
        ];

        assert_eq!(
            format_search_results(&postings),
            "Rust developer - Acme\nhttps://hh.ru/vacancy/1\n\nGo developer"
        );
    }

    #[test]
    fn test_missing_title_has_placeholder() {
        assert_eq!(format_search_results(&[Posting::default()]), "Untitled vacancy");
    }
}
