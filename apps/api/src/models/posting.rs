use serde::{Deserialize, Serialize};

/// One job listing as returned by the hh.ru vacancies API.
///
/// Every field is optional: search results carry `snippet` but no `key_skills`,
/// full vacancy documents carry `key_skills` and an HTML `description`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: Option<String>,
    pub name: Option<String>,
    pub employer: Option<Employer>,
    pub alternate_url: Option<String>,
    /// Employer-tagged skills.
    #[serde(rename = "key_skills")]
    pub skills: Option<Vec<SkillTag>>,
    pub snippet: Option<Snippet>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employer {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillTag {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
}

impl Posting {
    /// Non-blank employer-tagged skill names, verbatim.
    pub fn structured_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .flatten()
            .map(|tag| tag.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }

    pub fn requirement(&self) -> Option<&str> {
        self.snippet.as_ref()?.requirement.as_deref()
    }

    pub fn responsibility(&self) -> Option<&str> {
        self.snippet.as_ref()?.responsibility.as_deref()
    }

    pub fn employer_name(&self) -> Option<&str> {
        self.employer.as_ref()?.name.as_deref()
    }
}

/// One page of `GET /vacancies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacancyPage {
    #[serde(default)]
    pub items: Vec<Posting>,
    pub found: Option<u64>,
    pub pages: Option<u32>,
}
