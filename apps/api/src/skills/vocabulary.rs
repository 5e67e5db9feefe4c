//! Skill vocabulary: the fixed list of terms the matcher looks for.
//!
//! Loaded once at startup (built-in list or `SKILLS_FILE`) and shared read-only
//! behind an `Arc`. Nothing mutates it after construction.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Built-in vocabulary, grouped by area. Entries are lowercase; some are phrases.
#[rustfmt::skip]
pub const DEFAULT_SKILLS: &[&str] = &[
    // Languages
    "python", "java", "javascript", "typescript", "c", "c++", "c#", "go", "golang",
    "ruby", "php", "swift", "kotlin", "r", "perl", "dart", "scala", "rust",
    "objective-c", "matlab", "shell", "powershell", "visual basic", "assembly", "lua",
    // Frontend
    "html", "css", "bootstrap", "sass", "less", "jquery", "react", "vue.js",
    "angular", "svelte", "next.js", "nuxt.js", "elm", "redux", "tailwind",
    // Backend
    "node.js", "express.js", "nest.js", "django", "flask", "fastapi", "spring",
    "spring boot", "asp.net", "laravel", "symfony", "rails", "ruby on rails",
    "cakephp", "gin",
    // Mobile
    "flutter", "react native", "xamarin", "jetpack compose", "kotlin multi-platform",
    "android", "ios",
    // Data
    "sql", "mysql", "postgresql", "sqlite", "mongodb", "redis", "couchdb",
    "cassandra", "hive", "bigquery", "clickhouse", "elasticsearch", "spark",
    "hadoop", "presto", "dask", "pandas", "numpy", "kafka", "rabbitmq",
    // DevOps
    "docker", "kubernetes", "jenkins", "terraform", "ansible", "puppet",
    "saltstack", "vagrant", "nginx", "apache", "haproxy", "prometheus",
    "grafana", "elastic stack", "splunk", "bash", "zabbix", "devops",
    // Cloud
    "aws", "amazon web services", "azure", "google cloud platform", "ibm cloud",
    "oracle cloud", "digitalocean", "heroku", "vercel",
    // ML / data science
    "tensorflow", "keras", "pytorch", "scikit-learn", "xgboost", "lightgbm",
    "mlflow", "data analysis", "machine learning", "deep learning",
    "computer vision", "natural language processing", "data science", "big data",
    "openai", "huggingface",
    // Graphics
    "three.js", "unity", "unreal engine", "blender",
    // APIs
    "graphql", "rest", "soap", "grpc", "json", "microservices",
    // Testing
    "selenium", "cypress", "pytest", "junit", "mocha", "jest", "karma", "jasmine",
    "appium", "testng", "postman", "jmeter", "soapui", "katalon studio", "tdd", "bdd",
    // Virtualization
    "vmware", "hyper-v", "qemu", "virtualbox",
    // Security
    "penetration testing", "ethical hacking", "kali linux", "nessus", "nmap",
    // Tooling
    "git", "github", "gitlab", "bitbucket", "ci/cd", "linux", "unix",
    "shell scripting", "firebase", "stripe", "mapbox", "openstreetmap", "jira",
    "scrum", "agile",
];

/// Ordered, duplicate-free set of lowercase skill terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, lowercasing entries and collapsing internal whitespace.
    /// Blank entries and repeats are dropped; first occurrence keeps its position.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| {
                t.as_ref()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { terms }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_SKILLS)
    }

    /// Parses one term per line. Lines starting with `#` are comments
    /// (a `#` elsewhere is part of the term, as in `c#`).
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read skills file {}", path.display()))?;
        let vocabulary = Self::parse(&raw);
        if vocabulary.is_empty() {
            bail!("skills file {} contains no terms", path.display());
        }
        Ok(vocabulary)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_lowercases_and_dedupes_in_order() {
        let vocab = SkillVocabulary::new(["Python", "SQL", "python", "  ", "Machine   Learning"]);
        assert_eq!(vocab.terms(), ["python", "sql", "machine learning"]);
    }

    #[test]
    fn test_builtin_has_no_duplicates() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len());
        assert!(vocab.terms().iter().any(|t| t == "machine learning"));
    }

    #[test]
    fn test_parse_skips_comment_lines_but_keeps_hash_terms() {
        let vocab = SkillVocabulary::parse("# languages\nrust\nc#\n\n  # tools\ngit\n");
        assert_eq!(vocab.terms(), ["rust", "c#", "git"]);
    }

    #[test]
    fn test_from_file_reads_terms() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "kafka\ndata analysis").unwrap();
        let vocab = SkillVocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocab.terms(), ["kafka", "data analysis"]);
    }

    #[test]
    fn test_from_file_rejects_empty_vocabulary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        let err = SkillVocabulary::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("no terms"));
    }

    #[test]
    fn test_from_file_missing_path_errors() {
        let err = SkillVocabulary::from_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read skills file"));
    }
}
