// Skill analysis pipeline.
// normalizer → matcher (over an injected vocabulary) → extractor per posting →
// aggregator over paginated hh.ru results → report.

use std::collections::BTreeSet;

pub mod aggregator;
pub mod extractor;
pub mod handlers;
pub mod matcher;
pub mod normalizer;
pub mod report;
pub mod vocabulary;

/// Distinct skill terms found in one posting. Presence, not frequency.
pub type SkillHit = BTreeSet<String>;
