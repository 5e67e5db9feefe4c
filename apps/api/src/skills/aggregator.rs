//! Batch aggregator: pages through hh.ru results up to a sample-size target and
//! folds per-posting skill hits into a ranked frequency table.
//!
//! Upstream faults never escape: an error, a timeout, an empty page or a short
//! page all end the loop and the postings collected so far are reported.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::hh_client::PostingSource;
use crate::skills::extractor::SkillExtractor;
use crate::skills::SkillHit;

/// hh.ru rejects `per_page` above 100.
pub const MAX_PAGE_SIZE: usize = 100;

/// Validated sampling parameters for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOptions {
    target_sample_size: usize,
    page_size: usize,
}

impl SampleOptions {
    pub fn new(target_sample_size: usize, page_size: usize) -> Result<Self, AppError> {
        if target_sample_size == 0 {
            return Err(AppError::Validation(
                "target sample size must be at least 1".to_string(),
            ));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self {
            target_sample_size,
            page_size,
        })
    }

    pub fn target_sample_size(&self) -> usize {
        self.target_sample_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

/// A skill and the number of analyzed postings that mention it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Sorted by count descending; ties keep first-seen order.
    pub ranked: Vec<SkillCount>,
    pub analyzed_count: usize,
}

/// Skill → count, remembering the order in which skills were first seen.
#[derive(Debug, Default)]
pub struct FrequencyMap {
    index: HashMap<String, usize>,
    entries: Vec<SkillCount>,
}

impl FrequencyMap {
    /// Adds one to every skill in the hit. A hit is a set, so a posting
    /// contributes at most one per skill.
    pub fn record(&mut self, hit: &SkillHit) {
        for skill in hit {
            match self.index.get(skill) {
                Some(&position) => self.entries[position].count += 1,
                None => {
                    self.index.insert(skill.clone(), self.entries.len());
                    self.entries.push(SkillCount {
                        skill: skill.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    pub fn into_ranked(self) -> Vec<SkillCount> {
        let mut ranked = self.entries;
        // stable: equal counts stay in first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

/// Emits a percentage only when it strictly increases.
#[derive(Debug)]
struct ProgressTracker {
    target: usize,
    last_emitted: u8,
}

impl ProgressTracker {
    fn new(target: usize) -> Self {
        Self {
            target,
            last_emitted: 0,
        }
    }

    fn advance(&mut self, collected: usize) -> Option<u8> {
        let percent = (collected.saturating_mul(100) / self.target).min(100) as u8;
        if percent > self.last_emitted {
            self.last_emitted = percent;
            Some(percent)
        } else {
            None
        }
    }
}

/// Runs one aggregation. Pages are fetched strictly one after another.
///
/// Stops when a fetch fails, a page is empty, a page is shorter than
/// `page_size` (source exhausted), or the target sample size is reached.
/// `on_progress` sees strictly increasing percentages in `1..=100`.
pub async fn aggregate<F>(
    query: &str,
    options: &SampleOptions,
    source: &dyn PostingSource,
    extractor: &SkillExtractor,
    mut on_progress: F,
) -> BatchResult
where
    F: FnMut(u8) + Send,
{
    let page_size = options.page_size();
    let target = options.target_sample_size();

    let mut page_index = 0;
    let mut collected = 0;
    let mut analyzed_count = 0;
    let mut frequencies = FrequencyMap::default();
    let mut progress = ProgressTracker::new(target);

    info!("Aggregating skills for '{query}' (target {target}, page size {page_size})");

    loop {
        let postings = match source.fetch_page(query, page_index, page_size).await {
            Ok(postings) => postings,
            Err(e) => {
                warn!("Fetching page {page_index} for '{query}' failed, keeping partial sample: {e}");
                break;
            }
        };

        if postings.is_empty() {
            debug!("Page {page_index} for '{query}' is empty");
            break;
        }

        let page_len = postings.len();
        collected += page_len;

        for posting in &postings {
            frequencies.record(&extractor.extract(posting));
            analyzed_count += 1;
        }

        if let Some(percent) = progress.advance(collected) {
            on_progress(percent);
        }

        debug!("Page {page_index}: {page_len} postings, {collected}/{target} collected");

        if page_len < page_size || collected >= target {
            break;
        }

        page_index += 1;
    }

    let ranked = frequencies.into_ranked();
    info!(
        "Aggregation for '{query}' finished: {analyzed_count} postings, {} distinct skills",
        ranked.len()
    );

    BatchResult {
        ranked,
        analyzed_count,
    }
}
