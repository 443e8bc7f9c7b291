//! Identifier generation for new columns and leads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const COLUMN_PREFIX: &str = "col-";
pub const LEAD_PREFIX: &str = "lead-";

pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// `{prefix}{uuid-v4}`. Safe under rapid creation.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}{}", prefix, Uuid::new_v4())
    }
}

/// `{prefix}{n}` from a monotonic counter shared across prefixes.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Start after the highest counter already present in `existing`, so ids
    /// from an earlier session are never handed out again.
    pub fn resuming<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let highest = existing
            .into_iter()
            .filter_map(sequence_number)
            .max()
            .unwrap_or(0);
        Self {
            next: highest.saturating_add(1),
        }
    }
}

/// The counter in `col-<n>` or `lead-<n>`. Anything else after the prefix,
/// such as a UUID, is not a sequence number.
fn sequence_number(id: &str) -> Option<u64> {
    let suffix = id
        .strip_prefix(COLUMN_PREFIX)
        .or_else(|| id.strip_prefix(LEAD_PREFIX))?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Which generator a board uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl IdStrategy {
    pub fn generator<'a>(
        self,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Box<dyn IdGenerator> {
        match self {
            Self::Uuid => Box::new(UuidIds),
            Self::Sequential => Box::new(SequentialIds::resuming(existing)),
        }
    }
}

impl std::fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdStrategy::Uuid => write!(f, "uuid"),
            IdStrategy::Sequential => write!(f, "sequential"),
        }
    }
}

impl std::str::FromStr for IdStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "sequential" => Ok(IdStrategy::Sequential),
            _ => anyhow::bail!("Invalid id strategy '{}'. Valid values: uuid, sequential", s),
        }
    }
}
