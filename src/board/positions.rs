//! Per-lead position map: pipeline id → column id.
//!
//! The map is the only record of where a lead sits. A lead is on a pipeline
//! exactly when the pipeline id is a key here, and a key maps to one column,
//! so a lead can never occupy two columns of the same pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PositionMap(BTreeMap<String, String>);

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pipeline_id: &str) -> Option<&str> {
        self.0.get(pipeline_id).map(String::as_str)
    }

    pub fn contains(&self, pipeline_id: &str) -> bool {
        self.0.contains_key(pipeline_id)
    }

    /// Place the lead in `column_id`, replacing any previous column in the
    /// same pipeline. Returns the column it was in before.
    pub fn place(
        &mut self,
        pipeline_id: impl Into<String>,
        column_id: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(pipeline_id.into(), column_id.into())
    }

    /// Take the lead off a pipeline. Returns the column it was in.
    pub fn remove(&mut self, pipeline_id: &str) -> Option<String> {
        self.0.remove(pipeline_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for PositionMap {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(p, c)| (p.into(), c.into()))
                .collect(),
        )
    }
}
