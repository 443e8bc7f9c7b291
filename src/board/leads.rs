//! The global lead collection and the queries that derive column membership.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ids::{IdGenerator, LEAD_PREFIX};
use super::models::{Lead, NewLead, Pipeline, Tag};
use crate::errors::{BoardError, BoardResult};

pub const DEFAULT_LEAD_NAME: &str = "New Lead";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadStore {
    leads: Vec<Lead>,
}

impl LeadStore {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self { leads }
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn leads_mut(&mut self) -> &mut [Lead] {
        &mut self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn get(&self, lead_id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == lead_id)
    }

    pub fn contains(&self, lead_id: &str) -> bool {
        self.get(lead_id).is_some()
    }

    /// Point every listed lead at `target_column_id` in `pipeline_id`.
    ///
    /// Leads not yet on the pipeline gain an entry. Positions on other
    /// pipelines are left alone. Returns how many leads were written.
    pub fn move_leads(
        &mut self,
        pipeline_id: &str,
        lead_ids: &[String],
        target_column_id: &str,
    ) -> usize {
        if lead_ids.is_empty() {
            return 0;
        }
        let wanted: HashSet<&str> = lead_ids.iter().map(String::as_str).collect();
        let mut moved = 0;
        for lead in self.leads.iter_mut().filter(|l| wanted.contains(l.id.as_str())) {
            lead.pipeline_positions.place(pipeline_id, target_column_id);
            moved += 1;
        }
        moved
    }

    /// Create a lead in the first column (order 0) of `pipeline`.
    pub fn add_lead(
        &mut self,
        pipeline: &Pipeline,
        fields: NewLead,
        ids: &mut dyn IdGenerator,
    ) -> BoardResult<Lead> {
        let first_column = pipeline
            .first_column()
            .ok_or_else(|| BoardError::EmptyPipeline {
                pipeline_id: pipeline.id.clone(),
            })?;

        let name = fields
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEAD_NAME.to_string());

        let lead = Lead {
            id: ids.next_id(LEAD_PREFIX),
            name,
            photo_url: fields.photo_url.unwrap_or_default(),
            job_title: fields.job_title.unwrap_or_default(),
            company: fields.company.unwrap_or_default(),
            tags: fields.tags.unwrap_or_default(),
            connection_status: fields.connection_status.unwrap_or_default(),
            pipeline_positions: [(pipeline.id.as_str(), first_column.id.as_str())]
                .into_iter()
                .collect(),
        };
        self.leads.push(lead.clone());
        Ok(lead)
    }

    /// Leads in one column, derived from their positions on every call.
    pub fn column_leads(&self, pipeline_id: &str, column_id: &str) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|l| l.is_in(pipeline_id, column_id))
            .collect()
    }

    /// Leads in one column that also pass `filter`.
    pub fn visible_column_leads(
        &self,
        pipeline_id: &str,
        column_id: &str,
        filter: &LeadFilter,
    ) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|l| l.is_in(pipeline_id, column_id) && filter.matches(l, pipeline_id))
            .collect()
    }

    /// Every distinct tag carried by any lead, keyed by id. The first copy
    /// seen wins.
    pub fn all_tags(&self) -> Vec<Tag> {
        let mut seen: BTreeMap<&str, &Tag> = BTreeMap::new();
        for tag in self.leads.iter().flat_map(|l| l.tags.iter()) {
            seen.entry(tag.id.as_str()).or_insert(tag);
        }
        seen.into_values().cloned().collect()
    }

    fn resolve_tags(&self, tag_ids: &[String]) -> Vec<Tag> {
        let pool = self.all_tags();
        tag_ids
            .iter()
            .filter_map(|id| pool.iter().find(|t| t.id == *id).cloned())
            .collect()
    }

    /// Replace a lead's tags. Ids not in the tag pool are dropped.
    pub fn set_lead_labels(&mut self, lead_id: &str, tag_ids: &[String]) -> BoardResult<Vec<Tag>> {
        let tags = self.resolve_tags(tag_ids);
        let lead = self
            .leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or_else(|| BoardError::LeadNotFound {
                id: lead_id.to_string(),
            })?;
        lead.tags = tags.clone();
        Ok(tags)
    }

    /// Append tags to every lead in a column, skipping ones a lead already
    /// carries. Returns how many leads gained at least one tag.
    pub fn add_labels_to_column(
        &mut self,
        pipeline_id: &str,
        column_id: &str,
        tag_ids: &[String],
    ) -> usize {
        let tags = self.resolve_tags(tag_ids);
        if tags.is_empty() {
            return 0;
        }
        let mut changed = 0;
        for lead in self
            .leads
            .iter_mut()
            .filter(|l| l.is_in(pipeline_id, column_id))
        {
            let before = lead.tags.len();
            for tag in &tags {
                if !lead.has_tag(&tag.id) {
                    lead.tags.push(tag.clone());
                }
            }
            if lead.tags.len() > before {
                changed += 1;
            }
        }
        changed
    }
}

/// Search and tag filter for a pipeline view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub tag_id: Option<String>,
}

impl LeadFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            tag_id: None,
        }
    }

    pub fn with_tag(mut self, tag_id: impl Into<String>) -> Self {
        self.tag_id = Some(tag_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(str::is_empty) && self.tag_id.is_none()
    }

    /// A lead passes when it sits on the pipeline, matches the search term in
    /// its name, company or job title (case-insensitive), and carries the tag.
    pub fn matches(&self, lead: &Lead, pipeline_id: &str) -> bool {
        if !lead.pipeline_positions.contains(pipeline_id) {
            return false;
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            let hit = [&lead.name, &lead.company, &lead.job_title]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        match &self.tag_id {
            Some(tag_id) => lead.has_tag(tag_id),
            None => true,
        }
    }
}
