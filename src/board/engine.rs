//! The board: single owner of the in-memory snapshot.
//!
//! Every mutation goes through a `&mut self` method here. A method validates
//! first, applies the change to a copy of the affected collection, writes
//! the copy to storage and only then swaps it in. A rejected operation or a
//! failed write leaves the snapshot untouched.

use tracing::{debug, info, warn};

use super::columns::ColumnDeletion;
use super::drag::{self, DragPayload, DragState};
use super::ids::{IdGenerator, IdStrategy};
use super::leads::{LeadFilter, LeadStore};
use super::models::{
    BoardView, Column, ColumnView, DeletePolicy, Lead, NewLead, Pipeline, Settings, Tag,
};
use super::ordering;
use super::selection::Selection;
use super::store::{BoardStorage, KeyValueBackend};
use crate::errors::{BoardError, BoardResult};

/// How a board is opened.
#[derive(Debug, Clone)]
pub struct BoardOptions {
    /// Seed demo data into collections that have never been written.
    pub seed_demo_data: bool,
    pub id_strategy: IdStrategy,
    /// Pipeline shown first. Falls back to the first stored pipeline.
    pub default_pipeline: Option<String>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            id_strategy: IdStrategy::Uuid,
            default_pipeline: None,
        }
    }
}

/// Result of dropping a transfer payload on a column.
#[derive(Debug)]
pub enum DropOutcome {
    ColumnMoved {
        column_id: String,
        new_order: u32,
        changed: bool,
    },
    LeadsMoved {
        target_column_id: String,
        lead_ids: Vec<String>,
        moved: usize,
    },
    /// The drop was refused and nothing changed.
    Rejected(BoardError),
}

pub struct Board<B: KeyValueBackend> {
    storage: BoardStorage<B>,
    pipelines: Vec<Pipeline>,
    leads: LeadStore,
    settings: Settings,
    active_pipeline: String,
    filter: LeadFilter,
    selection: Selection,
    drag: DragState,
    ids: Box<dyn IdGenerator>,
}

/// Log a refused operation and hand the result back unchanged.
fn logged<T>(op: &'static str, result: BoardResult<T>) -> BoardResult<T> {
    if let Err(e) = &result {
        warn!(op, error = %e, "Board operation rejected");
    }
    result
}

impl<B: KeyValueBackend> Board<B> {
    pub fn open(mut storage: BoardStorage<B>, options: &BoardOptions) -> BoardResult<Self> {
        if options.seed_demo_data && storage.initialize().map_err(BoardError::Storage)? {
            info!("Seeded empty store with demo data");
        }
        let mut pipelines = storage.load_pipelines().map_err(BoardError::Storage)?;
        let leads = storage.load_leads().map_err(BoardError::Storage)?;
        let settings = storage.load_settings().map_err(BoardError::Storage)?;

        for pipeline in &mut pipelines {
            if !ordering::is_dense(&pipeline.columns) {
                warn!(pipeline_id = %pipeline.id, "Stored column order has gaps; renumbering");
                ordering::close_gaps(&mut pipeline.columns);
            }
        }

        let active_pipeline = options
            .default_pipeline
            .as_ref()
            .filter(|id| pipelines.iter().any(|p| &p.id == *id))
            .or_else(|| pipelines.first().map(|p| &p.id))
            .cloned()
            .unwrap_or_default();

        let existing = pipelines
            .iter()
            .flat_map(|p| p.columns.iter().map(|c| c.id.as_str()))
            .chain(leads.iter().map(|l| l.id.as_str()));
        let ids = options.id_strategy.generator(existing);

        debug!(
            pipelines = pipelines.len(),
            leads = leads.len(),
            active = %active_pipeline,
            "Board opened"
        );

        Ok(Self {
            storage,
            pipelines,
            leads: LeadStore::new(leads),
            settings,
            active_pipeline,
            filter: LeadFilter::default(),
            selection: Selection::new(),
            drag: DragState::default(),
            ids,
        })
    }

    // ── Snapshot reads ────────────────────────────────────────────────

    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    pub fn pipeline(&self, pipeline_id: &str) -> BoardResult<&Pipeline> {
        self.pipelines
            .iter()
            .find(|p| p.id == pipeline_id)
            .ok_or_else(|| BoardError::PipelineNotFound {
                id: pipeline_id.to_string(),
            })
    }

    pub fn active_pipeline_id(&self) -> &str {
        &self.active_pipeline
    }

    pub fn active_pipeline(&self) -> BoardResult<&Pipeline> {
        self.pipeline(&self.active_pipeline)
    }

    pub fn leads(&self) -> &[Lead] {
        self.leads.leads()
    }

    pub fn lead(&self, lead_id: &str) -> Option<&Lead> {
        self.leads.get(lead_id)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &BoardStorage<B> {
        &self.storage
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_bulk_mode(&self) -> bool {
        self.selection.is_bulk_mode()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn filter(&self) -> &LeadFilter {
        &self.filter
    }

    /// Leads in a column of the given pipeline, recomputed on every call.
    pub fn column_leads(&self, pipeline_id: &str, column_id: &str) -> Vec<&Lead> {
        self.leads.column_leads(pipeline_id, column_id)
    }

    /// Leads of a column in the active view, after the current filter.
    pub fn visible_column_leads(&self, column_id: &str) -> Vec<&Lead> {
        self.leads
            .visible_column_leads(&self.active_pipeline, column_id, &self.filter)
    }

    pub fn all_tags(&self) -> Vec<Tag> {
        self.leads.all_tags()
    }

    /// Columns of the active pipeline in display order, each with its
    /// filtered leads.
    pub fn board_view(&self) -> BoardResult<BoardView> {
        let pipeline = self.active_pipeline()?;
        let columns = pipeline
            .sorted_columns()
            .into_iter()
            .map(|column| ColumnView {
                column: column.clone(),
                leads: self
                    .visible_column_leads(&column.id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();
        Ok(BoardView {
            pipeline_id: pipeline.id.clone(),
            pipeline_name: pipeline.name.clone(),
            columns,
        })
    }

    // ── Persistence ───────────────────────────────────────────────────

    fn pipeline_index(&self, pipeline_id: &str) -> BoardResult<usize> {
        self.pipelines
            .iter()
            .position(|p| p.id == pipeline_id)
            .ok_or_else(|| BoardError::PipelineNotFound {
                id: pipeline_id.to_string(),
            })
    }

    /// Write `draft` in place of pipeline `index`, then adopt it.
    fn commit_pipeline(&mut self, index: usize, draft: Pipeline) -> BoardResult<()> {
        let mut next = self.pipelines.clone();
        next[index] = draft;
        self.storage
            .save_pipelines(&next)
            .map_err(BoardError::Storage)?;
        self.pipelines = next;
        Ok(())
    }

    fn commit_leads(&mut self, next: LeadStore) -> BoardResult<()> {
        self.storage
            .save_leads(next.leads())
            .map_err(BoardError::Storage)?;
        self.leads = next;
        Ok(())
    }

    /// Apply `f` to a copy of one pipeline and commit it only on success.
    fn edit_pipeline<T>(
        &mut self,
        pipeline_id: &str,
        f: impl FnOnce(&mut Pipeline, &mut dyn IdGenerator) -> BoardResult<T>,
    ) -> BoardResult<T> {
        let index = self.pipeline_index(pipeline_id)?;
        let mut draft = self.pipelines[index].clone();
        let out = f(&mut draft, self.ids.as_mut())?;
        self.commit_pipeline(index, draft)?;
        Ok(out)
    }

    // ── Pipeline view ─────────────────────────────────────────────────

    /// Show another pipeline. Selection and any drag in flight are dropped.
    pub fn switch_pipeline(&mut self, pipeline_id: &str) -> BoardResult<()> {
        logged("switch_pipeline", self.pipeline_index(pipeline_id).map(|_| ()))?;
        self.active_pipeline = pipeline_id.to_string();
        self.selection.clear();
        self.drag.reset();
        info!(pipeline_id, "Switched pipeline");
        Ok(())
    }

    pub fn rename_pipeline(&mut self, pipeline_id: &str, name: &str) -> BoardResult<()> {
        let result = self.edit_pipeline(pipeline_id, |p, _| {
            let name = name.trim();
            if name.is_empty() {
                return Err(BoardError::EmptyName { what: "Pipeline" });
            }
            p.name = name.to_string();
            Ok(())
        });
        logged("rename_pipeline", result)?;
        info!(pipeline_id, name, "Pipeline renamed");
        Ok(())
    }

    pub fn set_filter(&mut self, filter: LeadFilter) {
        debug!(search = ?filter.search, tag = ?filter.tag_id, "Lead filter changed");
        self.filter = filter;
    }

    pub fn update_settings(&mut self, settings: Settings) -> BoardResult<()> {
        self.storage
            .save_settings(&settings)
            .map_err(BoardError::Storage)?;
        self.settings = settings;
        info!("Display settings saved");
        Ok(())
    }

    /// Replace everything with the demo data and reload.
    pub fn reset_demo_data(&mut self) -> BoardResult<()> {
        self.storage.reset().map_err(BoardError::Storage)?;
        let pipelines = self.storage.load_pipelines().map_err(BoardError::Storage)?;
        let leads = self.storage.load_leads().map_err(BoardError::Storage)?;
        let settings = self.storage.load_settings().map_err(BoardError::Storage)?;
        self.pipelines = pipelines;
        self.leads = LeadStore::new(leads);
        self.settings = settings;
        if self.pipeline_index(&self.active_pipeline).is_err() {
            self.active_pipeline = self
                .pipelines
                .first()
                .map(|p| p.id.clone())
                .unwrap_or_default();
        }
        self.selection.clear();
        self.drag.reset();
        info!("Demo data restored");
        Ok(())
    }

    // ── Columns ───────────────────────────────────────────────────────

    pub fn rename_column(
        &mut self,
        pipeline_id: &str,
        column_id: &str,
        new_name: &str,
    ) -> BoardResult<()> {
        let result = self.edit_pipeline(pipeline_id, |p, _| p.rename_column(column_id, new_name));
        logged("rename_column", result)?;
        info!(pipeline_id, column_id, name = new_name.trim(), "Column renamed");
        Ok(())
    }

    pub fn add_column(&mut self, pipeline_id: &str, name: &str) -> BoardResult<Column> {
        let result = self.edit_pipeline(pipeline_id, |p, ids| p.add_column(name, ids));
        let column = logged("add_column", result)?;
        info!(pipeline_id, column_id = %column.id, order = column.order, "Column added");
        Ok(column)
    }

    /// Returns `false` when the column was already at `new_order`.
    pub fn move_column(
        &mut self,
        pipeline_id: &str,
        column_id: &str,
        new_order: u32,
    ) -> BoardResult<bool> {
        let index = logged("move_column", self.pipeline_index(pipeline_id))?;
        let mut draft = self.pipelines[index].clone();
        let changed = logged("move_column", draft.move_column(column_id, new_order))?;
        if !changed {
            debug!(pipeline_id, column_id, new_order, "Column already in place");
            return Ok(false);
        }
        self.commit_pipeline(index, draft)?;
        info!(pipeline_id, column_id, new_order, "Columns reordered");
        Ok(true)
    }

    /// Delete with the default policy: leads go to the preceding column.
    pub fn delete_column(&mut self, pipeline_id: &str, column_id: &str) -> BoardResult<ColumnDeletion> {
        let policy = logged(
            "delete_column",
            self.pipeline(pipeline_id)
                .and_then(|p| p.default_delete_policy(column_id)),
        )?;
        self.delete_column_with_policy(pipeline_id, column_id, policy)
    }

    pub fn delete_column_with_policy(
        &mut self,
        pipeline_id: &str,
        column_id: &str,
        policy: DeletePolicy,
    ) -> BoardResult<ColumnDeletion> {
        let index = logged("delete_column", self.pipeline_index(pipeline_id))?;
        let mut draft = self.pipelines[index].clone();
        let mut leads = self.leads.clone();
        let outcome = logged(
            "delete_column",
            draft.delete_column(column_id, &policy, leads.leads_mut(), &self.pipelines),
        )?;

        // Leads go first: until the pipelines land, every relocated position
        // still names a column that exists on disk.
        self.storage
            .save_leads(leads.leads())
            .map_err(BoardError::Storage)?;
        let mut next = self.pipelines.clone();
        next[index] = draft;
        if let Err(e) = self.storage.save_pipelines(&next) {
            if let Err(restore) = self.storage.save_leads(self.leads.leads()) {
                warn!(error = %restore, "Failed to restore stored leads after a failed delete");
            }
            return Err(BoardError::Storage(e));
        }
        self.pipelines = next;
        self.leads = leads;
        info!(
            pipeline_id,
            column_id,
            policy = policy.as_str(),
            affected_leads = outcome.affected_leads,
            "Column deleted"
        );
        Ok(outcome)
    }

    // ── Leads ─────────────────────────────────────────────────────────

    /// Place every listed lead in `target_column_id`. The column must exist
    /// in the pipeline.
    pub fn move_leads(
        &mut self,
        pipeline_id: &str,
        lead_ids: &[String],
        target_column_id: &str,
    ) -> BoardResult<usize> {
        let target = self.pipeline(pipeline_id).and_then(|p| {
            if p.has_column(target_column_id) {
                Ok(())
            } else {
                Err(BoardError::ColumnNotFound {
                    pipeline_id: pipeline_id.to_string(),
                    column_id: target_column_id.to_string(),
                })
            }
        });
        logged("move_leads", target)?;
        if lead_ids.is_empty() {
            return Ok(0);
        }

        let mut next = self.leads.clone();
        let moved = next.move_leads(pipeline_id, lead_ids, target_column_id);
        self.commit_leads(next)?;
        info!(pipeline_id, target_column_id, moved, "Leads moved");
        Ok(moved)
    }

    pub fn add_lead(&mut self, pipeline_id: &str, fields: NewLead) -> BoardResult<Lead> {
        let index = logged("add_lead", self.pipeline_index(pipeline_id))?;
        let mut next = self.leads.clone();
        let lead = logged(
            "add_lead",
            next.add_lead(&self.pipelines[index], fields, self.ids.as_mut()),
        )?;
        self.commit_leads(next)?;
        info!(pipeline_id, lead_id = %lead.id, name = %lead.name, "Lead added");
        Ok(lead)
    }

    pub fn set_lead_labels(&mut self, lead_id: &str, tag_ids: &[String]) -> BoardResult<Vec<Tag>> {
        let mut next = self.leads.clone();
        let tags = logged("set_lead_labels", next.set_lead_labels(lead_id, tag_ids))?;
        self.commit_leads(next)?;
        info!(lead_id, tags = tags.len(), "Lead labels updated");
        Ok(tags)
    }

    pub fn add_labels_to_column(
        &mut self,
        pipeline_id: &str,
        column_id: &str,
        tag_ids: &[String],
    ) -> BoardResult<usize> {
        let exists = self.pipeline(pipeline_id).map(|p| p.has_column(column_id));
        if !logged("add_labels_to_column", exists)? {
            return logged(
                "add_labels_to_column",
                Err(BoardError::ColumnNotFound {
                    pipeline_id: pipeline_id.to_string(),
                    column_id: column_id.to_string(),
                }),
            );
        }
        let mut next = self.leads.clone();
        let changed = next.add_labels_to_column(pipeline_id, column_id, tag_ids);
        if changed > 0 {
            self.commit_leads(next)?;
        }
        info!(pipeline_id, column_id, changed, "Column labels added");
        Ok(changed)
    }

    // ── Selection ─────────────────────────────────────────────────────

    pub fn select_lead(&mut self, lead_id: &str, selected: bool) {
        self.selection.select(lead_id, selected);
    }

    /// Toggle every visible lead of a column in the active pipeline.
    pub fn select_all_in_column(&mut self, column_id: &str) {
        let ids: Vec<String> = self
            .visible_column_leads(column_id)
            .into_iter()
            .map(|l| l.id.clone())
            .collect();
        self.selection.select_all(ids.iter().map(String::as_str));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Move every selected lead to a column of the active pipeline.
    pub fn move_selected(&mut self, target_column_id: &str) -> BoardResult<usize> {
        let ids = self.selection.ids();
        let pipeline_id = self.active_pipeline.clone();
        self.move_leads(&pipeline_id, &ids, target_column_id)
    }

    // ── Drag and drop (active pipeline) ───────────────────────────────

    /// Start dragging a lead card. Returns the encoded transfer payload.
    pub fn begin_lead_drag(&mut self, lead_id: &str) -> BoardResult<String> {
        if !self.leads.contains(lead_id) {
            return logged(
                "begin_lead_drag",
                Err(BoardError::LeadNotFound {
                    id: lead_id.to_string(),
                }),
            );
        }
        let payload = drag::lead_payload(lead_id, &mut self.selection);
        self.drag.begin(&payload);
        debug!(lead_id, payload = ?payload, "Lead drag started");
        payload.encode()
    }

    /// Start dragging a column by its grip. Returns the encoded payload.
    pub fn begin_column_drag(&mut self, column_id: &str) -> BoardResult<String> {
        let exists = self.active_pipeline().map(|p| p.has_column(column_id));
        if !logged("begin_column_drag", exists)? {
            return logged(
                "begin_column_drag",
                Err(BoardError::ColumnNotFound {
                    pipeline_id: self.active_pipeline.clone(),
                    column_id: column_id.to_string(),
                }),
            );
        }
        let payload = DragPayload::Column {
            column_id: column_id.to_string(),
        };
        self.drag.begin(&payload);
        debug!(column_id, "Column drag started");
        payload.encode()
    }

    /// Highlight a column as the current drop target.
    pub fn drag_over(&mut self, column_id: &str) {
        if !self.drag.is_idle() {
            self.drag.over(column_id);
        }
    }

    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Drag ended without a drop.
    pub fn end_drag(&mut self) {
        if !self.drag.is_idle() {
            debug!("Drag cancelled");
        }
        self.drag.reset();
    }

    /// Drop `transfer` on a column of the active pipeline.
    ///
    /// A column payload reorders columns and returns straight away; lead
    /// payloads move leads. Refused drops come back as
    /// [`DropOutcome::Rejected`]; only storage failures are errors.
    pub fn drop_on(&mut self, column_id: &str, transfer: &str) -> BoardResult<DropOutcome> {
        self.drag.reset();

        let payload = match DragPayload::decode(transfer) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, column_id, "Ignoring malformed drag payload");
                return Ok(DropOutcome::Rejected(e));
            }
        };

        let pipeline_id = self.active_pipeline.clone();
        let target_order = match self.pipeline(&pipeline_id) {
            Ok(p) => match p.column(column_id) {
                Some(c) => c.order,
                None => {
                    let e = BoardError::ColumnNotFound {
                        pipeline_id,
                        column_id: column_id.to_string(),
                    };
                    warn!(error = %e, "Drop on a column that no longer exists");
                    return Ok(DropOutcome::Rejected(e));
                }
            },
            Err(e) => return Ok(DropOutcome::Rejected(e)),
        };

        if let DragPayload::Column { column_id: dragged } = &payload {
            if dragged == column_id {
                return Ok(DropOutcome::ColumnMoved {
                    column_id: dragged.clone(),
                    new_order: target_order,
                    changed: false,
                });
            }
            return match self.move_column(&pipeline_id, dragged, target_order) {
                Ok(changed) => Ok(DropOutcome::ColumnMoved {
                    column_id: dragged.clone(),
                    new_order: target_order,
                    changed,
                }),
                Err(e @ BoardError::Storage(_)) => Err(e),
                Err(e) => Ok(DropOutcome::Rejected(e)),
            };
        }

        let lead_ids = payload.lead_ids().unwrap_or_default();
        match self.move_leads(&pipeline_id, &lead_ids, column_id) {
            Ok(moved) => Ok(DropOutcome::LeadsMoved {
                target_column_id: column_id.to_string(),
                lead_ids,
                moved,
            }),
            Err(e @ BoardError::Storage(_)) => Err(e),
            Err(e) => Ok(DropOutcome::Rejected(e)),
        }
    }
}
