//! Column operations for a single pipeline.
//!
//! Columns never list their leads. Deleting a column therefore walks the lead
//! collection and rewrites the position of every lead that points at it,
//! according to the chosen [`DeletePolicy`].

use super::ids::{COLUMN_PREFIX, IdGenerator};
use super::models::{Column, DeletePolicy, Lead, Pipeline};
use super::ordering;
use crate::errors::{BoardError, BoardResult};

/// Outcome of a successful column deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDeletion {
    pub column: Column,
    pub policy: DeletePolicy,
    /// Leads that were sitting in the column when it was deleted.
    pub affected_leads: usize,
}

impl Pipeline {
    fn column_index(&self, column_id: &str) -> BoardResult<usize> {
        self.columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                pipeline_id: self.id.clone(),
                column_id: column_id.to_string(),
            })
    }

    pub fn rename_column(&mut self, column_id: &str, new_name: &str) -> BoardResult<()> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyName { what: "Column" });
        }
        let index = self.column_index(column_id)?;
        self.columns[index].name = name.to_string();
        Ok(())
    }

    /// Append a column at `order = len`.
    pub fn add_column(&mut self, name: &str, ids: &mut dyn IdGenerator) -> BoardResult<Column> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyName { what: "Column" });
        }
        let column = Column::new(
            ids.next_id(COLUMN_PREFIX),
            name,
            ordering::append_order(&self.columns),
        );
        self.columns.push(column.clone());
        Ok(column)
    }

    /// Move a column to `new_order`, shifting the columns in between.
    ///
    /// Returns `false` when the column already sits at that slot.
    pub fn move_column(&mut self, column_id: &str, new_order: u32) -> BoardResult<bool> {
        let index = self.column_index(column_id)?;
        Ok(ordering::move_to(&mut self.columns, index, new_order))
    }

    /// Policy used by a plain delete: relocate to the preceding column, or to
    /// the new first column when the first one goes. With no column left the
    /// leads drop off the pipeline.
    pub fn default_delete_policy(&self, column_id: &str) -> BoardResult<DeletePolicy> {
        let sorted = self.sorted_columns();
        let delete_index = sorted
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                pipeline_id: self.id.clone(),
                column_id: column_id.to_string(),
            })?;
        let remaining: Vec<&Column> = sorted.into_iter().filter(|c| c.id != column_id).collect();

        // Indexing the remainder makes "first column" fall through to its successor.
        Ok(match remaining.get(delete_index.saturating_sub(1)) {
            Some(col) => DeletePolicy::Move {
                target_column_id: col.id.clone(),
            },
            None => DeletePolicy::Delete,
        })
    }

    /// Delete a column, relocating its leads per `policy`, then close the gap
    /// in the remaining orders.
    ///
    /// `others` is consulted only by [`DeletePolicy::Add`] to validate the
    /// destination pipeline. Validation happens before anything is touched.
    pub fn delete_column(
        &mut self,
        column_id: &str,
        policy: &DeletePolicy,
        leads: &mut [Lead],
        others: &[Pipeline],
    ) -> BoardResult<ColumnDeletion> {
        let index = self.column_index(column_id)?;
        self.validate_policy(column_id, policy, others)?;

        let pipeline_id = self.id.clone();
        let mut affected_leads = 0;
        for lead in leads.iter_mut().filter(|l| l.is_in(&pipeline_id, column_id)) {
            match policy {
                DeletePolicy::Delete => {
                    lead.pipeline_positions.remove(&pipeline_id);
                }
                DeletePolicy::Move { target_column_id } => {
                    lead.pipeline_positions
                        .place(pipeline_id.as_str(), target_column_id.as_str());
                }
                DeletePolicy::Add {
                    target_pipeline_id,
                    target_column_id,
                } => {
                    lead.pipeline_positions.remove(&pipeline_id);
                    lead.pipeline_positions
                        .place(target_pipeline_id.as_str(), target_column_id.as_str());
                }
            }
            affected_leads += 1;
        }

        let column = self.columns.remove(index);
        ordering::close_gaps(&mut self.columns);

        Ok(ColumnDeletion {
            column,
            policy: policy.clone(),
            affected_leads,
        })
    }

    fn validate_policy(
        &self,
        column_id: &str,
        policy: &DeletePolicy,
        others: &[Pipeline],
    ) -> BoardResult<()> {
        match policy {
            DeletePolicy::Delete => Ok(()),
            DeletePolicy::Move { target_column_id } => {
                if target_column_id.trim().is_empty() {
                    return Err(BoardError::MissingTargetColumn {
                        column_id: column_id.to_string(),
                    });
                }
                if target_column_id == column_id {
                    return Err(BoardError::InvalidRelocationTarget {
                        message: format!("cannot move leads into column {} while deleting it", column_id),
                    });
                }
                self.column_index(target_column_id).map(|_| ())
            }
            DeletePolicy::Add {
                target_pipeline_id,
                target_column_id,
            } => {
                if target_pipeline_id.trim().is_empty() || target_column_id.trim().is_empty() {
                    return Err(BoardError::InvalidRelocationTarget {
                        message: "the add policy needs both a target pipeline and a target column"
                            .to_string(),
                    });
                }
                if *target_pipeline_id == self.id {
                    return Err(BoardError::InvalidRelocationTarget {
                        message: format!(
                            "pipeline {} is the source pipeline; use the move policy instead",
                            target_pipeline_id
                        ),
                    });
                }
                let target = others
                    .iter()
                    .find(|p| p.id == *target_pipeline_id)
                    .ok_or_else(|| BoardError::PipelineNotFound {
                        id: target_pipeline_id.clone(),
                    })?;
                target.column_index(target_column_id).map(|_| ())
            }
        }
    }
}
