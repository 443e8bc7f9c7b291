//! Lead board: pipelines of ordered columns and the leads placed in them.
//!
//! ## Overview
//!
//! A lead carries one position per pipeline (`pipeline id -> column id`).
//! Columns never list their leads; membership is always derived by scanning
//! the lead collection. Column order is dense (`0..n-1`) after every
//! operation.
//!
//! ## Module Map
//!
//! ```text
//!   CLI / caller
//!        │
//!        v
//!   engine.rs   (Board: snapshot owner, selection, drag, flush)
//!        │
//!        ├── columns.rs   rename / add / move / delete on a Pipeline
//!        │      └── ordering.rs   dense-order primitives
//!        ├── leads.rs     LeadStore: move, add, labels, filters
//!        │      └── positions.rs  PositionMap
//!        ├── selection.rs / drag.rs   transient view state
//!        v
//!   store.rs    (BoardStorage over a KeyValueBackend)
//!        └── seed.rs      demo data for an empty store
//! ```
//!
//! ## Supporting Modules
//!
//! | Module   | Responsibility                                          |
//! |----------|---------------------------------------------------------|
//! | `models` | `Column`, `Pipeline`, `Lead`, `Tag`, `DeletePolicy`     |
//! | `ids`    | `IdGenerator` trait, UUID and sequential generators     |

pub mod columns;
pub mod drag;
pub mod engine;
pub mod ids;
pub mod leads;
pub mod models;
pub mod ordering;
pub mod positions;
pub mod seed;
pub mod selection;
pub mod store;

pub use columns::ColumnDeletion;
pub use drag::{DragPayload, DragState, Gesture};
pub use engine::{Board, BoardOptions, DropOutcome};
pub use ids::{IdGenerator, IdStrategy, SequentialIds, UuidIds};
pub use leads::{LeadFilter, LeadStore};
pub use models::{
    BoardView, CardFields, Column, ColumnView, ConnectionStatus, DeletePolicy, Lead, NewLead,
    Pipeline, Settings, Tag, TagColor,
};
pub use positions::PositionMap;
pub use selection::Selection;
pub use store::{BoardStorage, FileBackend, KeyValueBackend, MemoryBackend};
