//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled                                       |
//! |-----------|--------------------------------------------------------|
//! | `project` | `Init`, `Reset`                                        |
//! | `board`   | `Pipelines`, `Show`, `RenamePipeline`, `Tags`, `Drop`, `Cards` |
//! | `column`  | `Column`                                               |
//! | `lead`    | `Lead`                                                 |
//! | `config`  | `Config`                                               |

pub mod board;
pub mod column;
pub mod config;
pub mod lead;
pub mod project;

pub use board::{cmd_cards, cmd_drop, cmd_pipelines, cmd_rename_pipeline, cmd_show, cmd_tags};
pub use column::cmd_column;
pub use config::cmd_config;
pub use lead::cmd_lead;
pub use project::{cmd_init, cmd_reset};
