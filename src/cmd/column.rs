//! Column commands (`leadboard column`).

use anyhow::{Context, Result};
use console::style;

use leadboard::board::DeletePolicy;
use leadboard::config::BoardConfig;

use super::board::open_board;
use super::super::{ColumnCommands, DeleteArg};

pub fn cmd_column(config: &BoardConfig, command: &ColumnCommands) -> Result<()> {
    let mut board = open_board(config)?;
    let pipeline_id = board.active_pipeline_id().to_string();

    match command {
        ColumnCommands::Add { name } => {
            let column = board.add_column(&pipeline_id, name)?;
            println!(
                "Added column {} ({}) at position {}",
                style(&column.name).bold(),
                column.id,
                column.order
            );
        }
        ColumnCommands::Rename { column_id, name } => {
            board.rename_column(&pipeline_id, column_id, name)?;
            println!("Renamed column {} to \"{}\"", column_id, name.trim());
        }
        ColumnCommands::Move { column_id, order } => {
            if board.move_column(&pipeline_id, column_id, *order)? {
                let order = board
                    .pipeline(&pipeline_id)?
                    .column(column_id)
                    .map(|c| c.order)
                    .unwrap_or(*order);
                println!("Moved column {} to position {}", column_id, order);
            } else {
                println!("Column {} is already at position {}", column_id, order);
            }
        }
        ColumnCommands::Label { column_id, tags } => {
            let changed = board.add_labels_to_column(&pipeline_id, column_id, tags)?;
            println!("Tagged {} lead(s) in {}", changed, column_id);
        }
        ColumnCommands::Delete {
            column_id,
            policy,
            target_column,
            target_pipeline,
        } => {
            let outcome = match policy {
                DeleteArg::Previous => board.delete_column(&pipeline_id, column_id)?,
                DeleteArg::Delete => {
                    board.delete_column_with_policy(&pipeline_id, column_id, DeletePolicy::Delete)?
                }
                DeleteArg::Move => {
                    let policy = DeletePolicy::Move {
                        target_column_id: target_column.clone().unwrap_or_default(),
                    };
                    board.delete_column_with_policy(&pipeline_id, column_id, policy)?
                }
                DeleteArg::Add => {
                    let policy = DeletePolicy::Add {
                        target_pipeline_id: target_pipeline
                            .clone()
                            .context("--policy add needs --target-pipeline")?,
                        target_column_id: target_column
                            .clone()
                            .context("--policy add needs --target-column")?,
                    };
                    board.delete_column_with_policy(&pipeline_id, column_id, policy)?
                }
            };

            println!(
                "Deleted column {} ({} lead(s), policy: {})",
                style(&outcome.column.name).bold(),
                outcome.affected_leads,
                outcome.policy.as_str()
            );
            match &outcome.policy {
                DeletePolicy::Move { target_column_id } => {
                    println!("  Leads moved to {}", target_column_id)
                }
                DeletePolicy::Add {
                    target_pipeline_id,
                    target_column_id,
                } => println!("  Leads moved to {} / {}", target_pipeline_id, target_column_id),
                DeletePolicy::Delete => {}
            }
        }
    }
    Ok(())
}
