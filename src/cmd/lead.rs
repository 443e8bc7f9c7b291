//! Lead commands (`leadboard lead`).

use anyhow::Result;
use console::style;

use leadboard::board::NewLead;
use leadboard::config::BoardConfig;

use super::board::open_board;
use super::super::LeadCommands;

pub fn cmd_lead(config: &BoardConfig, command: &LeadCommands) -> Result<()> {
    let mut board = open_board(config)?;
    let pipeline_id = board.active_pipeline_id().to_string();

    match command {
        LeadCommands::Add {
            name,
            job_title,
            company,
        } => {
            let fields = NewLead {
                name: name.clone(),
                job_title: job_title.clone(),
                company: company.clone(),
                ..NewLead::default()
            };
            let lead = board.add_lead(&pipeline_id, fields)?;
            let column = lead.column_in(&pipeline_id).unwrap_or_default();
            println!(
                "Added lead {} ({}) to {}",
                style(&lead.name).bold(),
                lead.id,
                column
            );
        }
        LeadCommands::Move { to, lead_ids } => {
            for lead_id in lead_ids {
                board.select_lead(lead_id, true);
            }
            let moved = board.move_selected(to)?;
            println!("Moved {} lead(s) to {}", moved, to);
            if moved < lead_ids.len() {
                println!(
                    "{} {} id(s) did not match any lead",
                    style("Note:").yellow(),
                    lead_ids.len() - moved
                );
            }
        }
        LeadCommands::Labels { lead_id, tags } => {
            let applied = board.set_lead_labels(lead_id, tags)?;
            if applied.is_empty() {
                println!("Cleared tags on {}", lead_id);
            } else {
                let names: Vec<&str> = applied.iter().map(|t| t.name.as_str()).collect();
                println!("Tagged {} with {}", lead_id, names.join(", "));
            }
            if applied.len() < tags.len() {
                println!(
                    "{} {} unknown tag id(s) ignored",
                    style("Note:").yellow(),
                    tags.len() - applied.len()
                );
            }
        }
    }
    Ok(())
}
