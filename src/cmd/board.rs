//! Board views and pipeline-level commands.

use anyhow::Result;
use console::{Style, style};

use leadboard::board::{
    Board, CardFields, DropOutcome, FileBackend, Lead, LeadFilter, Tag, TagColor,
};
use leadboard::config::BoardConfig;

use super::super::CardField;

/// Open the board from configured storage, on the `--pipeline` if one was
/// given.
pub fn open_board(config: &BoardConfig) -> Result<Board<FileBackend>> {
    let mut board = Board::open(config.storage(), &config.board_options())?;
    if let Some(pipeline_id) = &config.cli_pipeline {
        board.switch_pipeline(pipeline_id)?;
    }
    Ok(board)
}

fn tag_style(color: TagColor) -> Style {
    match color {
        TagColor::Blue => Style::new().blue(),
        TagColor::Green => Style::new().green(),
        TagColor::Purple => Style::new().magenta(),
        TagColor::Amber => Style::new().yellow(),
        TagColor::Red => Style::new().red(),
    }
}

fn format_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| tag_style(t.color).apply_to(format!("#{}", t.name)).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(lead: &Lead, fields: &CardFields) -> String {
    let mut parts = vec![format!("{} {}", style(&lead.id).dim(), lead.name)];
    if fields.show_job_title && !lead.job_title.is_empty() {
        parts.push(lead.job_title.clone());
    }
    if fields.show_company && !lead.company.is_empty() {
        parts.push(lead.company.clone());
    }
    if fields.show_connection_status {
        parts.push(style(lead.connection_status.as_str()).italic().to_string());
    }
    let mut line = parts.join(" · ");
    if fields.show_tags && !lead.tags.is_empty() {
        line.push_str("  ");
        line.push_str(&format_tags(&lead.tags));
    }
    line
}

pub fn cmd_pipelines(config: &BoardConfig) -> Result<()> {
    let board = open_board(config)?;

    println!();
    println!("{:<16} {:<24} {:<8} Leads", "Pipeline", "Name", "Columns");
    println!("{:<16} {:<24} {:<8} -----", "--------", "----", "-------");
    for pipeline in board.pipelines() {
        let marker = if pipeline.id == board.active_pipeline_id() {
            "*"
        } else {
            " "
        };
        let leads = board
            .leads()
            .iter()
            .filter(|l| l.pipeline_positions.contains(&pipeline.id))
            .count();
        println!(
            "{}{:<15} {:<24} {:<8} {}",
            marker,
            pipeline.id,
            pipeline.name,
            pipeline.columns.len(),
            leads
        );
    }
    println!();
    Ok(())
}

pub fn cmd_show(config: &BoardConfig, search: Option<&str>, tag: Option<&str>) -> Result<()> {
    let mut board = open_board(config)?;
    let mut filter = LeadFilter::default();
    filter.search = search.map(str::to_string);
    filter.tag_id = tag.map(str::to_string);
    board.set_filter(filter);

    let view = board.board_view()?;
    let fields = &board.settings().card_fields;

    println!();
    println!(
        "{} ({})",
        style(&view.pipeline_name).bold().cyan(),
        style(&view.pipeline_id).dim()
    );
    println!();
    for column in &view.columns {
        println!(
            "{} {} {}",
            style(format!("[{}]", column.column.order)).dim(),
            style(&column.column.name).bold(),
            style(format!("({}, {})", column.column.id, column.leads.len())).dim()
        );
        if column.leads.is_empty() {
            println!("    {}", style("empty").dim());
        }
        for lead in &column.leads {
            println!("    {}", format_card(lead, fields));
        }
        println!();
    }
    Ok(())
}

pub fn cmd_rename_pipeline(config: &BoardConfig, name: &str) -> Result<()> {
    let mut board = open_board(config)?;
    let pipeline_id = board.active_pipeline_id().to_string();
    board.rename_pipeline(&pipeline_id, name)?;
    println!("Renamed pipeline {} to \"{}\"", pipeline_id, name.trim());
    Ok(())
}

pub fn cmd_tags(config: &BoardConfig) -> Result<()> {
    let board = open_board(config)?;
    let tags = board.all_tags();

    if tags.is_empty() {
        println!("No tags in use.");
        return Ok(());
    }
    for tag in tags {
        println!(
            "{:<10} {:<16} {}",
            tag.id,
            tag.name,
            tag_style(tag.color).apply_to(tag.color.as_str())
        );
    }
    Ok(())
}

pub fn cmd_drop(config: &BoardConfig, column_id: &str, payload: &str) -> Result<()> {
    let mut board = open_board(config)?;

    match board.drop_on(column_id, payload)? {
        DropOutcome::ColumnMoved {
            column_id,
            new_order,
            changed: true,
        } => println!("Moved column {} to position {}", column_id, new_order),
        DropOutcome::ColumnMoved { column_id, .. } => {
            println!("Column {} is already in place", column_id)
        }
        DropOutcome::LeadsMoved {
            target_column_id,
            moved,
            ..
        } => println!("Moved {} lead(s) to {}", moved, target_column_id),
        DropOutcome::Rejected(e) => {
            println!("{} {}", style("Drop ignored:").yellow(), e);
        }
    }
    Ok(())
}

pub fn cmd_cards(config: &BoardConfig, show: &[CardField], hide: &[CardField]) -> Result<()> {
    let mut board = open_board(config)?;
    let mut settings = board.settings().clone();

    let updates = show
        .iter()
        .map(|f| (*f, true))
        .chain(hide.iter().map(|f| (*f, false)));
    for (field, visible) in updates {
        let flag = &mut settings.card_fields;
        match field {
            CardField::JobTitle => flag.show_job_title = visible,
            CardField::Company => flag.show_company = visible,
            CardField::ConnectionStatus => flag.show_connection_status = visible,
            CardField::Tags => flag.show_tags = visible,
        }
    }
    if !show.is_empty() || !hide.is_empty() {
        board.update_settings(settings)?;
    }

    let fields = &board.settings().card_fields;
    println!("Card fields:");
    for (name, on) in [
        ("job-title", fields.show_job_title),
        ("company", fields.show_company),
        ("connection-status", fields.show_connection_status),
        ("tags", fields.show_tags),
    ] {
        let mark = if on {
            style("on").green()
        } else {
            style("off").dim()
        };
        println!("  {:<18} {}", name, mark);
    }
    Ok(())
}
