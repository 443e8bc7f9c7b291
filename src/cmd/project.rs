//! Project setup commands: `init` and `reset`.

use anyhow::{Context, Result};
use console::style;

use leadboard::config::{BoardConfig, BoardToml};

use super::board::open_board;

pub fn cmd_init(config: &BoardConfig) -> Result<()> {
    let already = config.config_file().exists();

    std::fs::create_dir_all(&config.board_dir).with_context(|| {
        format!(
            "Failed to create board directory: {}",
            config.board_dir.display()
        )
    })?;
    if !already {
        BoardToml::default().save(&config.config_file())?;
    }

    let board = open_board(config)?;

    if already {
        println!(
            "Lead board already initialized at {}",
            config.board_dir.display()
        );
    } else {
        println!("Initialized lead board at {}", config.board_dir.display());
        println!();
        println!("Created:");
        println!("  .leadboard/");
        println!("  ├── board.toml    # Storage, board and logging settings");
        println!("  └── data/         # Pipelines, leads and settings (JSON)");
    }
    println!();
    println!(
        "{} pipeline(s), {} lead(s). Run `leadboard show` to view the board.",
        board.pipelines().len(),
        board.leads().len()
    );
    Ok(())
}

pub fn cmd_reset(config: &BoardConfig, force: bool) -> Result<()> {
    use dialoguer::Confirm;

    if !force {
        let confirm = Confirm::new()
            .with_prompt("This will replace every pipeline and lead with demo data. Are you sure?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirm {
            println!("Reset cancelled");
            return Ok(());
        }
    }

    let mut board = open_board(config)?;
    board.reset_demo_data()?;
    println!(
        "{} {} pipeline(s), {} lead(s)",
        style("Reset complete:").green(),
        board.pipelines().len(),
        board.leads().len()
    );
    Ok(())
}
