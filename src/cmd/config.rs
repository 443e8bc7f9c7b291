//! Configuration view and validation commands (`leadboard config`).

use anyhow::Result;

use leadboard::config::{BoardConfig, BoardToml};

use super::super::ConfigCommands;

fn print_sections(toml: &BoardToml) {
    println!("[storage]");
    println!("  data_dir = \"{}\"", toml.storage.data_dir.display());
    println!("  key_prefix = \"{}\"", toml.storage.key_prefix);
    println!();
    println!("[board]");
    if let Some(pipeline) = &toml.board.default_pipeline {
        println!("  default_pipeline = \"{}\"", pipeline);
    }
    println!("  id_strategy = \"{}\"", toml.board.id_strategy);
    println!("  seed_demo_data = {}", toml.board.seed_demo_data);
    println!();
    println!("[logging]");
    println!("  level = \"{}\"", toml.logging.level);
    println!("  format = \"{}\"", toml.logging.format);
    println!();
}

pub fn cmd_config(config: &BoardConfig, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = config.config_file();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Lead Board Configuration");
            println!("========================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No board.toml found at {}", config_path.display());
                println!("Using default configuration:");
            }
            println!();
            print_sections(&config.toml);

            println!("Effective values (with env/CLI overrides):");
            println!("  data_dir = \"{}\"", config.data_dir().display());
            println!("  key_prefix = \"{}\"", config.key_prefix());
            if let Some(pipeline) = config.pipeline() {
                println!("  pipeline = \"{}\"", pipeline);
            }
            println!("  log_format = \"{}\"", config.log_format());
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No board.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("board.toml already exists at {}", config_path.display());
                return Ok(());
            }
            std::fs::create_dir_all(&config.board_dir)?;
            BoardToml::default().save(&config_path)?;
            println!("Created {}", config_path.display());
        }
    }
    Ok(())
}
