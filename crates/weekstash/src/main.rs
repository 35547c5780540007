//! `wstash` - CLI for weekstash
//!
//! This binary provides the command-line interface for stashing, listing,
//! exporting, and deleting files in the local week-grouped store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use weekstash::cli::{
    Cli, Command, ConfigCommand, DeleteCommand, ExportCommand, ListCommand, ShowCommand,
    UploadCommand,
};
use weekstash::render::{human_size, render_listing, render_record};
use weekstash::{init_logging, stash_files, Config, Store, WeekKey};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Upload(upload_cmd) => handle_upload(&config, &upload_cmd).await,
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::Show(show_cmd) => handle_show(&config, &show_cmd),
        Command::Export(export_cmd) => handle_export(&config, &export_cmd),
        Command::Delete(delete_cmd) => handle_delete(&config, &delete_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::open_with(config.store_path(), config.storage.pretty)
        .context("failed to open the record store")
}

async fn handle_upload(config: &Config, cmd: &UploadCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    let appended = stash_files(&mut store, config, &cmd.files).await?;
    for record in &appended {
        println!(
            "Stashed {} ({}) as {}",
            record.name,
            human_size(record.size),
            record.id
        );
    }
    println!("{} file(s) stashed.", appended.len());
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let filter = match &cmd.week {
        Some(raw) => match WeekKey::parse(raw) {
            Some(key) => Some(key),
            None => bail!("unrecognized week: {raw} (expected e.g. \"2026-W35\" or \"3\")"),
        },
        None => None,
    };

    let listing = render_listing(store.records(), filter.as_ref(), cmd.format)?;
    println!("{listing}");
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let Some(record) = store.get(&cmd.id) else {
        bail!("no record with id: {}", cmd.id);
    };
    print!("{}", render_record(record, cmd.content));
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let Some(record) = store.get(&cmd.id) else {
        bail!("no record with id: {}", cmd.id);
    };

    let (_, bytes) = weekstash::datauri::decode(&record.content)?;
    let destination = cmd
        .output
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from(&record.name));

    std::fs::write(&destination, &bytes)
        .with_context(|| format!("failed to write {}", destination.display()))?;

    println!("Exported {} to {}", record.name, destination.display());
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    if !store.delete(&cmd.id)? {
        bail!("no record with id: {}", cmd.id);
    }
    println!("Deleted {}.", cmd.id);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let stats = store.stats();

    if json {
        let status = serde_json::json!({
            "store_path": config.store_path(),
            "total_records": stats.total_records,
            "week_count": stats.week_count,
            "total_content_bytes": stats.total_content_bytes,
            "oldest_upload": stats.oldest_upload,
            "newest_upload": stats.newest_upload,
            "store_size_bytes": stats.store_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("wstash status");
        println!("-------------");
        println!("Store:         {}", config.store_path().display());
        println!("Records:       {}", stats.total_records);
        println!("Weeks:         {}", stats.week_count);
        println!("Content:       {}", human_size(stats.total_content_bytes));
        println!("Store file:    {}", human_size(stats.store_size_bytes));
        if let Some(oldest) = stats.oldest_upload {
            println!("Oldest upload: {oldest}");
        }
        if let Some(newest) = stats.newest_upload {
            println!("Newest upload: {newest}");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Store path:     {}", config.store_path().display());
                println!("  Pretty JSON:    {}", config.storage.pretty);
                println!();
                println!("[Weeks]");
                println!("  Scheme:         {}", config.weeks.scheme);
                match config.weeks.term_start {
                    Some(start) => println!("  Term start:     {start}"),
                    None => println!("  Term start:     (unset)"),
                }
                println!("  Term weeks:     {}", config.weeks.term_weeks);
                println!();
                println!("[Upload]");
                println!(
                    "  Max file size:  {}",
                    human_size(config.upload.max_file_bytes)
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
