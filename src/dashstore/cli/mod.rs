mod print;
mod setup;

use clap::Parser;
use dashstore::api::{ConfigAction, DashApi};
use dashstore::config::DashConfig;
use dashstore::error::{Result, StoreError};
use print::{
    print_config, print_documents, print_entries, print_messages, print_paths,
};
use serde_json::Value;
use setup::{Cli, Commands};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let api = init_api(&cli)?;

    match cli.command {
        Some(Commands::Get { keys, default }) => handle_get(&api, &keys, default),
        Some(Commands::Set { key, value, force }) => handle_set(&api, &key, value, force),
        Some(Commands::Remove { keys }) => handle_remove(&api, &keys),
        Some(Commands::Clear { yes }) => handle_clear(&api, yes),
        Some(Commands::List) | None => handle_list(&api),
        Some(Commands::Check { fix }) => handle_check(&api, fix),
        Some(Commands::Export { output }) => handle_export(&api, output.as_deref()),
        Some(Commands::Import { file, force }) => handle_import(&api, &file, force),
        Some(Commands::Path { keys }) => handle_paths(&api, &keys),
        Some(Commands::Config { template }) => handle_config(&api, template),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn init_api(cli: &Cli) -> Result<DashApi> {
    let mut config = DashConfig::load()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if cli.no_durable {
        config.durable = false;
    }
    log::debug!("Effective config: {:?}", config);
    DashApi::from_config(config)
}

fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| StoreError::Api(format!("Invalid JSON document: {}", e)))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(fs::read_to_string(p)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn handle_get(api: &DashApi, keys: &[String], default: Option<String>) -> Result<()> {
    let default = default.as_deref().map(parse_json).transpose()?;
    let result = api.get(keys, default.as_ref())?;
    print_documents(&result.documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(api: &DashApi, key: &str, value: Option<String>, force: bool) -> Result<()> {
    let text = match value {
        Some(v) if v != "-" => v,
        _ => read_input(None)?,
    };
    let doc = parse_json(&text)?;
    let result = api.set(key, &doc, force)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(api: &DashApi, keys: &[String]) -> Result<()> {
    let result = api.remove(keys)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(api: &DashApi, yes: bool) -> Result<()> {
    if !yes {
        let listed = api.list()?;
        if listed.entries.is_empty() {
            print_messages(&listed.messages);
            return Ok(());
        }
        println!("This will permanently remove the following documents:");
        for entry in &listed.entries {
            println!("  {}", entry.key);
        }
        print!("[Y] To clear: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim() != "Y" {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let result = api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &DashApi) -> Result<()> {
    let result = api.list()?;
    print_entries(&result.entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_check(api: &DashApi, fix: bool) -> Result<()> {
    let result = api.check(fix)?;
    print_messages(&result.messages);
    if result.has_errors() && !fix {
        return Err(StoreError::Api("Store has corrupt documents".to_string()));
    }
    Ok(())
}

fn handle_export(api: &DashApi, output: Option<&Path>) -> Result<()> {
    let result = api.export()?;
    let text = serde_json::to_string_pretty(&result.bundle())?;

    match output {
        Some(path) => {
            fs::write(path, text)?;
            print_messages(&result.messages);
        }
        None => {
            println!("{}", text);
            // Keep stdout clean for piping
            for message in &result.messages {
                eprintln!("{}", message.content);
            }
        }
    }
    Ok(())
}

fn handle_import(api: &DashApi, file: &Path, force: bool) -> Result<()> {
    let bundle = parse_json(&read_input(Some(file))?)?;
    let result = api.import(&bundle, force)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(api: &DashApi, keys: &[String]) -> Result<()> {
    let result = api.paths(keys)?;
    print_paths(&result.paths);
    Ok(())
}

fn handle_config(api: &DashApi, template: bool) -> Result<()> {
    if template {
        let result = api.show_config(ConfigAction::Template)?;
        for message in &result.messages {
            println!("{}", message.content);
        }
        return Ok(());
    }

    let result = api.show_config(ConfigAction::Show)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
