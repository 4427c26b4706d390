//! `ivping config` - show resolved paths and effective settings

use anyhow::{Context, Result};
use clap::Args;

use super::context::AppContext;
use super::output::print_table;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Show resolved paths in JSON format
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs, ctx: &AppContext) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(&config_json(ctx)).context("Failed to serialize settings")?;
        println!("{}", json);
        return Ok(());
    }

    let exists = |path: &std::path::Path| if path.exists() { "yes" } else { "no" }.to_string();
    let settings = &ctx.config;
    let rows = vec![
        vec!["Data directory".to_string(), ctx.data_dir.root().display().to_string(), exists(ctx.data_dir.root())],
        vec!["Settings file".to_string(), ctx.config_path.display().to_string(), exists(&ctx.config_path)],
        vec!["Host spreadsheet".to_string(), ctx.hosts_file.display().to_string(), exists(&ctx.hosts_file)],
        vec!["Logs".to_string(), ctx.data_dir.logs_dir().display().to_string(), exists(&ctx.data_dir.logs_dir())],
    ];
    print_table(&["Path".to_string(), "Location".to_string(), "Exists".to_string()], rows);

    println!();
    println!("Ping count:      {}", settings.ping.count);
    println!(
        "Terminal:        {}",
        settings.ping.terminal.as_deref().unwrap_or("(platform default)")
    );
    println!("SSH gateway URL: {}", settings.gateway.base_url);
    Ok(())
}

fn config_json(ctx: &AppContext) -> serde_json::Value {
    let logs_dir = ctx.data_dir.logs_dir();
    serde_json::json!({
        "data_dir": ctx.data_dir.root().to_string_lossy(),
        "config_file": {
            "path": ctx.config_path.to_string_lossy(),
            "exists": ctx.config_path.exists(),
        },
        "hosts_file": {
            "path": ctx.hosts_file.to_string_lossy(),
            "exists": ctx.hosts_file.exists(),
        },
        "logs_dir": logs_dir.to_string_lossy(),
        "ping": {
            "count": ctx.config.ping.count,
            "terminal": ctx.config.ping.terminal,
        },
        "gateway": {
            "base_url": ctx.config.gateway.base_url,
        },
    })
}
