//! `ivping list` - print the filtered, sorted host list

use anyhow::{Context, Result};
use clap::Args;
use ivping_core::{HostColumn, HostRecord, HostTable, SortKey};

use super::context::AppContext;
use super::output::{host_headers, host_rows, print_table};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring matched against host, IP and location
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort column: host, ip or location
    #[arg(short, long)]
    pub sort: Option<HostColumn>,

    /// Sort descending (requires --sort)
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, ctx: &AppContext) -> Result<()> {
    let table = build_view(ctx.load_hosts(), &args);

    if args.json {
        let hosts: Vec<&HostRecord> = table.visible().collect();
        let json = serde_json::to_string_pretty(&hosts).context("Failed to serialize host list")?;
        println!("{}", json);
        return Ok(());
    }

    if table.visible_len() == 0 {
        if table.is_empty() {
            println!("No hosts in {}", ctx.hosts_file.display());
        } else {
            println!("No hosts match '{}'", table.filter_text());
        }
        return Ok(());
    }

    print_table(&host_headers(table.sort()), host_rows(table.visible()));
    println!("{} of {} host(s)", table.visible_len(), table.len());
    Ok(())
}

fn build_view(hosts: Vec<HostRecord>, args: &ListArgs) -> HostTable {
    let mut table = HostTable::new(hosts);
    if let Some(filter) = &args.filter {
        table.set_filter_text(filter.as_str());
    }
    table.set_sort(args.sort.map(|column| {
        if args.desc {
            SortKey::descending(column)
        } else {
            SortKey::ascending(column)
        }
    }));
    table
}
