//! `ivping ping` and `ivping ssh`

use anyhow::{Context, Result};
use clap::Args;
use ivping::actions::PingLaunch;
use ivping::{ActionDispatcher, ActionError};
use ivping_core::{find_host, HostRecord};
use std::path::Path;

use super::context::AppContext;
use super::error::HelpfulError;

#[derive(Debug, Args)]
pub struct PingArgs {
    /// Hostname (case-insensitive) or IP address
    pub host: String,

    /// Ping until the console is closed instead of sending a fixed count
    #[arg(short, long)]
    pub continuous: bool,
}

#[derive(Debug, Args)]
pub struct SshArgs {
    /// Hostname (case-insensitive) or IP address of a SW*/RT* host
    pub host: String,
}

pub fn run_ping(args: PingArgs, ctx: &AppContext) -> Result<()> {
    let hosts = ctx.load_hosts();
    let launch = ping_host(&hosts, &args, &ctx.hosts_file, &ctx.dispatcher())?;
    println!("Ping console opened ({})", launch.script_path.display());
    Ok(())
}

pub fn run_ssh(args: SshArgs, ctx: &AppContext) -> Result<()> {
    let hosts = ctx.load_hosts();
    let url = ssh_host(&hosts, &args, &ctx.hosts_file, &ctx.dispatcher())?;
    println!("Opened {}", url);
    Ok(())
}

fn lookup<'a>(hosts: &'a [HostRecord], query: &str, hosts_file: &Path) -> Result<&'a HostRecord> {
    find_host(hosts, query)
        .ok_or_else(|| anyhow::Error::new(HelpfulError::host_not_found(query, hosts_file)))
}

fn ping_host(
    hosts: &[HostRecord],
    args: &PingArgs,
    hosts_file: &Path,
    dispatcher: &ActionDispatcher,
) -> Result<PingLaunch> {
    let host = lookup(hosts, &args.host, hosts_file)?;
    dispatcher
        .run_ping(host, args.continuous)
        .with_context(|| format!("Failed to ping {}", host.host()))
}

fn ssh_host(
    hosts: &[HostRecord],
    args: &SshArgs,
    hosts_file: &Path,
    dispatcher: &ActionDispatcher,
) -> Result<String> {
    let host = lookup(hosts, &args.host, hosts_file)?;
    match dispatcher.open_ssh_gateway(host) {
        Ok(url) => Ok(url),
        Err(ActionError::NotNetworkEquipment { host }) => {
            Err(HelpfulError::not_network_equipment(&host).into())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to open SSH gateway for {}", host.host())),
    }
}
