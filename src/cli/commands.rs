//! CLI commands

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use super::output;
use crate::config::Config;
use crate::devices::{DeviceCollection, DeviceLister};
use crate::service::{AccountClient, AccountService};
use crate::session::{Credentials, SessionManager};

const LOGIN_DENIED: &str = "Could not log in to the device service. Incorrect identifier or secret.";
const LIST_FAILED: &str = "Could not retrieve the registered devices.";

#[derive(Parser)]
#[command(name = "devicelist")]
#[command(about = "List all devices registered for an account", long_about = None)]
struct Cli {
    /// Your account identifier
    identifier: String,

    /// Your very secret password
    secret: String,

    /// Config file path (default: ~/.devicelist/config.yml)
    #[arg(long)]
    config: Option<String>,

    /// Account service base URL, overrides the config file
    #[arg(long)]
    service_url: Option<String>,

    /// Print devices as a JSON array
    #[arg(long)]
    json: bool,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let json = cli.json;

    let config = Config::load(cli.config.as_deref())?.with_service_url(cli.service_url);
    let credentials = Credentials::new(cli.identifier, cli.secret);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let devices = match list_devices(&config, &credentials).await? {
            Ok(devices) => devices,
            Err(code) => return Ok(code),
        };

        if json {
            println!("{}", output::to_json(&devices)?);
        } else {
            for device in &devices {
                println!("{}", output::format_line(device));
            }
        }
        Ok(ExitCode::SUCCESS)
    })
}

/// Log in, list, log out. User-facing failures come back as an exit code.
async fn list_devices(
    config: &Config,
    credentials: &Credentials,
) -> Result<Result<DeviceCollection, ExitCode>> {
    let service: Arc<dyn AccountService> = Arc::new(AccountClient::new(&config.service)?);
    let lister = DeviceLister::new(Arc::clone(&service));
    let mut manager = SessionManager::new(service);

    let listed = manager
        .with_session(credentials, |session| async move { lister.list(&session).await })
        .await;

    match listed {
        Ok(Ok(devices)) => Ok(Ok(devices)),
        Ok(Err(failure)) => {
            debug!("Device listing failed: {}", failure);
            eprintln!("{}", LIST_FAILED);
            Ok(Err(ExitCode::from(2)))
        }
        Err(failure) if failure.is_fatal() => Err(failure.into()),
        Err(failure) => {
            debug!("Login failed: {}", failure);
            eprintln!("{}", LOGIN_DENIED);
            Ok(Err(ExitCode::from(1)))
        }
    }
}
