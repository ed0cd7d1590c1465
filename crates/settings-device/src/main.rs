//! Settings device host: entry point.
//!
//! Boots the demo device's settings from a data directory on the host, applies
//! one command, and exits.  Every change goes through a settings service, so
//! the persistence controllers write the affected JSON file automatically.
//!
//! # Usage
//!
//! ```text
//! settings-device [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show                  Print the current settings and MQTT status
//!   led <on|off>          Switch the LED
//!   mqtt [--host ...]     Edit MQTT broker settings
//!   import <FILE>         Apply {"light": {...}, "mqtt": {...}} from a file
//!   reset                 Restore every setting to its default
//!   init-config           Write the effective host configuration to --config
//!
//! Options:
//!   --config   <PATH>     Host configuration TOML [default: device.toml]
//!   --data-dir <DIR>      Overrides storage.data_dir from the configuration
//! ```
//!
//! | Variable                 | Description                                |
//! |--------------------------|--------------------------------------------|
//! | `SETTINGS_DEVICE_CONFIG` | Host configuration path                    |
//! | `SETTINGS_DEVICE_DATA`   | Data directory                             |
//! | `RUST_LOG`               | Log filter; overrides `logging.log_level`  |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use settings_core::DiskFileSystem;
use tracing::info;
use tracing_subscriber::EnvFilter;

use settings_device::application::device::Device;
use settings_device::domain::mqtt::MqttSettings;
use settings_device::infrastructure::storage::config::{load_config, save_config};

/// Origin id for changes made from the command line.
const CLI_ORIGIN: &str = "cli";

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "settings-device",
    about = "Inspect and edit the persisted settings of the demo device",
    version
)]
struct Cli {
    /// Host configuration file.  Missing means built-in defaults.
    #[arg(long, default_value = "device.toml", env = "SETTINGS_DEVICE_CONFIG")]
    config: PathBuf,

    /// Host directory the device file system is rooted at.
    #[arg(long, env = "SETTINGS_DEVICE_DATA")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current settings and MQTT status as JSON.
    Show,
    /// Switch the LED on or off.
    Led {
        #[arg(value_enum)]
        state: LedState,
    },
    /// Edit MQTT broker settings.  Only the given flags change.
    Mqtt(MqttArgs),
    /// Apply a JSON import document.
    Import { file: PathBuf },
    /// Restore every setting to its default.
    Reset,
    /// Write the effective host configuration to `--config`.
    InitConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LedState {
    On,
    Off,
}

#[derive(Debug, Default, Args)]
struct MqttArgs {
    #[arg(long)]
    enabled: Option<bool>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    client_id: Option<String>,
    /// Keep-alive interval in seconds.
    #[arg(long)]
    keep_alive: Option<u16>,
    #[arg(long)]
    clean_session: Option<bool>,
    #[arg(long)]
    max_topic_length: Option<u16>,
}

impl MqttArgs {
    fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.client_id.is_none()
            && self.keep_alive.is_none()
            && self.clean_session.is_none()
            && self.max_topic_length.is_none()
    }

    fn apply(&self, settings: &mut MqttSettings) {
        if let Some(enabled) = self.enabled {
            settings.enabled = enabled;
        }
        if let Some(host) = &self.host {
            settings.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(username) = &self.username {
            settings.username.clone_from(username);
        }
        if let Some(password) = &self.password {
            settings.password.clone_from(password);
        }
        if let Some(client_id) = &self.client_id {
            settings.client_id.clone_from(client_id);
        }
        if let Some(keep_alive) = self.keep_alive {
            settings.keep_alive = keep_alive;
        }
        if let Some(clean_session) = self.clean_session {
            settings.clean_session = clean_session;
        }
        if let Some(max_topic_length) = self.max_topic_length {
            settings.max_topic_length = max_topic_length;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("loading host configuration {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    // RUST_LOG wins over the configured level.  Logs go to stderr so `show`
    // output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Command::InitConfig = cli.command {
        save_config(&cli.config, &config)
            .with_context(|| format!("writing host configuration {}", cli.config.display()))?;
        info!(path = %cli.config.display(), "host configuration written");
        return Ok(());
    }

    info!(data_dir = %config.storage.data_dir.display(), "booting device settings");
    let fs = Arc::new(DiskFileSystem::new(config.storage.data_dir.clone()));
    let device = Device::new(fs, &config.storage);
    device.boot();

    match cli.command {
        Command::Show => {
            let report = json!({
                "light": device.light(),
                "mqtt": device.mqtt(),
                "mqtt_status": device.mqtt_status(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Led { state } => {
            device.set_led(CLI_ORIGIN, state == LedState::On);
        }
        Command::Mqtt(args) => {
            if args.is_empty() {
                anyhow::bail!("no MQTT settings given; see `settings-device mqtt --help`");
            }
            device.update_mqtt(CLI_ORIGIN, |settings| args.apply(settings));
        }
        Command::Import { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading import file {}", file.display()))?;
            let summary = device
                .import(&bytes)
                .with_context(|| format!("importing {}", file.display()))?;
            info!(light = summary.light, mqtt = summary.mqtt, "import applied");
        }
        Command::Reset => device.reset(),
        Command::InitConfig => {}
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
