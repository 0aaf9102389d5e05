//! CatPoint command-line front end
//!
//! Each invocation opens the JSON state store, performs one operation on
//! the alarm controller and prints the resulting status.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  clap CLI ──▶ AppCommand ──▶ SecurityService             │
//! │                               │        │        │        │
//! │                  JsonFileRepository    │  LogStatusListener
//! │                                 SidecarLabelService       │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use tracing_subscriber::EnvFilter;

use catpoint::adapters::file_store::JsonFileRepository;
use catpoint::adapters::label_detector::SidecarLabelService;
use catpoint::adapters::log_listener::LogStatusListener;
use catpoint::alarm::ArmingMode;
use catpoint::alarm::sensor::{Sensor, SensorKind};
use catpoint::app::commands::AppCommand;
use catpoint::app::ports::CameraFrame;
use catpoint::app::service::SecurityService;
use catpoint::config::SystemConfig;

// ── CLI definition ────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "catpoint", version, about = "Home security alarm controller")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, env = "CATPOINT_CONFIG", default_value = "catpoint.json")]
    config: PathBuf,

    /// State file (overrides `state_path` from the config)
    #[arg(long, global = true, env = "CATPOINT_STATE")]
    state: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show arming mode, alarm status and sensors
    Status,
    /// Set the arming mode: disarmed, home or away
    Arm { mode: ArmingMode },
    /// Manage sensors
    #[command(subcommand)]
    Sensor(SensorCommand),
    /// Run cat detection on an image (labels read from <image>.labels.json)
    Scan { image: PathBuf },
    /// Report a detection result directly
    Report { result: Detection },
}

#[derive(Debug, Subcommand)]
enum SensorCommand {
    /// Register a sensor
    Add { name: String, kind: SensorKind },
    /// Unregister a sensor
    Remove { name: String },
    /// Activate or deactivate a sensor
    Set { name: String, state: Switch },
    /// List registered sensors
    List,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Detection {
    Cat,
    Clear,
}

// ── Entry point ───────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = SystemConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(state) = cli.state {
        config.state_path = state;
    }

    let repository = JsonFileRepository::open(&config.state_path)
        .with_context(|| format!("opening state {}", config.state_path.display()))?;
    let detector = SidecarLabelService::new(config.cat_label.clone());
    let mut service = SecurityService::new(repository, detector, config);
    service.subscribe(Arc::new(LogStatusListener::new()));

    match cli.command {
        Command::Status | Command::Sensor(SensorCommand::List) => {}
        Command::Arm { mode } => service.handle_command(AppCommand::SetArmingMode(mode))?,
        Command::Sensor(SensorCommand::Add { name, kind }) => {
            service.handle_command(AppCommand::AddSensor(Sensor::new(name, kind)))?;
        }
        Command::Sensor(SensorCommand::Remove { name }) => {
            service.handle_command(AppCommand::RemoveSensor(name))?;
        }
        Command::Sensor(SensorCommand::Set { name, state }) => {
            let active = matches!(state, Switch::On);
            service.handle_command(AppCommand::SetSensorActive { name, active })?;
        }
        Command::Scan { image } => {
            let frame = CameraFrame::load(&image)
                .with_context(|| format!("reading image {}", image.display()))?;
            let found = service.process_image(&frame)?;
            println!("cat detected: {}", if found { "yes" } else { "no" });
        }
        Command::Report { result } => {
            service.handle_command(AppCommand::ReportDetection(matches!(result, Detection::Cat)))?;
        }
    }

    print_status(&service)
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
    debug!("logging initialised at {}", filter);
}

fn print_status<R, I>(service: &SecurityService<R, I>) -> Result<()>
where
    R: catpoint::app::ports::SecurityRepository,
    I: catpoint::app::ports::ImageService,
{
    println!("arming mode:  {}", service.arming_mode()?);
    println!("alarm status: {}", service.alarm_status()?);
    let sensors = service.sensors()?;
    if sensors.is_empty() {
        println!("sensors:      none");
    } else {
        println!("sensors:");
        for sensor in sensors {
            println!("  {sensor}");
        }
    }
    Ok(())
}
