//! ALS - Ambient Light Sensor shim
//! Command-line interface over a simulated firmware namespace

use als_core::control::parse_uint;
use als_core::{AlsConfig, AlsDevice, AlsDriver, Attribute, Fixture, SimulatedFirmware};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BUILTIN_FIXTURE: &str = include_str!("../fixtures/zenbook.toml");

#[derive(Parser)]
#[command(name = "als")]
#[command(author = "ALS Contributors")]
#[command(version = "2026.10.17")]
#[command(about = "Ambient light sensor firmware shim", long_about = None)]
struct Cli {
    /// Firmware fixture (TOML); defaults to the built-in ASUS platform
    #[arg(short, long, value_name = "FIXTURE", global = true)]
    fixture: Option<PathBuf>,

    /// Initial ALS enable state (0/1/true/false), overrides the fixture
    #[arg(long, env = "ALS_ALAE", value_parser = parse_alae, global = true)]
    alae: Option<bool>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the status endpoint
    Status {
        /// Emit the typed report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the control endpoint and show the resulting status
    Set {
        /// Value to write (0 or 1)
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Deliver a hardware notification
    Notify {
        /// Event code (decimal, 0x hex or 0 octal)
        #[arg(value_name = "CODE", default_value = "0x80")]
        code: String,
    },

    /// List the firmware method table
    Methods {
        /// Emit the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session on one attached device
    Shell,
}

fn parse_alae(raw: &str) -> Result<bool, String> {
    AlsConfig::parse_alae(raw).map_err(|e| e.to_string())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "als=info,als_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Status { json } => status_command(&cli, *json),
        Commands::Set { value } => set_command(&cli, value),
        Commands::Notify { code } => notify_command(&cli, code),
        Commands::Methods { json } => methods_command(&cli, *json),
        Commands::Shell => shell_command(&cli),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SETUP
// ═══════════════════════════════════════════════════════════════════════════════

fn load_fixture(cli: &Cli) -> anyhow::Result<Fixture> {
    let source = match &cli.fixture {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?,
        None => BUILTIN_FIXTURE.to_string(),
    };
    Ok(Fixture::from_toml_str(&source)?)
}

fn attach(cli: &Cli) -> anyhow::Result<(Arc<SimulatedFirmware>, AlsDevice)> {
    let fixture = load_fixture(cli)?;
    let mut config = fixture.driver.clone();
    if let Some(alae) = cli.alae {
        config.alae = alae;
    }

    let firmware = Arc::new(fixture.firmware()?);
    tracing::debug!(
        device = %fixture.device.path,
        hid = %fixture.device.hid,
        alae = config.alae,
        "attaching from fixture"
    );
    let device = AlsDriver::new(config)
        .attach(firmware.clone(), fixture.device.clone())
        .with_context(|| format!("attaching {}", fixture.device.path))?;
    Ok((firmware, device))
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

fn status_command(cli: &Cli, json: bool) -> anyhow::Result<()> {
    let (_, device) = attach(cli)?;
    if json {
        println!("{}", device.status().to_json()?);
    } else {
        print!("{}", device.show(Attribute::Als)?);
    }
    Ok(())
}

fn set_command(cli: &Cli, value: &str) -> anyhow::Result<()> {
    let (_, device) = attach(cli)?;
    device
        .store(Attribute::Alsc, Some(value.as_bytes()))
        .with_context(|| format!("writing '{}' to alsc", value))?;
    print!("{}", device.show(Attribute::Als)?);
    Ok(())
}

fn notify_command(cli: &Cli, code: &str) -> anyhow::Result<()> {
    let event = parse_uint(code.as_bytes()).with_context(|| format!("event code '{}'", code))?;
    let (_, device) = attach(cli)?;
    device.subscribe(|signal| {
        println!("{} {}", "change:".cyan().bold(), signal.device);
    });
    device.on_event(event);
    Ok(())
}

fn methods_command(cli: &Cli, json: bool) -> anyhow::Result<()> {
    let (_, device) = attach(cli)?;
    if json {
        println!("{}", methods_json(&device)?);
        return Ok(());
    }
    for spec in device.methods().iter() {
        println!(
            "{:<16} {:<7} {:<4} {}",
            format!("{:?}", spec.attribute),
            format!("{:?}", spec.scope),
            format!("{:?}", spec.arity),
            spec.path
        );
    }
    Ok(())
}

fn methods_json(device: &AlsDevice) -> anyhow::Result<String> {
    let entries: Vec<_> = device.methods().iter().collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

fn shell_command(cli: &Cli) -> anyhow::Result<()> {
    let (firmware, device) = attach(cli)?;
    device.subscribe(|signal| {
        println!("{} {}", "change:".cyan().bold(), signal.device);
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("als> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_shell_help(),
            words => {
                if let Err(e) = shell_step(&firmware, &device, words) {
                    eprintln!("{} {:#}", "error:".red().bold(), e);
                }
            }
        }
        print!("als> ");
        stdout.flush()?;
    }
    println!();
    Ok(())
}

fn shell_step(
    firmware: &SimulatedFirmware,
    device: &AlsDevice,
    words: &[&str],
) -> anyhow::Result<()> {
    match words {
        ["show", attribute] => print!("{}", device.show(attribute.parse()?)?),
        ["store", attribute, value] => {
            let written = device.store(attribute.parse()?, Some(value.as_bytes()))?;
            println!("{} bytes written", written);
        }
        ["event", code] => device.on_event(parse_uint(code.as_bytes())?),
        ["poke", path, value] => {
            let value: u64 = value.parse().with_context(|| format!("value '{}'", value))?;
            firmware.set_value(path, value);
        }
        other => bail!("unknown command '{}' (try 'help')", other.join(" ")),
    }
    Ok(())
}

fn print_shell_help() {
    println!("{}", "Commands:".bold());
    println!("  show als                 read the status endpoint");
    println!("  store alsc <0|1>         write the control endpoint");
    println!("  event <code>             deliver a hardware notification");
    println!("  poke <path> <value>      change a simulated firmware value");
    println!("  quit                     leave the shell");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_builtin_fixture_attaches() {
        let cli = Cli::parse_from(["als", "--alae", "1", "status"]);
        let (firmware, device) = attach(&cli).unwrap();

        assert!(device.enable_flag().is_enabled());
        assert_eq!(firmware.value("\\_SB_.ALAE"), Some(1));
        let report = device.status();
        assert_eq!(report.lines.len(), 7);
        // RALS ausente na fixture
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_shell_step_store_and_poke() {
        let cli = Cli::parse_from(["als", "shell"]);
        let (firmware, device) = attach(&cli).unwrap();

        shell_step(&firmware, &device, &["store", "alsc", "1"]).unwrap();
        assert!(device.enable_flag().is_enabled());

        shell_step(&firmware, &device, &["poke", "\\_SB_.ALS_._ALI", "999"]).unwrap();
        assert_eq!(device.intensity(), Ok(999));

        assert!(shell_step(&firmware, &device, &["store", "alsc", "2"]).is_err());
        assert!(shell_step(&firmware, &device, &["store", "als", "1"]).is_err());
        assert!(shell_step(&firmware, &device, &["frobnicate"]).is_err());
    }

    #[test]
    fn test_methods_json_lists_table() {
        let cli = Cli::parse_from(["als", "methods", "--json"]);
        let (_, device) = attach(&cli).unwrap();

        let json: serde_json::Value = serde_json::from_str(&methods_json(&device).unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[6]["path"], "\\_SB_.ATKD.ALSC");
        assert_eq!(entries[6]["arity"], "Set");
    }

    #[test]
    fn test_parse_alae_flag() {
        assert_eq!(parse_alae("true"), Ok(true));
        assert!(parse_alae("maybe").is_err());
    }
}
