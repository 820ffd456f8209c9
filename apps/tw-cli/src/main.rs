use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing::info;

use sensor_registry::{MetricsHub, ReadingSet, SensorCatalog, TemperaturePoller};
use w1_transport::{DeviceKind, MockBus, SysfsBus, W1Bus};

const DEFAULT_BUS_PATH: &str = "/sys/bus/w1/devices";

#[derive(Parser, Debug)]
#[command(
    name = "tw",
    version,
    about = "Thermwatch 1-Wire temperature CLI",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Backend {
    Mock,
    Sysfs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every device visible on the bus
    List {
        /// Backend to query
        #[arg(long, value_enum, default_value_t = Backend::Sysfs)]
        backend: Backend,
        /// Bus root path (sysfs backend)
        #[arg(long, default_value = DEFAULT_BUS_PATH)]
        path: String,
    },
    /// Discover and list the cataloged temperature sensors
    Sensors {
        /// Backend to query
        #[arg(long, value_enum, default_value_t = Backend::Sysfs)]
        backend: Backend,
        /// Bus root path (sysfs backend)
        #[arg(long, default_value = DEFAULT_BUS_PATH)]
        path: String,
    },
    /// Poll the cataloged sensors at a fixed cadence
    Poll {
        /// Backend to query
        #[arg(long, value_enum, default_value_t = Backend::Sysfs)]
        backend: Backend,
        /// Bus root path (sysfs backend)
        #[arg(long, default_value = DEFAULT_BUS_PATH)]
        path: String,
        /// Number of poll cycles to run
        #[arg(long, default_value_t = 5u32)]
        cycles: u32,
        /// Seconds to sleep between cycles
        #[arg(long, default_value_t = 60u64)]
        interval_secs: u64,
        /// Print one JSON line per reading
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
        /// Dump Prometheus metrics after the run
        #[arg(long, action = ArgAction::SetTrue)]
        metrics: bool,
    },
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { backend, path } => match backend {
            Backend::Mock => list_devices(&MockBus::open(&path)?),
            Backend::Sysfs => list_devices(&SysfsBus::open(&path)?),
        },
        Commands::Sensors { backend, path } => match backend {
            Backend::Mock => list_sensors(&MockBus::open(&path)?),
            Backend::Sysfs => list_sensors(&SysfsBus::open(&path)?),
        },
        Commands::Poll {
            backend,
            path,
            cycles,
            interval_secs,
            json,
            metrics,
        } => match backend {
            Backend::Mock => poll(&MockBus::open(&path)?, cycles, interval_secs, json, metrics),
            Backend::Sysfs => poll(&SysfsBus::open(&path)?, cycles, interval_secs, json, metrics),
        },
    }
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn list_devices<B: W1Bus>(bus: &B) -> Result<()> {
    for entry in bus.list_devices()? {
        let kind = match entry.kind {
            DeviceKind::TemperatureSensor => "temperature-sensor",
            DeviceKind::Other => "other",
        };
        println!("{id}\t{kind}", id = entry.id);
    }
    Ok(())
}

fn list_sensors<B: W1Bus>(bus: &B) -> Result<()> {
    let mut catalog = SensorCatalog::new(bus);
    catalog.refresh();
    for id in catalog.devices() {
        println!("{id}");
    }
    info!(sensors = catalog.devices().len(), "catalog refreshed");
    Ok(())
}

fn poll<B: W1Bus>(
    bus: &B,
    cycles: u32,
    interval_secs: u64,
    json: bool,
    dump_metrics: bool,
) -> Result<()> {
    let hub = MetricsHub::new().map_err(anyhow::Error::msg)?;

    let mut catalog = SensorCatalog::new(bus);
    catalog.refresh();
    let sensors = catalog.devices().len();
    hub.poll.devices_cataloged.set(sensors as i64);
    info!(sensors, cycles, interval_secs, "polling");

    let poller = TemperaturePoller::new(bus);
    poller.run_loop(
        catalog.devices(),
        cycles,
        Duration::from_secs(interval_secs),
        |readings| {
            hub.poll.cycles.inc();
            hub.poll.readings.inc_by(readings.len() as u64);
            hub.poll.read_misses.inc_by((sensors - readings.len()) as u64);
            emit(&readings, json);
        },
    )?;

    if dump_metrics {
        print!("{}", hub.encode_text());
    }
    Ok(())
}

fn emit(readings: &ReadingSet, json: bool) {
    if readings.is_empty() {
        println!("no temperature sensor found");
        return;
    }
    for reading in readings {
        if json {
            match serde_json::to_string(reading) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!("encoding reading failed: {e}"),
            }
        } else {
            println!(
                "{device}\t{celsius}°C\t({fahrenheit}°F)",
                device = reading.device,
                celsius = reading.celsius,
                fahrenheit = reading.fahrenheit
            );
        }
    }
}
