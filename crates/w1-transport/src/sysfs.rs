use crate::{DeviceEntry, DeviceId, DeviceKind, Result, TransportError, W1Bus};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Linux kernel w1 subsystem backend (`/sys/bus/w1/devices`).
///
/// Each slave device appears as a directory named by its identity token;
/// the `w1_therm` driver exposes readings through the `w1_slave` and
/// `temperature` attribute files inside it.
pub struct SysfsBus {
    root: PathBuf,
}

impl SysfsBus {
    fn device_dir(&self, id: &DeviceId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

impl W1Bus for SysfsBus {
    fn open(path: &str) -> Result<Self> {
        let root = PathBuf::from(path);
        if !root.is_dir() {
            return Err(TransportError::BusUnavailable(path.to_string()));
        }
        Ok(Self { root })
    }

    fn list_devices(&self) -> Result<Vec<DeviceEntry>> {
        let mut names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| TransportError::Io(e.to_string()))? {
            let entry = entry.map_err(|e| TransportError::Io(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Master nodes are bus controllers, not slave devices
            if name.starts_with("w1_bus_master") {
                continue;
            }
            names.push(name);
        }
        // read_dir order is arbitrary; sort for a stable enumeration
        names.sort();
        let mut devices = Vec::with_capacity(names.len());
        for name in names {
            let dir = self.root.join(&name);
            let kind = if dir.join("w1_slave").is_file() || dir.join("temperature").is_file() {
                DeviceKind::TemperatureSensor
            } else {
                DeviceKind::Other
            };
            devices.push(DeviceEntry::new(name, kind));
        }
        Ok(devices)
    }

    fn read_celsius(&self, id: &DeviceId) -> Result<Option<f64>> {
        let dir = self.device_dir(id);
        // Prefer the CRC-carrying w1_slave report; fall back to the bare
        // millidegree attribute on kernels that only expose `temperature`.
        match fs::read_to_string(dir.join("w1_slave")) {
            Ok(report) => Ok(parse_w1_slave(&report)),
            Err(_) => match fs::read_to_string(dir.join("temperature")) {
                Ok(raw) => Ok(parse_millidegrees(&raw)),
                Err(e) => {
                    debug!(device = id.as_str(), "read failed: {e}");
                    Ok(None)
                }
            },
        }
    }
}

/// Decode the two-line `w1_slave` report produced by the `w1_therm` driver:
///
/// ```text
/// 96 01 4b 46 7f ff 0c 10 a0 : crc=a0 YES
/// 96 01 4b 46 7f ff 0c 10 a0 t=25375
/// ```
///
/// The first line carries the driver's CRC verdict, the second the decoded
/// register value in millidegrees Celsius. A `NO` verdict means the read
/// was corrupt and yields no value.
fn parse_w1_slave(report: &str) -> Option<f64> {
    let mut lines = report.lines();
    let crc_line = lines.next()?;
    if !crc_line.trim_end().ends_with("YES") {
        return None;
    }
    let value_line = lines.next()?;
    let (_, raw) = value_line.rsplit_once("t=")?;
    parse_millidegrees(raw)
}

fn parse_millidegrees(raw: &str) -> Option<f64> {
    let millis: i64 = raw.trim().parse().ok()?;
    Some(millis as f64 / 1000.0)
}
