use serde::{Deserialize, Serialize};
use w1_transport::DeviceId;

use crate::convert;

/// One device's temperature for one poll cycle.
///
/// A value type: built once, never mutated, no identity beyond its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub device: DeviceId,
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Reading {
    /// Package a raw Celsius value; the Fahrenheit field is derived and
    /// rounded to one decimal place.
    pub fn new(device: DeviceId, celsius: f64) -> Self {
        Self {
            device,
            celsius,
            fahrenheit: convert::fahrenheit(celsius),
        }
    }
}

/// All readings produced by one poll cycle, in catalog order.
pub type ReadingSet = Vec<Reading>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_derives_rounded_fahrenheit() {
        let reading = Reading::new(DeviceId::new("28-aabbccddeeff"), 23.5);
        assert_eq!(reading.celsius, 23.5);
        assert_eq!(reading.fahrenheit, 74.3);
    }

    #[test]
    fn reading_serializes_with_opaque_device_token() -> anyhow::Result<()> {
        let reading = Reading::new(DeviceId::new("28-aabbccddeeff"), 23.5);
        let json = serde_json::to_string(&reading)?;
        assert_eq!(
            json,
            r#"{"device":"28-aabbccddeeff","celsius":23.5,"fahrenheit":74.3}"#
        );
        Ok(())
    }
}
