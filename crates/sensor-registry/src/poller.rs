use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use w1_transport::{DeviceId, W1Bus};

use crate::types::{Reading, ReadingSet};

/// Loop arguments that cannot describe a runnable loop. Checked before the
/// first cycle executes.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum LoopConfigError {
    #[error("cycle count must be positive")]
    ZeroCycles,
    #[error("poll interval must be positive")]
    ZeroInterval,
}

/// Reads every cataloged device once per cycle and hands the resulting
/// record set to a consumer callback.
pub struct TemperaturePoller<'bus, B> {
    bus: &'bus B,
}

impl<'bus, B: W1Bus> TemperaturePoller<'bus, B> {
    pub fn new(bus: &'bus B) -> Self {
        Self { bus }
    }

    /// One pass over `devices`, in order.
    ///
    /// A device that cannot be read right now is skipped; its absence from
    /// the result is the only signal. Skips model hot-unplug between
    /// discovery and read, so this never fails and never panics.
    pub fn poll(&self, devices: &[DeviceId]) -> ReadingSet {
        devices
            .iter()
            .filter_map(|id| match self.bus.read_celsius(id) {
                Ok(Some(celsius)) => Some(Reading::new(id.clone(), celsius)),
                Ok(None) => {
                    debug!(device = id.as_str(), "device absent, skipped");
                    None
                }
                Err(e) => {
                    warn!(device = id.as_str(), "read failed, skipped: {e}");
                    None
                }
            })
            .collect()
    }

    /// Poll then emit exactly `cycles` times, sleeping `interval` between
    /// cycles and never after the last.
    ///
    /// Empty reading sets are emitted like any other; the consumer decides
    /// what "no sensors" means. A device that failed one cycle is simply
    /// read again on the next: no retries inside a cycle, no automatic
    /// re-discovery.
    pub fn run_loop<F>(
        &self,
        devices: &[DeviceId],
        cycles: u32,
        interval: Duration,
        emit: F,
    ) -> Result<(), LoopConfigError>
    where
        F: FnMut(ReadingSet),
    {
        self.run_loop_with(devices, cycles, interval, emit, std::thread::sleep)
    }

    fn run_loop_with<F, S>(
        &self,
        devices: &[DeviceId],
        cycles: u32,
        interval: Duration,
        mut emit: F,
        mut sleep: S,
    ) -> Result<(), LoopConfigError>
    where
        F: FnMut(ReadingSet),
        S: FnMut(Duration),
    {
        if cycles == 0 {
            return Err(LoopConfigError::ZeroCycles);
        }
        if interval.is_zero() {
            return Err(LoopConfigError::ZeroInterval);
        }
        for cycle in 0..cycles {
            emit(self.poll(devices));
            if cycle + 1 < cycles {
                sleep(interval);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SensorCatalog;
    use w1_transport::{DeviceKind, MockBus};

    const INTERVAL: Duration = Duration::from_secs(1);

    fn sensor(bus: &MockBus, id: &str, celsius: f64) -> DeviceId {
        bus.push_device(id, DeviceKind::TemperatureSensor);
        bus.set_celsius(id, celsius);
        DeviceId::new(id)
    }

    #[test]
    fn poll_packages_identity_and_both_scales() {
        let bus = MockBus::empty();
        let id = sensor(&bus, "28-aabbccddeeff", 23.5);

        let poller = TemperaturePoller::new(&bus);
        let readings = poller.poll(&[id.clone()]);

        assert_eq!(readings, vec![Reading::new(id, 23.5)]);
        assert_eq!(readings[0].fahrenheit, 74.3);
    }

    #[test]
    fn poll_skips_unreadable_devices_and_keeps_order() {
        let bus = MockBus::empty();
        let first = sensor(&bus, "28-aa0000000001", 20.0);
        let gone = sensor(&bus, "28-bb0000000002", 21.0);
        let last = sensor(&bus, "28-cc0000000003", 22.0);
        bus.clear_celsius("28-bb0000000002");

        let poller = TemperaturePoller::new(&bus);
        let readings = poller.poll(&[first.clone(), gone, last.clone()]);

        let devices: Vec<&DeviceId> = readings.iter().map(|r| &r.device).collect();
        assert_eq!(devices, [&first, &last]);
    }

    #[test]
    fn poll_on_empty_catalog_is_empty_and_does_not_fail() {
        let bus = MockBus::empty();
        let poller = TemperaturePoller::new(&bus);
        assert!(poller.poll(&[]).is_empty());
    }

    #[test]
    fn refresh_then_poll_on_silent_bus_yields_empty_set() {
        let bus = MockBus::empty();
        let mut catalog = SensorCatalog::new(&bus);
        catalog.refresh();

        let poller = TemperaturePoller::new(&bus);
        assert!(poller.poll(catalog.devices()).is_empty());
    }

    #[test]
    fn run_loop_emits_once_per_cycle_and_sleeps_between() {
        let bus = MockBus::empty();
        let poller = TemperaturePoller::new(&bus);

        let mut emitted = Vec::new();
        let mut slept = Vec::new();
        let result = poller.run_loop_with(
            &[],
            3,
            INTERVAL,
            |set| emitted.push(set),
            |interval| slept.push(interval),
        );

        assert_eq!(result, Ok(()));
        assert_eq!(emitted.len(), 3);
        assert!(emitted.iter().all(ReadingSet::is_empty));
        // two sleeps between three cycles, none after the last
        assert_eq!(slept, [INTERVAL, INTERVAL]);
    }

    #[test]
    fn run_loop_rejects_zero_arguments_before_any_cycle() {
        let bus = MockBus::empty();
        let poller = TemperaturePoller::new(&bus);

        let mut emitted = 0u32;
        let result = poller.run_loop(&[], 0, INTERVAL, |_| emitted += 1);
        assert_eq!(result, Err(LoopConfigError::ZeroCycles));

        let result = poller.run_loop(&[], 3, Duration::ZERO, |_| emitted += 1);
        assert_eq!(result, Err(LoopConfigError::ZeroInterval));

        assert_eq!(emitted, 0);
    }

    #[test]
    fn failed_device_gets_another_chance_next_cycle() {
        let bus = MockBus::empty();
        let id = sensor(&bus, "28-aabbccddeeff", 23.5);
        bus.clear_celsius("28-aabbccddeeff");

        let poller = TemperaturePoller::new(&bus);
        let mut sizes = Vec::new();
        let result = poller.run_loop_with(
            &[id],
            2,
            INTERVAL,
            |set| {
                sizes.push(set.len());
                // the sensor comes back between the two cycles
                bus.set_celsius("28-aabbccddeeff", 24.0);
            },
            |_| {},
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sizes, [0, 1]);
    }
}
