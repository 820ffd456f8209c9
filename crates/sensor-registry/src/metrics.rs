use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Clone)]
pub struct PollMetrics {
    pub cycles: IntCounter,
    pub readings: IntCounter,
    pub read_misses: IntCounter,
    pub devices_cataloged: IntGauge,
}

#[derive(Clone)]
pub struct MetricsHub {
    pub registry: Registry,
    pub poll: PollMetrics,
}

impl MetricsHub {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let cycles = IntCounter::new("tw_poll_cycles", "Total poll cycles run")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let readings = IntCounter::new("tw_readings", "Total temperature readings produced")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let read_misses =
            IntCounter::new("tw_read_misses", "Reads skipped because a device was absent")
                .map_err(|e| format!("metrics init error: {e}"))?;
        let devices_cataloged = IntGauge::new(
            "tw_devices_cataloged",
            "Temperature sensors in the current catalog",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let poll = PollMetrics {
            cycles,
            readings,
            read_misses,
            devices_cataloged,
        };
        let _ = registry.register(Box::new(poll.cycles.clone()));
        let _ = registry.register(Box::new(poll.readings.clone()));
        let _ = registry.register(Box::new(poll.read_misses.clone()));
        let _ = registry.register(Box::new(poll.devices_cataloged.clone()));
        Ok(Self { registry, poll })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
