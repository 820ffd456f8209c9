//! sensor-registry: discovery and cadence polling of 1-Wire temperature sensors

mod types;
pub use types::{Reading, ReadingSet};

mod convert;
pub use convert::fahrenheit;

mod catalog;
pub use catalog::{is_temperature_sensor, SensorCatalog, TEMP_FAMILY_PREFIX};

mod poller;
pub use poller::{LoopConfigError, TemperaturePoller};

mod metrics;
pub use metrics::{MetricsHub, PollMetrics};
