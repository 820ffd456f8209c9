use crate::{DeviceEntry, DeviceId, DeviceKind, Result, TransportError, W1Bus};
use std::cell::RefCell;
use std::collections::HashMap;

/// A simple in-process mock bus. Each bus instance is independent.
///
/// Scripting methods take `&self` so tests can change bus state while a
/// catalog or poller holds a shared borrow of the bus, the way hot-plug
/// changes bus state underneath a real master.
pub struct MockBus {
    inner: RefCell<Inner>,
}

#[derive(Default)]
struct Inner {
    devices: Vec<DeviceEntry>,
    celsius: HashMap<DeviceId, f64>,
    listing_error: Option<&'static str>,
}

impl MockBus {
    /// A bus with nothing attached.
    pub fn empty() -> Self {
        Self {
            inner: RefCell::new(Inner::default()),
        }
    }

    /// Attach a device to the end of the enumeration order.
    pub fn push_device(&self, id: &str, kind: DeviceKind) {
        self.inner
            .borrow_mut()
            .devices
            .push(DeviceEntry::new(id, kind));
    }

    /// Detach a device from the enumeration (its reading goes with it).
    pub fn remove_device(&self, id: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.devices.retain(|entry| entry.id.as_str() != id);
        inner.celsius.remove(&DeviceId::new(id));
    }

    /// Script the value the next reads of `id` will return.
    pub fn set_celsius(&self, id: &str, celsius: f64) {
        self.inner
            .borrow_mut()
            .celsius
            .insert(DeviceId::new(id), celsius);
    }

    /// Make reads of `id` report the device as absent.
    pub fn clear_celsius(&self, id: &str) {
        self.inner.borrow_mut().celsius.remove(&DeviceId::new(id));
    }

    /// Make the next enumerations fail outright.
    pub fn fail_listing(&self, reason: &'static str) {
        self.inner.borrow_mut().listing_error = Some(reason);
    }
}

impl W1Bus for MockBus {
    fn open(_path: &str) -> Result<Self> {
        // Seed one canned sensor so portable demo flows have something to read
        let bus = Self::empty();
        bus.push_device("28-000005e2fdc3", DeviceKind::TemperatureSensor);
        bus.set_celsius("28-000005e2fdc3", 21.5);
        Ok(bus)
    }

    fn list_devices(&self) -> Result<Vec<DeviceEntry>> {
        let inner = self.inner.borrow();
        if let Some(reason) = inner.listing_error {
            return Err(TransportError::Io(reason.to_string()));
        }
        Ok(inner.devices.clone())
    }

    fn read_celsius(&self, id: &DeviceId) -> Result<Option<f64>> {
        Ok(self.inner.borrow().celsius.get(id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_seeds_one_readable_sensor() -> anyhow::Result<()> {
        let bus = MockBus::open("mock0")?;
        let devices = bus.list_devices()?;
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].kind, DeviceKind::TemperatureSensor);
        assert_eq!(bus.read_celsius(&devices[0].id)?, Some(21.5));
        Ok(())
    }

    #[test]
    fn scripted_state_is_visible_through_shared_borrows() -> anyhow::Result<()> {
        let bus = MockBus::empty();
        let view = &bus;
        bus.push_device("28-aa", DeviceKind::TemperatureSensor);
        bus.set_celsius("28-aa", 20.0);
        assert_eq!(view.read_celsius(&DeviceId::new("28-aa"))?, Some(20.0));
        bus.clear_celsius("28-aa");
        assert_eq!(view.read_celsius(&DeviceId::new("28-aa"))?, None);
        bus.remove_device("28-aa");
        assert!(view.list_devices()?.is_empty());
        Ok(())
    }

    #[test]
    fn scripted_listing_failure_surfaces_as_io_error() {
        let bus = MockBus::empty();
        bus.fail_listing("bus reset failed");
        assert!(matches!(bus.list_devices(), Err(TransportError::Io(_))));
    }
}
