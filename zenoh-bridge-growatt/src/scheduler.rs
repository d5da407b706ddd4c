//! Poll scheduling: cadence, settings refresh and per-device error
//! backoff.
//!
//! Devices share a half-duplex bus, so cycles run sequentially. Each tick
//! polls every eligible device; a device that failed unexpectedly sits
//! out until its backoff expires, and the whole loop slows down to the
//! offline cadence when nothing answered at all (every night, for a solar
//! site without batteries).

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use sunsight_common::{DeviceError, DeviceKeys, Format, Record, TelemetryMessage, encode};

use crate::poller::{DevicePoller, PollError};
use crate::registry::ModelPlan;
use crate::sink::RecordSink;
use crate::transport::RegisterTransport;

/// Floor for inter-cycle sleep, so a slow bus cannot drive the loop into
/// a busy spin.
const MIN_SLEEP: Duration = Duration::from_millis(100);

/// Polling cadence.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Target time between cycles while at least one device is online.
    pub interval: Duration,
    /// Target time between cycles while every device is offline.
    pub offline_interval: Duration,
    /// Backoff applied to a device after an unexpected failure.
    pub error_interval: Duration,
    /// Cycles between settings refreshes.
    pub settings_refresh_ticks: u32,
}

#[derive(Debug)]
struct DeviceState {
    /// Remaining backoff; the device is skipped while non-zero.
    backoff: Duration,
    /// Ticks since the last successful settings read.
    ticks_since_settings: u32,
}

/// One scheduled device: identity, plan and mutable polling state.
pub struct Device {
    name: String,
    unit_id: u8,
    measurement: String,
    keys: DeviceKeys,
    plan: &'static ModelPlan,
    state: DeviceState,
}

impl Device {
    pub fn new(
        name: impl Into<String>,
        unit_id: u8,
        measurement: impl Into<String>,
        key_prefix: &str,
        plan: &'static ModelPlan,
        timing: &Timing,
    ) -> Self {
        let name = name.into();
        let keys = DeviceKeys::new(key_prefix, &name);
        Self {
            name,
            unit_id,
            measurement: measurement.into(),
            keys,
            plan,
            // Pre-saturated so the first reachable cycle refreshes
            // settings immediately.
            state: DeviceState {
                backoff: Duration::ZERO,
                ticks_since_settings: timing.settings_refresh_ticks,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Drives all configured devices over one shared transport.
pub struct Scheduler<T, S> {
    transport: T,
    sink: S,
    devices: Vec<Device>,
    timing: Timing,
    format: Format,
}

impl<T: RegisterTransport, S: RecordSink> Scheduler<T, S> {
    pub fn new(transport: T, sink: S, devices: Vec<Device>, timing: Timing, format: Format) -> Self {
        Self {
            transport,
            sink,
            devices,
            timing,
            format,
        }
    }

    /// Run the polling loop forever.
    pub async fn run(mut self) {
        info!(
            devices = self.devices.len(),
            interval = ?self.timing.interval,
            "Starting poll scheduler"
        );

        loop {
            let started = Instant::now();
            let any_online = self.tick().await;
            let sleep = next_sleep(any_online, started.elapsed(), &self.timing);
            debug!(any_online, sleep = ?sleep, "Cycle complete");
            tokio::time::sleep(sleep).await;
        }
    }

    /// Run one poll cycle over all devices. Returns whether any device
    /// produced telemetry.
    pub async fn tick(&mut self) -> bool {
        let mut any_online = false;

        for device in &mut self.devices {
            if device.state.backoff > Duration::ZERO {
                device.state.backoff = device.state.backoff.saturating_sub(self.timing.interval);
                debug!(
                    device = %device.name,
                    remaining = ?device.state.backoff,
                    "Device in backoff, skipped"
                );
                continue;
            }

            device.state.ticks_since_settings =
                device.state.ticks_since_settings.saturating_add(1);

            if run_device_cycle(
                &mut self.transport,
                &self.sink,
                &self.timing,
                self.format,
                device,
            )
            .await
            {
                any_online = true;
            }
        }

        any_online
    }
}

/// Poll one device: telemetry every cycle, settings on the slow schedule.
/// Returns whether the device was reachable.
async fn run_device_cycle<T: RegisterTransport, S: RecordSink>(
    transport: &mut T,
    sink: &S,
    timing: &Timing,
    format: Format,
    device: &mut Device,
) -> bool {
    let Device {
        name,
        unit_id,
        measurement,
        keys,
        plan,
        state,
    } = device;
    let poller = DevicePoller::new(name, *unit_id, *plan);

    let telemetry = match poller.poll_telemetry(transport).await {
        Ok(record) => record,
        Err(e) => {
            enter_backoff(sink, timing, format, name, keys, state, &e).await;
            return false;
        }
    };

    if telemetry.is_empty() {
        debug!(device = %name, "Device offline this cycle");
        return false;
    }

    // Settings are only refreshed while the device is reachable; the
    // counter resets on success so a failed read retries on the next
    // eligible cycle instead of waiting out the full period.
    if state.ticks_since_settings >= timing.settings_refresh_ticks {
        match poller.poll_settings(transport).await {
            Ok(settings) => {
                state.ticks_since_settings = 0;
                publish_settings(sink, format, measurement, keys, settings).await;
            }
            Err(e) => {
                enter_backoff(sink, timing, format, name, keys, state, &e).await;
                return false;
            }
        }
    }

    let message = TelemetryMessage::new(measurement.clone(), telemetry);
    publish(sink, &keys.telemetry, &message, format, false).await;
    true
}

async fn publish_settings<S: RecordSink>(
    sink: &S,
    format: Format,
    measurement: &str,
    keys: &DeviceKeys,
    settings: Record,
) {
    if settings.is_empty() {
        return;
    }
    let message = TelemetryMessage::new(measurement, settings);
    // Retained so late joiners see the last snapshot without waiting out
    // the refresh period.
    publish(sink, &keys.settings, &message, format, true).await;
}

async fn enter_backoff<S: RecordSink>(
    sink: &S,
    timing: &Timing,
    format: Format,
    name: &str,
    keys: &DeviceKeys,
    state: &mut DeviceState,
    error: &PollError,
) {
    warn!(device = %name, %error, backoff = ?timing.error_interval, "Poll failed, backing off");
    let message = DeviceError {
        name: name.to_string(),
        error: error.to_string(),
    };
    publish(sink, &keys.error, &message, format, false).await;
    state.backoff = timing.error_interval;
}

async fn publish<S: RecordSink, M: Serialize>(
    sink: &S,
    key: &str,
    message: &M,
    format: Format,
    retain: bool,
) {
    match encode(message, format) {
        Ok(payload) => {
            if let Err(e) = sink.publish(key, payload, retain).await {
                warn!(error = %e, "Publish failed");
            }
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to encode message");
        }
    }
}

/// Sleep until the next cycle: aim for the cadence target minus the time
/// the cycle itself took, floored so the loop never spins.
fn next_sleep(any_online: bool, elapsed: Duration, timing: &Timing) -> Duration {
    let target = if any_online {
        timing.interval
    } else {
        timing.offline_interval
    };
    target.saturating_sub(elapsed).max(MIN_SLEEP)
}
