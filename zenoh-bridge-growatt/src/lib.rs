//! Zenoh bridge for Growatt solar inverters and smart meters.
//!
//! The bridge polls devices over Modbus (RTU or TCP), decodes their
//! register blocks into typed records using built-in per-model maps, and
//! publishes the results to Zenoh.
//!
//! # Key Expressions
//!
//! ```text
//! sunsight/growatt/<device>/telemetry
//! sunsight/growatt/<device>/settings
//! sunsight/growatt/<device>/error
//! sunsight/growatt/@/status
//! ```
//!
//! Where:
//! - `telemetry` - decoded input registers, published every poll cycle
//! - `settings` - decoded holding registers, published on the slow
//!   settings schedule (retained for late joiners)
//! - `error` - device failure notifications on backoff transitions
//! - `@/status` - bridge liveness

pub mod config;
pub mod decode;
pub mod model;
pub mod poller;
pub mod reader;
pub mod registry;
pub mod scheduler;
pub mod sink;
pub mod status;
pub mod transport;
