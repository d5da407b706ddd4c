//! Integration tests: full pipeline from canned bus registers to decoded
//! records, using the real built-in register maps.

use std::collections::HashMap;

use sunsight_common::{FieldValue, Format, TelemetryMessage, encode};
use zenoh_bridge_growatt::poller::DevicePoller;
use zenoh_bridge_growatt::registry::{RegisterClass, Registry};
use zenoh_bridge_growatt::transport::{RegisterTransport, TransportError};

/// Transport answering from canned register images keyed by block base.
/// Unmapped blocks time out, like a real device that does not implement
/// them.
struct FakeBus {
    blocks: HashMap<(u8, u16), Vec<u16>>,
}

impl FakeBus {
    fn new() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }

    fn with_block(mut self, unit: u8, base: u16, words: Vec<u16>) -> Self {
        self.blocks.insert((unit, base), words);
        self
    }
}

impl RegisterTransport for FakeBus {
    async fn read_registers(
        &mut self,
        _class: RegisterClass,
        address: u16,
        count: u16,
        unit: u8,
    ) -> Result<Vec<u16>, TransportError> {
        match self.blocks.get(&(unit, address)) {
            Some(words) => {
                let mut response = words.clone();
                response.truncate(count as usize);
                Ok(response)
            }
            None => Err(TransportError::Timeout),
        }
    }
}

fn words_f32(value: f32) -> [u16; 2] {
    let bits = value.to_bits();
    [(bits >> 16) as u16, bits as u16]
}

#[tokio::test]
async fn test_min_tlxh_full_cycle() {
    let mut inverter = vec![0u16; 125];
    inverter[0] = 0x0101; // status: Normal / Normal Module
    inverter[3] = 2531; // Vpv1 = 253.1 V
    inverter[24] = 14805; // Pac = 1480.5 W (canonical word order)
    inverter[51] = 0x8480; // Eac_Total shipped low-word-first by firmware
    inverter[52] = 0x001E;
    inverter[86] = 3; // DeratingMode = Vac
    inverter[105] = 26; // FaultCode = PV Isolation Low

    let mut battery = vec![0u16; 125];
    battery[3] = 0xFFE7; // Ibat = -2.5 A
    battery[4] = 72; // SOC

    // third telemetry block (3250) deliberately unmapped: times out
    let mut bus = FakeBus::new()
        .with_block(1, 3000, inverter)
        .with_block(1, 3125, battery);

    let registry = Registry::with_builtin_models().unwrap();
    let plan = registry.plan("min-tlxh").unwrap();
    let poller = DevicePoller::new("garage", 1, plan);

    let record = poller.poll_telemetry(&mut bus).await.unwrap();

    // values from both reachable blocks, merged
    assert_eq!(record.as_f64("Vpv1"), Some(253.1));
    assert_eq!(record.as_f64("Pac"), Some(1480.5));
    assert_eq!(record.as_f64("Ibat"), Some(-2.5));
    assert_eq!(record.get("SOC"), Some(&FieldValue::Int(72)));

    // the accumulator decoded through the word-swap heuristic:
    // 0x8480_001E is implausible, 0x001E_8480 = 2_000_000 raw = 200 MWh
    assert_eq!(record.as_f64("Eac_Total"), Some(200_000.0));

    // derived text appended without touching the raw codes
    assert_eq!(record.get("InverterStatus"), Some(&FieldValue::Int(0x0101)));
    assert_eq!(
        record.get("StatusVal"),
        Some(&FieldValue::Text("Normal".to_string()))
    );
    assert_eq!(
        record.get("StatusMode"),
        Some(&FieldValue::Text("Normal Module".to_string()))
    );
    assert_eq!(
        record.get("FaultText"),
        Some(&FieldValue::Text("PV Isolation Low".to_string()))
    );
    assert_eq!(
        record.get("DeratingText"),
        Some(&FieldValue::Text("Vac".to_string()))
    );

    // the timed-out 3250 block contributed nothing
    assert!(!record.contains("BatPackNum"));
}

#[tokio::test]
async fn test_min_tlxh_settings_cycle() {
    let mut base = vec![0u16; 125];
    base[0] = 1; // OnOff
    base[3] = 100; // ActivePowerRate

    let mut identity = vec![0u16; 125];
    // SerialNumber "ABC1234567" at offset 1, NUL padded
    let serial = [0x4142u16, 0x4331, 0x3233, 0x3435, 0x3637];
    identity[1..6].copy_from_slice(&serial);
    identity[21] = 0x544C; // FirmwareVersion "TL3.0"
    identity[22] = 0x332E;
    identity[23] = 0x3000;

    let mut battery = vec![0u16; 125];
    battery[0] = 1; // BatteryType

    let mut bus = FakeBus::new()
        .with_block(1, 0, base)
        .with_block(1, 3000, identity)
        .with_block(1, 3125, battery);

    let registry = Registry::with_builtin_models().unwrap();
    let plan = registry.plan("min-tlxh").unwrap();
    let poller = DevicePoller::new("garage", 1, plan);

    let record = poller.poll_settings(&mut bus).await.unwrap();

    assert_eq!(record.get("OnOff"), Some(&FieldValue::Int(1)));
    assert_eq!(record.get("ActivePowerRate"), Some(&FieldValue::Int(100)));
    assert_eq!(
        record.get("SerialNumber"),
        Some(&FieldValue::Text("ABC1234567".to_string()))
    );
    assert_eq!(
        record.get("FirmwareVersion"),
        Some(&FieldValue::Text("TL3.0".to_string()))
    );
    assert_eq!(record.get("BatteryType"), Some(&FieldValue::Int(1)));

    // settings records carry no derived status text
    assert!(!record.contains("StatusVal"));
    assert!(!record.contains("FaultText"));
}

#[tokio::test]
async fn test_meter_float_registers() {
    let mut main = vec![0u16; 80];
    main[0..2].copy_from_slice(&words_f32(233.2));
    main[12..14].copy_from_slice(&words_f32(1520.75)); // Power_L1
    main[14..16].copy_from_slice(&words_f32(f32::NAN)); // Power_L2: phase not connected
    main[70..72].copy_from_slice(&words_f32(49.98)); // Frequency

    let energy = words_f32(12345.6).to_vec();

    let mut bus = FakeBus::new()
        .with_block(12, 0, main)
        .with_block(12, 342, energy);

    let registry = Registry::with_builtin_models().unwrap();
    let plan = registry.plan("sdm630").unwrap();
    let poller = DevicePoller::new("grid-meter", 12, plan);

    let record = poller.poll_telemetry(&mut bus).await.unwrap();

    assert_eq!(record.as_f64("Voltage_L1"), Some(233.2));
    assert_eq!(record.as_f64("Power_L1"), Some(1520.75));
    assert_eq!(record.as_f64("Power_L2"), Some(0.0), "NaN collapses to 0.0");
    assert_eq!(record.as_f64("Frequency"), Some(49.98));
    assert_eq!(record.as_f64("TotalActiveEnergy"), Some(12345.5996));

    // meters use the plain status table and have no status register here
    assert!(!record.contains("StatusVal"));
}

#[tokio::test]
async fn test_unreachable_device_yields_empty_record() {
    let mut bus = FakeBus::new();

    let registry = Registry::with_builtin_models().unwrap();
    let plan = registry.plan("sph").unwrap();
    let poller = DevicePoller::new("night", 1, plan);

    let record = poller.poll_telemetry(&mut bus).await.unwrap();
    assert!(record.is_empty());
}

#[test]
fn test_published_envelope_shape() {
    let mut fields = sunsight_common::Record::new();
    fields.insert("Pac", 1480.5);
    fields.insert("StatusVal", "Normal");

    let message = TelemetryMessage::new("solar", fields);
    let payload = encode(&message, Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    assert!(value["time"].as_i64().unwrap() > 0);
    assert_eq!(value["measurement"], "solar");
    assert_eq!(value["fields"]["Pac"], 1480.5);
    assert_eq!(value["fields"]["StatusVal"], "Normal");
}
