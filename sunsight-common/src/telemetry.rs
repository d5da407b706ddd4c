use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single decoded register value.
///
/// Unscaled integer registers stay integers; anything scaled (or natively
/// floating point) becomes a float; serial numbers, firmware versions and
/// derived status descriptions are text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

/// One poll cycle's worth of decoded fields for a single device.
///
/// Created fresh each cycle; blocks read within the same cycle are merged
/// by field name. Ordered so serialized payloads are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Union with another record, last write wins on name collision.
    pub fn merge(&mut self, other: Record) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Numeric view of a field, if present and numeric.
    pub fn as_f64(&self, name: &str) -> Option<f64> {
        match self.0.get(name)? {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Record(iter.into_iter().collect())
    }
}

/// Telemetry message published once per successful poll cycle per device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryMessage {
    /// Unix epoch seconds when the poll completed.
    pub time: i64,

    /// Measurement tag from device configuration (e.g. an InfluxDB
    /// measurement name downstream).
    pub measurement: String,

    /// Decoded fields.
    pub fields: Record,
}

impl TelemetryMessage {
    pub fn new(measurement: impl Into<String>, fields: Record) -> Self {
        Self {
            time: current_timestamp_secs(),
            measurement: measurement.into(),
            fields,
        }
    }
}

/// Error notification published when a device transitions into backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceError {
    /// Device name from configuration.
    pub name: String,

    /// Human-readable failure description.
    pub error: String,
}

/// Current timestamp in seconds since Unix epoch.
///
/// Returns 0 if system time is before Unix epoch (should never happen in
/// practice).
pub fn current_timestamp_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_merge_last_write_wins() {
        let mut a = Record::new();
        a.insert("Vpv1", 253.1);
        a.insert("SOC", 55i64);

        let mut b = Record::new();
        b.insert("SOC", 56i64);
        b.insert("Pac", 1480.0);

        a.merge(b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.get("SOC"), Some(&FieldValue::Int(56)));
        assert_eq!(a.as_f64("Vpv1"), Some(253.1));
    }

    #[test]
    fn test_record_serializes_as_flat_map() {
        let mut record = Record::new();
        record.insert("Pac", 1480.5);
        record.insert("Status", "Normal");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Pac":1480.5,"Status":"Normal"}"#);
    }

    #[test]
    fn test_telemetry_message_envelope() {
        let mut fields = Record::new();
        fields.insert("Eac_Today", 12.3);

        let msg = TelemetryMessage::new("growatt", fields);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["measurement"], "growatt");
        assert_eq!(value["fields"]["Eac_Today"], 12.3);
        assert!(value["time"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_field_value_untagged() {
        assert_eq!(serde_json::to_string(&FieldValue::Int(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&FieldValue::Text("Fault".into())).unwrap(),
            "\"Fault\""
        );
    }
}
