//! Integration tests for the sunsight-common library.

use sunsight_common::{
    DeviceError, DeviceKeys, FieldValue, Format, KEY_PREFIX, Record, TelemetryMessage, decode,
    encode, status_key,
};

#[test]
fn test_full_telemetry_workflow() {
    let mut fields = Record::new();
    fields.insert("Pac", 1480.5);
    fields.insert("SOC", 72i64);
    fields.insert("StatusVal", "Normal");

    let message = TelemetryMessage::new("solar", fields);

    let json_bytes = encode(&message, Format::Json).expect("JSON encode failed");
    let decoded: TelemetryMessage = decode(&json_bytes, Format::Json).expect("JSON decode failed");

    assert_eq!(decoded.measurement, "solar");
    assert_eq!(decoded.fields.as_f64("Pac"), Some(1480.5));
    assert_eq!(decoded.fields.get("SOC"), Some(&FieldValue::Int(72)));
    assert_eq!(
        decoded.fields.get("StatusVal"),
        Some(&FieldValue::Text("Normal".to_string()))
    );

    let cbor_bytes = encode(&message, Format::Cbor).expect("CBOR encode failed");
    let from_cbor: TelemetryMessage =
        decode(&cbor_bytes, Format::Cbor).expect("CBOR decode failed");
    assert_eq!(from_cbor.fields, decoded.fields);
    assert!(
        cbor_bytes.len() < json_bytes.len(),
        "CBOR should be smaller than JSON"
    );
}

#[test]
fn test_device_key_layout() {
    let keys = DeviceKeys::new(KEY_PREFIX, "garage");
    assert_eq!(keys.telemetry, "sunsight/growatt/garage/telemetry");
    assert_eq!(keys.settings, "sunsight/growatt/garage/settings");
    assert_eq!(keys.error, "sunsight/growatt/garage/error");

    // the status key lives under "@", which no device name can collide
    // with because device names are validated against '/' and '*'
    assert_eq!(status_key(KEY_PREFIX), "sunsight/growatt/@/status");
}

#[test]
fn test_error_message_shape() {
    let message = DeviceError {
        name: "garage".to_string(),
        error: "device 'garage' input block 3000: broken pipe".to_string(),
    };

    let payload = encode(&message, Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    assert_eq!(value["name"], "garage");
    assert!(value["error"].as_str().unwrap().contains("broken pipe"));
}

#[test]
fn test_merged_record_round_trip() {
    let mut first = Record::new();
    first.insert("Vpv1", 253.1);
    first.insert("SOC", 71i64);

    let mut second = Record::new();
    second.insert("SOC", 72i64);

    first.merge(second);

    let bytes = encode(&first, Format::Json).unwrap();
    let back: Record = decode(&bytes, Format::Json).unwrap();
    assert_eq!(back.get("SOC"), Some(&FieldValue::Int(72)));
    assert_eq!(back.len(), 2);
}
