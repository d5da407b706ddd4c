//! Human-readable status, fault and derating text derived from decoded
//! registers.
//!
//! [`postprocess`] runs once over a merged telemetry record and appends
//! text fields next to the raw codes. It never removes or rewrites a raw
//! field and never fails: absent codes simply produce no text.

use sunsight_common::Record;

use crate::model::ModelFamily;

/// Machine status, the low byte of the composite status word on hybrid
/// models and the whole word on the vendor's plain state table.
fn machine_status_text(code: u16) -> Option<&'static str> {
    Some(match code {
        0 => "Waiting",
        1 => "Normal",
        3 => "Fault",
        4 => "Flash",
        5 => "PVBATOnline",
        6 => "BatOnline",
        7 => "PVOffline",
        8 => "BatOffline",
        _ => return None,
    })
}

/// Run mode, the high byte of the composite status word.
fn run_mode_text(code: u16) -> Option<&'static str> {
    Some(match code {
        0 => "Waiting Module",
        1 => "Normal Module",
        3 => "Fault Module",
        4 => "Flash Module",
        5 => "PVBATOnline Module",
        6 => "BatOnline Module",
        7 => "PVOffline Mode",
        8 => "BatOffline Mode",
        _ => return None,
    })
}

/// Plain three-state table used by grid-tie inverters and meters.
fn plain_status_text(code: u16) -> Option<&'static str> {
    Some(match code {
        0 => "Waiting",
        1 => "Normal",
        3 => "Fault",
        _ => return None,
    })
}

/// Fault code text, from the vendor's published fault table. Codes 1-23
/// map onto the documented "Error 100-122" numbering; anything outside
/// the table falls through as `Error <code>`.
pub fn fault_text(code: u16) -> String {
    match code {
        0 => "None".to_string(),
        1..=23 => format!("Error Code: {}", 99 + code),
        24 => "Auto Test Failed".to_string(),
        25 => "No AC Connection".to_string(),
        26 => "PV Isolation Low".to_string(),
        27 => "Residual Current High".to_string(),
        28 => "DC Current High".to_string(),
        29 => "PV Voltage High".to_string(),
        30 => "AC Voltage Outrange".to_string(),
        31 => "AC Freq Outrange".to_string(),
        32 => "Module Hot".to_string(),
        other => format!("Error {}", other),
    }
}

/// Derating reason text, verbatim from the vendor table (including its
/// spelling of entry 0 and the empty entry 2).
pub fn derating_text(code: u16) -> &'static str {
    match code {
        0 => "No Deratring",
        1 => "PV",
        2 => "",
        3 => "Vac",
        4 => "Fac",
        5 => "Tboost",
        6 => "Tinv",
        7 => "Control",
        8 => "*LoadSpeed",
        9 => "*OverBackByTime",
        _ => "Unknown",
    }
}

/// Append derived text fields to a merged telemetry record.
pub fn postprocess(record: &mut Record, family: ModelFamily) {
    if let Some(raw) = code_of(record, "InverterStatus") {
        if family.is_hybrid() {
            let status = raw & 0xFF;
            let mode = raw >> 8;
            let status_text = machine_status_text(status)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown({})", status));
            let mode_text = run_mode_text(mode)
                .map(str::to_string)
                .unwrap_or_else(|| format!("UnknownMode({})", mode));
            record.insert("StatusVal", status_text);
            record.insert("StatusMode", mode_text);
        } else {
            let text = plain_status_text(raw)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown({})", raw));
            record.insert("StatusText", text);
        }
    }

    if let Some(code) = code_of(record, "FaultCode") {
        record.insert("FaultText", fault_text(code));
    }

    if let Some(code) = code_of(record, "DeratingMode") {
        record.insert("DeratingText", derating_text(code).to_string());
    }
}

/// Read a raw code field as u16, tolerating records where decoding
/// produced a float. Out-of-range values yield nothing.
fn code_of(record: &Record, name: &str) -> Option<u16> {
    let value = record.as_f64(name)?;
    if (0.0..=65_535.0).contains(&value) {
        Some(value as u16)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunsight_common::FieldValue;

    #[test]
    fn test_hybrid_status_splits_bytes() {
        let mut record = Record::new();
        // high byte 6 (BatOnline Module), low byte 6 (BatOnline)
        record.insert("InverterStatus", 0x0606i64);
        postprocess(&mut record, ModelFamily::MinTlxh);

        assert_eq!(
            record.get("StatusVal"),
            Some(&FieldValue::Text("BatOnline".to_string()))
        );
        assert_eq!(
            record.get("StatusMode"),
            Some(&FieldValue::Text("BatOnline Module".to_string()))
        );
        assert!(record.get("StatusText").is_none());
        // raw field survives untouched
        assert_eq!(record.get("InverterStatus"), Some(&FieldValue::Int(0x0606)));
    }

    #[test]
    fn test_plain_status_has_no_hybrid_states() {
        let mut record = Record::new();
        record.insert("InverterStatus", 6i64);
        postprocess(&mut record, ModelFamily::Tl3x);

        assert_eq!(
            record.get("StatusText"),
            Some(&FieldValue::Text("Unknown(6)".to_string()))
        );
        assert!(record.get("StatusVal").is_none());
        assert!(record.get("StatusMode").is_none());
    }

    #[test]
    fn test_unknown_hybrid_codes() {
        let mut record = Record::new();
        record.insert("InverterStatus", 0x0902i64);
        postprocess(&mut record, ModelFamily::StorageSph);

        assert_eq!(
            record.get("StatusVal"),
            Some(&FieldValue::Text("Unknown(2)".to_string()))
        );
        assert_eq!(
            record.get("StatusMode"),
            Some(&FieldValue::Text("UnknownMode(9)".to_string()))
        );
    }

    #[test]
    fn test_fault_table() {
        assert_eq!(fault_text(0), "None");
        assert_eq!(fault_text(5), "Error Code: 104");
        assert_eq!(fault_text(23), "Error Code: 122");
        assert_eq!(fault_text(26), "PV Isolation Low");
        assert_eq!(fault_text(32), "Module Hot");
        assert_eq!(fault_text(999), "Error 999");
    }

    #[test]
    fn test_derating_table_is_verbatim() {
        assert_eq!(derating_text(0), "No Deratring");
        assert_eq!(derating_text(2), "");
        assert_eq!(derating_text(9), "*OverBackByTime");
        assert_eq!(derating_text(42), "Unknown");
    }

    #[test]
    fn test_absent_codes_add_nothing() {
        let mut record = Record::new();
        record.insert("Vpv1", 250.5f64);
        postprocess(&mut record, ModelFamily::MinTlxh);

        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_fault_and_derating_text_appended() {
        let mut record = Record::new();
        record.insert("FaultCode", 25i64);
        record.insert("DeratingMode", 3i64);
        postprocess(&mut record, ModelFamily::Max);

        assert_eq!(
            record.get("FaultText"),
            Some(&FieldValue::Text("No AC Connection".to_string()))
        );
        assert_eq!(
            record.get("DeratingText"),
            Some(&FieldValue::Text("Vac".to_string()))
        );
    }
}
