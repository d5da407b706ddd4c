/// Default key expression prefix for Sunsight telemetry.
pub const KEY_PREFIX: &str = "sunsight/growatt";

/// Key expressions published for one configured device.
///
/// Keys follow the pattern `<prefix>/<device>/<kind>`:
///
/// ```text
/// sunsight/growatt/garage/telemetry
/// sunsight/growatt/garage/settings
/// sunsight/growatt/garage/error
/// ```
#[derive(Debug, Clone)]
pub struct DeviceKeys {
    pub telemetry: String,
    pub settings: String,
    pub error: String,
}

impl DeviceKeys {
    pub fn new(prefix: &str, device: &str) -> Self {
        Self {
            telemetry: format!("{}/{}/telemetry", prefix, device),
            settings: format!("{}/{}/settings", prefix, device),
            error: format!("{}/{}/error", prefix, device),
        }
    }
}

/// Key expression for bridge status messages.
///
/// # Example
/// ```
/// use sunsight_common::keyexpr::status_key;
///
/// assert_eq!(status_key("sunsight/growatt"), "sunsight/growatt/@/status");
/// ```
pub fn status_key(prefix: &str) -> String {
    format!("{}/@/status", prefix)
}

/// Wildcard matching every device key under a prefix.
pub fn all_devices_wildcard(prefix: &str) -> String {
    format!("{}/**", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_keys() {
        let keys = DeviceKeys::new("sunsight/growatt", "garage");
        assert_eq!(keys.telemetry, "sunsight/growatt/garage/telemetry");
        assert_eq!(keys.settings, "sunsight/growatt/garage/settings");
        assert_eq!(keys.error, "sunsight/growatt/garage/error");
    }

    #[test]
    fn test_status_key() {
        assert_eq!(status_key(KEY_PREFIX), "sunsight/growatt/@/status");
    }
}
