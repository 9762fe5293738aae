//! Device identity derived from the network interface's MAC address.
//!
//! The GUID is the EUI-48 spelled out: `EUI48:aa:bb:cc:dd:ee:ff` — exactly
//! 23 characters, which happens to be the classic MQTT client-id limit.
//! It is:
//! - Deterministic across reboots (factory-burned MAC)
//! - Prefixed to every telemetry record as `device_id=<guid>`
//! - Used (truncated to 23 chars) as the MQTT client id

/// GUID string: "EUI48:aa:bb:cc:dd:ee:ff" (23 chars).
pub type GuidString = heapless::String<24>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Spell the MAC out as the device GUID.
pub fn guid(mac: &MacAddress) -> GuidString {
    let mut id = GuidString::new();
    use core::fmt::Write;
    let _ = write!(
        id,
        "EUI48:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    );
    id
}

/// The GUID bounded to the 23 characters an MQTT client id may carry.
pub fn mqtt_client_id(guid: &str) -> &str {
    &guid[..guid.len().min(23)]
}
