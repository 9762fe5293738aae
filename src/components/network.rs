//! Network component: WiFi connectivity, MQTT session keep-alive, and the
//! periodic fetch/parse/apply of the remote HUD directive.
//!
//! Two nested machines share one tick:
//!
//! - the **WiFi state** follows whatever the station stack reports.  Any
//!   non-connected status that sits unchanged for [`STUCK_RETRY_MS`], or an
//!   idle stack with [`IDLE_DOWNTIME_MS`] of continuous downtime, restarts
//!   the association (disconnect + begin).  The failed variants differ only
//!   in the message shown on the HUD;
//! - while **connected**, the MQTT session is polled every tick and, every
//!   `fetch_interval_ms`, the session is (re)established and one HTTP GET
//!   of the remote status document is parsed and applied to the blackboard.
//!
//! Outbound telemetry ([`push_remote`](NetworkComponent::push_remote)) is
//! fire-and-forget: with the MQTT session down the record is dropped on the
//! floor — no buffer, no retry.

use log::{debug, error, info};

use crate::adapters::device_id;
use crate::config::SystemConfig;
use crate::device::{Alert, Device};
use crate::directive::{RemoteDirective, parse_remote};
use crate::error::CommsError;
use crate::ports::{HttpPort, MqttPort, WifiPort, WifiStatus};

/// Re-trigger the association when a non-connected status stops changing.
const STUCK_RETRY_MS: u32 = 3_000;
/// Re-trigger while idle after this much continuous downtime.
const IDLE_DOWNTIME_MS: u32 = 5_000;
/// Consume at most this much of the fetched status document.
const MAX_DOC_BYTES: usize = 512;

pub struct NetworkComponent<W: WifiPort, H: HttpPort, M: MqttPort> {
    wifi: W,
    http: H,
    mqtt: M,
    config: SystemConfig,
    guid: heapless::String<24>,
    wifi_state: WifiStatus,
    /// When the currently observed status was first seen.
    state_since_ms: u32,
    /// Start of the current connectivity outage.
    downtime_since_ms: u32,
    /// Pacing for the MQTT-ensure + HTTP fetch cycle.
    lastfetch_ms: u32,
}

impl<W: WifiPort, H: HttpPort, M: MqttPort> NetworkComponent<W, H, M> {
    pub fn new(wifi: W, http: H, mqtt: M, config: SystemConfig) -> Self {
        Self {
            wifi,
            http,
            mqtt,
            config,
            guid: heapless::String::new(),
            wifi_state: WifiStatus::Disconnected,
            state_since_ms: 0,
            downtime_since_ms: 0,
            lastfetch_ms: 0,
        }
    }

    pub fn setup(&mut self, now_ms: u32, device: &mut Device) {
        let mac = self.wifi.mac_address();
        self.guid = device_id::guid(&mac);
        device.set_guid(&self.guid);
        // Some MQTT daemons reject id-less connections.
        self.mqtt.set_client_id(device_id::mqtt_client_id(&self.guid));

        device.set_alert(Alert::WifiDown);
        self.downtime_since_ms = now_ms;
        self.state_since_ms = now_ms;
        self.lastfetch_ms = now_ms;
        self.apply_state_change(now_ms, WifiStatus::Idle, device);
        self.wifi_state = WifiStatus::Idle;
    }

    pub fn wifi_state(&self) -> WifiStatus {
        self.wifi_state
    }

    pub fn tick(&mut self, now_ms: u32, device: &mut Device) {
        let observed = self.wifi.status();

        if observed != self.wifi_state {
            self.apply_state_change(now_ms, observed, device);
            self.wifi_state = observed;
            self.state_since_ms = now_ms;
            if observed == WifiStatus::Connected {
                self.ensure_mqtt();
                self.sample(device);
                self.lastfetch_ms = now_ms;
            }
        } else if observed != WifiStatus::Connected {
            let stuck = now_ms.wrapping_sub(self.state_since_ms) >= STUCK_RETRY_MS;
            let idle_down = observed == WifiStatus::Idle
                && now_ms.wrapping_sub(self.downtime_since_ms) >= IDLE_DOWNTIME_MS;
            if stuck || idle_down {
                self.apply_state_change(now_ms, WifiStatus::Idle, device);
                self.wifi_state = WifiStatus::Idle;
                self.state_since_ms = now_ms;
                if idle_down {
                    self.downtime_since_ms = now_ms;
                }
            }
        }

        if self.wifi_state == WifiStatus::Connected {
            // Keep-alives must not wait for the fetch cadence.
            self.mqtt.poll();
            if now_ms.wrapping_sub(self.lastfetch_ms) >= self.config.fetch_interval_ms {
                self.ensure_mqtt();
                self.sample(device);
                // After the poll, so we don't hammer on failure.
                self.lastfetch_ms = now_ms;
            }
        }
    }

    /// Forward one telemetry record to the broker.  Silently dropped while
    /// the session is down.
    pub fn push_remote(&mut self, topic: &str, formdata: &str) {
        info!(
            "push_remote: {} :: device_id={}&{}",
            topic, self.guid, formdata
        );
        if self.mqtt.is_connected() {
            self.mqtt
                .publish(topic, &format!("device_id={}&{}", self.guid, formdata));
        }
    }

    // ── WiFi state handling ───────────────────────────────────

    fn apply_state_change(&mut self, now_ms: u32, new: WifiStatus, device: &mut Device) {
        info!(
            "NetworkComponent: Wifi state {:?} -> {:?}",
            self.wifi_state, new
        );

        if self.wifi_state == WifiStatus::Connected {
            self.downtime_since_ms = now_ms;
        }
        let downtime = format!(
            "{}s downtime",
            now_ms.wrapping_sub(self.downtime_since_ms) / 1000
        );

        match new {
            WifiStatus::Idle => {
                device.set_alert(Alert::WifiDown);
                device.set_error("Wifi connecting", &downtime);
                self.wifi.disconnect();
                self.wifi
                    .begin(&self.config.wifi_ssid, &self.config.wifi_password);
                info!("NetworkComponent: Wifi connecting...");
            }
            WifiStatus::Connecting => {
                device.set_alert(Alert::WifiDown);
                device.set_error("Wifi connecting", &downtime);
            }
            WifiStatus::Connected => {
                device.clear_alert(Alert::WifiDown);
            }
            WifiStatus::WrongPassword => {
                device.set_alert(Alert::WifiDown);
                device.set_error("Wifi wrong creds.", &downtime);
            }
            WifiStatus::NoSsid | WifiStatus::ConnectFailed | WifiStatus::Disconnected => {
                device.set_alert(Alert::WifiDown);
                device.set_error(&format!("Wifi state {:?}", new), &downtime);
            }
        }
    }

    // ── MQTT ──────────────────────────────────────────────────

    fn ensure_mqtt(&mut self) {
        self.mqtt.poll();
        if !self.mqtt.is_connected() {
            if self
                .mqtt
                .connect(&self.config.mqtt_broker, self.config.mqtt_port)
            {
                info!(
                    "NetworkComponent: MQTT connected to {}",
                    self.config.mqtt_broker
                );
            } else {
                error!(
                    "NetworkComponent: MQTT connection to {} failed",
                    self.config.mqtt_broker
                );
            }
        }
    }

    // ── Remote directive ──────────────────────────────────────

    fn sample(&mut self, device: &mut Device) {
        debug!("NetworkComponent: fetch/update");
        match self.http.get(&self.config.hud_url) {
            Ok(payload) => {
                // An empty document means "nothing to show" — leave the
                // screen alone.
                if !payload.is_empty() {
                    let doc = truncate_to(&payload, MAX_DOC_BYTES);
                    let res = parse_remote(doc);
                    Self::handle_remote(&res, device);
                }
            }
            Err(CommsError::HttpStatus(code)) => {
                device.set_error(&format!("HTTP/{code}"), "(error)");
            }
            Err(_) => {
                device.set_error("HTTP/-1", "(error)");
            }
        }
    }

    fn handle_remote(res: &RemoteDirective<'_>, device: &mut Device) {
        device.set_text(res.line0.unwrap_or(""), res.line1.unwrap_or(""), res.color);
        if let Some(action) = res.action {
            device.request_action(action);
        }
    }
}

/// Bound `s` to `max` bytes without splitting a UTF-8 sequence.
fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
