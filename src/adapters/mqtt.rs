//! MQTT client adapter.
//!
//! The component layer only needs session ensure/poll/publish; QoS 0,
//! fire-and-forget, no inbound subscriptions.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::mqtt::client::EspMqttClient`.
//! - **all other targets**: an in-memory session that accepts connections
//!   and logs every publish.

#[cfg(not(target_os = "espidf"))]
use log::debug;
use log::info;

use crate::ports::MqttPort;

pub struct MqttAdapter {
    client_id: heapless::String<24>,
    #[cfg(not(target_os = "espidf"))]
    sim_connected: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_published: u32,
}

impl MqttAdapter {
    pub fn new() -> Self {
        Self {
            client_id: heapless::String::new(),
            #[cfg(not(target_os = "espidf"))]
            sim_connected: false,
            #[cfg(not(target_os = "espidf"))]
            sim_published: 0,
        }
    }
}

impl Default for MqttAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MqttPort for MqttAdapter {
    fn set_client_id(&mut self, id: &str) {
        self.client_id.clear();
        for ch in id.chars() {
            if self.client_id.push(ch).is_err() {
                break;
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn connect(&mut self, broker: &str, port: u16) -> bool {
        // Device build:
        //   let conf = MqttClientConfiguration {
        //       client_id: Some(&self.client_id), ..Default::default()
        //   };
        //   EspMqttClient::new(&format!("mqtt://{broker}:{port}"), &conf, ...)
        info!("MqttAdapter(espidf): connect {}:{}", broker, port);
        false
    }

    #[cfg(not(target_os = "espidf"))]
    fn connect(&mut self, broker: &str, port: u16) -> bool {
        info!(
            "MqttAdapter(sim): connected to {}:{} as '{}'",
            broker, port, self.client_id
        );
        self.sim_connected = true;
        true
    }

    fn poll(&mut self) {
        // Keep-alive handling lives in the client; nothing to pump in sim.
    }

    #[cfg(target_os = "espidf")]
    fn is_connected(&self) -> bool {
        false
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_connected(&self) -> bool {
        self.sim_connected
    }

    #[cfg(target_os = "espidf")]
    fn publish(&mut self, _topic: &str, _payload: &str) {
        // client.enqueue(topic, QoS::AtMostOnce, false, payload.as_bytes())
    }

    #[cfg(not(target_os = "espidf"))]
    fn publish(&mut self, topic: &str, payload: &str) {
        self.sim_published += 1;
        debug!("MqttAdapter(sim): {} <- {}", topic, payload);
    }
}
