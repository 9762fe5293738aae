//! The tick scheduler that owns the whole HUD.
//!
//! [`HudService`] constructs-and-owns the [`Device`] blackboard plus every
//! component, and drives them in a fixed, deterministic order once per
//! tick:
//!
//! ```text
//! display → led → sunscreen → temperature → air quality → network → ping
//!          └────────────── then drain Device outbox ──────────────┘
//! ```
//!
//! Blackboard writes are visible to components ticked later in the same
//! cycle and to everyone on the next cycle; nothing blocks, so there is no
//! other synchronisation.  Components never outlive the service, which
//! replaces the raw cross-component pointers of older firmwares with plain
//! ownership.

use log::info;

use crate::components::air_quality::AirQualitySensorComponent;
use crate::components::display::DisplayComponent;
use crate::components::led_status::LedStatusComponent;
use crate::components::network::NetworkComponent;
use crate::components::sunscreen::SunscreenComponent;
use crate::components::temperature::TemperatureSensorComponent;
use crate::device::Device;
use crate::diagnostics::PingMonitor;
use crate::ports::{
    ClimateSensorPort, DigitalOutput, DisplayPort, GasSensorPort, HttpPort, MqttPort, PingPort,
    WifiPort,
};

pub struct HudService<Lcd, Pin, Gas, Clim, Wifi, Http, Mqtt, Ping>
where
    Lcd: DisplayPort,
    Pin: DigitalOutput,
    Gas: GasSensorPort,
    Clim: ClimateSensorPort,
    Wifi: WifiPort,
    Http: HttpPort,
    Mqtt: MqttPort,
    Ping: PingPort,
{
    device: Device,
    display: DisplayComponent<Lcd>,
    led: LedStatusComponent<Pin>,
    sunscreen: SunscreenComponent<Pin>,
    temperature: TemperatureSensorComponent<Clim>,
    air_quality: AirQualitySensorComponent<Gas, Pin>,
    network: NetworkComponent<Wifi, Http, Mqtt>,
    pingmon: PingMonitor,
    pinger: Ping,
}

impl<Lcd, Pin, Gas, Clim, Wifi, Http, Mqtt, Ping>
    HudService<Lcd, Pin, Gas, Clim, Wifi, Http, Mqtt, Ping>
where
    Lcd: DisplayPort,
    Pin: DigitalOutput,
    Gas: GasSensorPort,
    Clim: ClimateSensorPort,
    Wifi: WifiPort,
    Http: HttpPort,
    Mqtt: MqttPort,
    Ping: PingPort,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        display: DisplayComponent<Lcd>,
        led: LedStatusComponent<Pin>,
        sunscreen: SunscreenComponent<Pin>,
        temperature: TemperatureSensorComponent<Clim>,
        air_quality: AirQualitySensorComponent<Gas, Pin>,
        network: NetworkComponent<Wifi, Http, Mqtt>,
        pinger: Ping,
    ) -> Self {
        Self {
            device: Device::new(),
            display,
            led,
            sunscreen,
            temperature,
            air_quality,
            network,
            pingmon: PingMonitor::new(),
            pinger,
        }
    }

    /// Register a ping target for the connectivity diagnostics.
    pub fn add_ping_target(&mut self, name: &'static str, host: &str) -> bool {
        self.pingmon.add_target(name, host)
    }

    /// One-time component initialisation, in tick order.
    pub fn setup(&mut self, now_ms: u32) {
        info!("HudService: setup");
        self.display.setup(&mut self.device);
        self.led.setup();
        self.sunscreen.setup(&mut self.device);
        self.temperature.setup(now_ms, &mut self.device);
        self.air_quality.setup(&mut self.device);
        self.network.setup(now_ms, &mut self.device);
    }

    /// One scheduler pass.  Every component gets exactly one non-blocking
    /// step, then the publish outbox drains toward the broker.
    pub fn tick(&mut self, now_ms: u32) {
        self.display.tick(&mut self.device);
        self.led.tick(now_ms, &self.device);
        self.sunscreen.tick(now_ms, &mut self.device);
        self.temperature.tick(now_ms, &mut self.device);
        self.air_quality.tick(now_ms, &mut self.device);
        self.network.tick(now_ms, &mut self.device);
        self.pingmon.tick(now_ms, &mut self.pinger);

        for publication in self.device.take_outbox() {
            self.network.push_remote(publication.topic, &publication.body);
        }
    }

    // ── Introspection (diagnostics, tests) ────────────────────

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn ping_stats(&self, i: usize) -> Option<crate::diagnostics::PingStats> {
        self.pingmon.stats(i)
    }
}
