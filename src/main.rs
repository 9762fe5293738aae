//! pe32hud — Main Entry Point
//!
//! Cooperative tick scheduling over per-resource components:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  RgbLcdAdapter  OutputLine  Ccs811Adapter  Dht11Adapter      │
//! │  WifiAdapter    HttpAdapter MqttAdapter    PingAdapter       │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  HudService: Device blackboard + component FSMs    │      │
//! │  │  display · led · sunscreen · temp · airq · network │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The single loop below ticks the service forever; components suspend by
//! returning early and resume on the next pass.

#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use pe32hud::adapters::climate::Dht11Adapter;
use pe32hud::adapters::display::RgbLcdAdapter;
use pe32hud::adapters::gas::Ccs811Adapter;
use pe32hud::adapters::gpio::OutputLine;
use pe32hud::adapters::http::HttpAdapter;
use pe32hud::adapters::mqtt::MqttAdapter;
use pe32hud::adapters::ping::PingAdapter;
use pe32hud::adapters::time::MonotonicClock;
use pe32hud::adapters::wifi::WifiAdapter;
use pe32hud::components::air_quality::AirQualitySensorComponent;
use pe32hud::components::display::DisplayComponent;
use pe32hud::components::led_status::LedStatusComponent;
use pe32hud::components::network::NetworkComponent;
use pe32hud::components::sunscreen::SunscreenComponent;
use pe32hud::components::temperature::TemperatureSensorComponent;
use pe32hud::config::SystemConfig;
use pe32hud::pins;
use pe32hud::service::HudService;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("pe32hud v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    // Endpoints and credentials; FSM timing lives in the components.
    let config = match std::env::var("PE32HUD_CONFIG") {
        Ok(json) => match SystemConfig::from_json(&json) {
            Ok(cfg) => {
                info!("Config loaded from PE32HUD_CONFIG");
                cfg
            }
            Err(e) => {
                warn!("Config parse failed ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        Err(_) => SystemConfig::default(),
    };

    // ── 3. Adapters ───────────────────────────────────────────
    let clock = MonotonicClock::new();

    let display = DisplayComponent::new(RgbLcdAdapter::new());
    let led = LedStatusComponent::new(
        OutputLine::active_low(pins::LED_RED_GPIO),
        OutputLine::active_low(pins::LED_BLUE_GPIO),
    );
    let sunscreen = SunscreenComponent::new(
        OutputLine::active_low(pins::SUNSCREEN_SEL_GPIO),
        OutputLine::active_low(pins::SUNSCREEN_DN_GPIO),
        OutputLine::active_low(pins::SUNSCREEN_UP_GPIO),
    );
    let temperature =
        TemperatureSensorComponent::new(Dht11Adapter::new(pins::CLIMATE_DATA_GPIO));
    let air_quality = AirQualitySensorComponent::new(
        Ccs811Adapter::new(),
        OutputLine::active_low(pins::AIRQ_RST_GPIO),
    );
    let network = NetworkComponent::new(
        WifiAdapter::new(),
        HttpAdapter::new(),
        MqttAdapter::new(),
        config.clone(),
    );

    // ── 4. Service ────────────────────────────────────────────
    let mut hud = HudService::new(
        display,
        led,
        sunscreen,
        temperature,
        air_quality,
        network,
        PingAdapter::new(),
    );
    hud.add_ping_target("gateway", "192.168.1.1");
    hud.add_ping_target("broker", &config.mqtt_broker);

    hud.setup(clock.now_ms());
    info!("System ready. Entering tick loop.");

    // ── 5. Tick loop ──────────────────────────────────────────
    loop {
        hud.tick(clock.now_ms());

        // On the host there is no timer interrupt to pace us.
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(
            config.tick_interval_ms as u64,
        ));
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(config.tick_interval_ms);
    }
}
