//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements        | Connects to                     |
//! |-------------|-------------------|---------------------------------|
//! | `gpio`      | DigitalOutput     | ESP GPIO matrix                 |
//! | `gas`       | GasSensorPort     | CCS811 eCO2/TVOC chip (I²C)     |
//! | `climate`   | ClimateSensorPort | DHT11 humidity/temperature      |
//! | `display`   | DisplayPort       | Grove RGB-backlight 16x2 LCD    |
//! | `wifi`      | WifiPort          | WiFi station stack              |
//! | `http`      | HttpPort          | HTTP client                     |
//! | `mqtt`      | MqttPort          | MQTT client                     |
//! | `ping`      | PingPort          | ICMP echo                       |
//! | `time`      | —                 | monotonic millisecond counter   |
//! | `device_id` | —                 | MAC-derived device GUID         |
//!
//! Every adapter is dual-target: real peripherals behind
//! `#[cfg(target_os = "espidf")]`, deterministic in-memory simulation on
//! the host so the whole firmware runs and tests off-device.

pub mod climate;
pub mod device_id;
pub mod display;
pub mod gas;
pub mod gpio;
pub mod http;
pub mod mqtt;
pub mod ping;
pub mod time;
pub mod wifi;
