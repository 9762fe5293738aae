//! Whole-system scenarios: boot, connect, directive handling, telemetry,
//! actuator presses and alert-driven LED modes, all through `HudService`.

use pe32hud::components::air_quality::AirQualitySensorComponent;
use pe32hud::components::display::DisplayComponent;
use pe32hud::components::led_status::LedStatusComponent;
use pe32hud::components::network::NetworkComponent;
use pe32hud::components::sunscreen::SunscreenComponent;
use pe32hud::components::temperature::TemperatureSensorComponent;
use pe32hud::config::SystemConfig;
use pe32hud::device::{Alert, BlinkMode};
use pe32hud::error::CommsError;
use pe32hud::ports::WifiStatus;
use pe32hud::service::HudService;

use crate::mock_hw::{
    MockClimate, MockGas, MockHttp, MockLcd, MockMqtt, MockPing, MockWifi, SharedPin,
};

type TestHud = HudService<
    MockLcd,
    SharedPin,
    MockGas,
    MockClimate,
    MockWifi,
    MockHttp,
    MockMqtt,
    MockPing,
>;

struct Rig {
    hud: TestHud,
    lcd: MockLcd,
    sel: SharedPin,
    dn: SharedPin,
    up: SharedPin,
    gas: MockGas,
    wifi: MockWifi,
    http: MockHttp,
    mqtt: MockMqtt,
}

fn rig(doc: &str, wifi_status: WifiStatus) -> Rig {
    let lcd = MockLcd::new();
    let (red, blue) = (SharedPin::new(), SharedPin::new());
    let (sel, dn, up) = (SharedPin::new(), SharedPin::new(), SharedPin::new());
    let airq_rst = SharedPin::new();
    let gas = MockGas::new();
    let wifi = MockWifi::new(wifi_status);
    let http = MockHttp::with_doc(doc);
    let mqtt = MockMqtt::accepting();

    let mut hud = HudService::new(
        DisplayComponent::new(lcd.clone()),
        LedStatusComponent::new(red, blue),
        SunscreenComponent::new(sel.clone(), dn.clone(), up.clone()),
        TemperatureSensorComponent::new(MockClimate::new()),
        AirQualitySensorComponent::new(gas.clone(), airq_rst),
        NetworkComponent::new(wifi.clone(), http.clone(), mqtt.clone(), SystemConfig::default()),
        MockPing::healthy(),
    );
    hud.setup(0);

    Rig {
        hud,
        lcd,
        sel,
        dn,
        up,
        gas,
        wifi,
        http,
        mqtt,
    }
}

#[test]
fn boot_screen_shows_then_directive_takes_over() {
    let mut rig = rig(
        "color:#00ff00\nline0:Power: 1.21 GW\nline1:Gas: 0.3 m3",
        WifiStatus::Connected,
    );

    rig.hud.tick(0);
    {
        let shadow = rig.lcd.shadow();
        assert_eq!(shadow.rows[0], "Initializing...");
    }

    // The directive fetched during tick 0 renders on the next pass.
    rig.hud.tick(1);
    let shadow = rig.lcd.shadow();
    assert_eq!(shadow.rows[0], "Power: 1.21 GW");
    assert_eq!(shadow.rows[1], "Gas: 0.3 m3");
    assert_eq!(shadow.color, 0x00ff00);
}

#[test]
fn mqtt_session_uses_the_guid_client_id() {
    let rig = rig("", WifiStatus::Connected);
    assert_eq!(rig.mqtt.0.borrow().client_id, "EUI48:de:ad:be:ef:ca:fe");
}

#[test]
fn telemetry_flows_to_the_broker_with_device_id() {
    let mut rig = rig("", WifiStatus::Connected);

    // Tick 0: temperature samples immediately; the outbox drains into MQTT
    // in the same cycle.
    rig.hud.tick(0);
    {
        let mqtt = rig.mqtt.0.borrow();
        assert!(mqtt.connected);
        assert_eq!(mqtt.published.len(), 1);
        assert_eq!(mqtt.published[0].0, "pe32/hud/temp/xwwwform");
        assert_eq!(
            mqtt.published[0].1,
            "device_id=EUI48:de:ad:be:ef:ca:fe&status=OK&temperature=21.50&humidity=40.00"
        );
    }

    // Air quality comes up after its reset/wake cycle and samples.
    rig.hud.tick(1);
    rig.hud.tick(21);
    let mqtt = rig.mqtt.0.borrow();
    assert_eq!(mqtt.published.len(), 2);
    assert_eq!(mqtt.published[1].0, "pe32/hud/co2/xwwwform");
    assert_eq!(
        mqtt.published[1].1,
        "device_id=EUI48:de:ad:be:ef:ca:fe&eco2=412&tvoc=9"
    );
}

#[test]
fn telemetry_is_dropped_while_the_session_is_down() {
    let mut rig = rig("", WifiStatus::Idle);

    rig.hud.tick(0); // temperature publishes into the outbox
    rig.hud.tick(1);

    assert!(!rig.mqtt.0.borrow().connected);
    assert!(
        rig.mqtt.0.borrow().published.is_empty(),
        "push_remote with the session down must drop silently"
    );
}

#[test]
fn remote_action_presses_exactly_one_relay_then_releases() {
    let mut rig = rig("action:DOWN", WifiStatus::Connected);

    rig.hud.tick(0); // directive fetched, request queued on the blackboard
    rig.hud.tick(1); // sunscreen consumes the request
    assert!(rig.dn.is_active());
    assert!(!rig.sel.is_active());
    assert!(!rig.up.is_active());
    assert!(rig.hud.device().has_alert(Alert::SunscreenActive));
    assert_eq!(rig.hud.device().blink_mode(), BlinkMode::Sunscreen);

    rig.hud.tick(300);
    assert!(rig.dn.is_active(), "held through the debounce interval");

    rig.hud.tick(601); // 600ms after the press at t=1
    assert!(!rig.dn.is_active());
    assert!(!rig.hud.device().has_alert(Alert::SunscreenActive));
}

#[test]
fn repeated_directive_does_not_retrigger_the_press() {
    let mut rig = rig("action:DOWN", WifiStatus::Connected);

    rig.hud.tick(0);
    rig.hud.tick(1);
    assert!(rig.dn.is_active());
    rig.hud.tick(700); // released

    // Next fetch window returns the same directive; the dedup in Device
    // swallows it.
    rig.hud.tick(5_001);
    assert_eq!(rig.http.gets.get(), 2, "second fetch happened");
    rig.hud.tick(5_002);
    rig.hud.tick(5_003);
    assert!(!rig.dn.is_active(), "no second press for the same action");
}

#[test]
fn wifi_down_alert_selects_the_wifi_blink_mode() {
    let mut rig = rig("", WifiStatus::Idle);
    rig.hud.tick(0);
    assert!(rig.hud.device().has_alert(Alert::WifiDown));
    assert_eq!(rig.hud.device().blink_mode(), BlinkMode::WifiDown);
    assert!(rig.wifi.begin_calls.get() >= 1);

    // Once everything is up the heartbeat resumes.
    rig.wifi.status.set(WifiStatus::Connected);
    rig.hud.tick(1);
    rig.hud.tick(2);
    rig.hud.tick(22); // air sensor finishes its wake cycle
    assert_eq!(rig.hud.device().blink_mode(), BlinkMode::Normal);
}

#[test]
fn air_sensor_failure_keeps_its_alert_and_blink() {
    let rig_doc = "";
    let mut rig = rig(rig_doc, WifiStatus::Connected);
    rig.gas.0.borrow_mut().begin_ok = false;

    rig.hud.tick(0);
    rig.hud.tick(1);
    rig.hud.tick(21); // handshake fails
    assert!(rig.hud.device().has_alert(Alert::AirSensorDown));
    assert_eq!(rig.hud.device().blink_mode(), BlinkMode::AirSensorDown);
}

#[test]
fn http_failure_is_shown_but_nothing_aborts() {
    let mut rig = rig("", WifiStatus::Connected);
    *rig.http.response.borrow_mut() = Err(CommsError::HttpStatus(503));

    rig.hud.tick(0);
    rig.hud.tick(1);
    let shadow = rig.lcd.shadow();
    assert_eq!(shadow.rows[0], "HTTP/503");
    assert_eq!(shadow.rows[1], "(error)");

    // Telemetry still flows.
    assert_eq!(rig.mqtt.0.borrow().published.len(), 1);
}

#[test]
fn ping_targets_collect_stats() {
    let lcd = MockLcd::new();
    let mut hud = HudService::new(
        DisplayComponent::new(lcd),
        LedStatusComponent::new(SharedPin::new(), SharedPin::new()),
        SunscreenComponent::new(SharedPin::new(), SharedPin::new(), SharedPin::new()),
        TemperatureSensorComponent::new(MockClimate::new()),
        AirQualitySensorComponent::new(MockGas::new(), SharedPin::new()),
        NetworkComponent::new(
            MockWifi::new(WifiStatus::Idle),
            MockHttp::with_doc(""),
            MockMqtt::accepting(),
            SystemConfig::default(),
        ),
        MockPing::healthy(),
    );
    assert!(hud.add_ping_target("gateway", "192.168.1.1"));
    hud.setup(0);

    hud.tick(0);
    hud.tick(1_000);
    let stats = hud.ping_stats(0).unwrap();
    assert_eq!(stats.loss_pct, 0.0);
    assert_eq!(stats.response_time_ms, 18);
    assert_eq!(stats.ttl, 64);
}
