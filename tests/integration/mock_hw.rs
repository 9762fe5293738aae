//! Mock hardware and network adapters for integration tests.
//!
//! Every mock hands out shared handles, so a test keeps observing (and
//! scripting) the ports after the components have taken ownership.

#![allow(dead_code)] // not every scenario reads every recorded field

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pe32hud::error::CommsError;
use pe32hud::ports::{
    ClimateSensorPort, DigitalOutput, DisplayPort, GasSensorPort, HttpPort, MqttPort, PingPort,
    PingReply, WifiPort, WifiStatus,
};

// ── GPIO ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SharedPin(Rc<Cell<bool>>);

impl SharedPin {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

impl DigitalOutput for SharedPin {
    fn set(&mut self, active: bool) {
        self.0.set(active);
    }
}

// ── LCD ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct LcdShadow {
    pub color: u32,
    pub rows: [String; 2],
    pub renders: u32,
}

#[derive(Clone, Default)]
pub struct MockLcd {
    inner: Rc<RefCell<LcdShadow>>,
    cursor: Cell<(u8, u8)>,
}

impl MockLcd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shadow(&self) -> std::cell::Ref<'_, LcdShadow> {
        self.inner.borrow()
    }
}

impl DisplayPort for MockLcd {
    fn set_color(&mut self, rgb: u32) {
        self.inner.borrow_mut().color = rgb;
    }
    fn clear(&mut self) {
        let mut shadow = self.inner.borrow_mut();
        shadow.rows = [String::new(), String::new()];
        shadow.renders += 1;
    }
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor.set((col, row));
    }
    fn print(&mut self, text: &str) {
        let (_, row) = self.cursor.get();
        self.inner.borrow_mut().rows[row as usize].push_str(text);
    }
}

// ── Gas sensor ────────────────────────────────────────────────

pub struct GasScript {
    pub begin_ok: bool,
    pub ready: bool,
    pub error: bool,
    pub eco2: u16,
    pub tvoc: u16,
    pub baseline: Option<u16>,
}

impl Default for GasScript {
    fn default() -> Self {
        Self {
            begin_ok: true,
            ready: true,
            error: false,
            eco2: 412,
            tvoc: 9,
            baseline: None,
        }
    }
}

#[derive(Clone)]
pub struct MockGas(pub Rc<RefCell<GasScript>>);

impl MockGas {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(GasScript::default())))
    }
}

impl GasSensorPort for MockGas {
    fn begin(&mut self) -> bool {
        self.0.borrow().begin_ok
    }
    fn data_ready(&mut self) -> bool {
        self.0.borrow().ready
    }
    fn error_flag_set(&mut self) -> bool {
        self.0.borrow().error
    }
    fn read_eco2(&mut self) -> u16 {
        self.0.borrow().eco2
    }
    fn read_tvoc(&mut self) -> u16 {
        self.0.borrow().tvoc
    }
    fn read_baseline(&mut self) -> Option<u16> {
        self.0.borrow().baseline
    }
}

// ── Climate sensor ────────────────────────────────────────────

pub struct MockClimate {
    pub temperature: f32,
    pub humidity: f32,
}

impl MockClimate {
    pub fn new() -> Self {
        Self {
            temperature: 21.5,
            humidity: 40.0,
        }
    }
}

impl ClimateSensorPort for MockClimate {
    fn setup(&mut self) {}
    fn humidity(&mut self) -> f32 {
        self.humidity
    }
    fn temperature(&mut self) -> f32 {
        self.temperature
    }
    fn status(&self) -> &'static str {
        "OK"
    }
}

// ── WiFi ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockWifi {
    pub status: Rc<Cell<WifiStatus>>,
    pub begin_calls: Rc<Cell<u32>>,
}

impl MockWifi {
    pub fn new(initial: WifiStatus) -> Self {
        Self {
            status: Rc::new(Cell::new(initial)),
            begin_calls: Rc::new(Cell::new(0)),
        }
    }
}

impl WifiPort for MockWifi {
    fn begin(&mut self, _ssid: &str, _password: &str) {
        self.begin_calls.set(self.begin_calls.get() + 1);
    }
    fn disconnect(&mut self) {}
    fn status(&self) -> WifiStatus {
        self.status.get()
    }
    fn mac_address(&self) -> [u8; 6] {
        [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
    }
}

// ── HTTP ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockHttp {
    pub response: Rc<RefCell<Result<String, CommsError>>>,
    pub gets: Rc<Cell<u32>>,
}

impl MockHttp {
    pub fn with_doc(doc: &str) -> Self {
        Self {
            response: Rc::new(RefCell::new(Ok(doc.to_string()))),
            gets: Rc::new(Cell::new(0)),
        }
    }
}

impl HttpPort for MockHttp {
    fn get(&mut self, _url: &str) -> Result<String, CommsError> {
        self.gets.set(self.gets.get() + 1);
        self.response.borrow().clone()
    }
}

// ── MQTT ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct MqttShadow {
    pub connected: bool,
    pub accept_connect: bool,
    pub client_id: String,
    pub published: Vec<(String, String)>,
}

#[derive(Clone)]
pub struct MockMqtt(pub Rc<RefCell<MqttShadow>>);

impl MockMqtt {
    pub fn accepting() -> Self {
        Self(Rc::new(RefCell::new(MqttShadow {
            accept_connect: true,
            ..MqttShadow::default()
        })))
    }
}

impl MqttPort for MockMqtt {
    fn set_client_id(&mut self, id: &str) {
        self.0.borrow_mut().client_id = id.to_string();
    }
    fn connect(&mut self, _broker: &str, _port: u16) -> bool {
        let mut shadow = self.0.borrow_mut();
        if shadow.accept_connect {
            shadow.connected = true;
        }
        shadow.accept_connect
    }
    fn poll(&mut self) {}
    fn is_connected(&self) -> bool {
        self.0.borrow().connected
    }
    fn publish(&mut self, topic: &str, payload: &str) {
        self.0
            .borrow_mut()
            .published
            .push((topic.to_string(), payload.to_string()));
    }
}

// ── Ping ──────────────────────────────────────────────────────

pub struct MockPing {
    pub reply: Option<PingReply>,
    pub calls: u32,
}

impl MockPing {
    pub fn healthy() -> Self {
        Self {
            reply: Some(PingReply {
                response_time_ms: 18,
                ttl: 64,
            }),
            calls: 0,
        }
    }
}

impl PingPort for MockPing {
    fn ping(&mut self, _host: &str, _timeout_ms: u32) -> Option<PingReply> {
        self.calls += 1;
        self.reply
    }
}
