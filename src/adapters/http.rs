//! HTTP client adapter for the remote-directive fetch.
//!
//! One blocking-ish GET per call; the network component treats it as
//! instantaneous and bounds the payload it consumes.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::http::client::EspHttpConnection`.
//! - **all other targets**: the response is injected through a process-wide
//!   static, so host runs and tests can script the server.

use crate::error::CommsError;
use crate::ports::HttpPort;

#[cfg(not(target_os = "espidf"))]
use std::sync::Mutex;

/// Simulated server response: HTTP status plus body.  `None` simulates a
/// connection failure.
#[cfg(not(target_os = "espidf"))]
static SIM_RESPONSE: Mutex<Option<(u16, String)>> = Mutex::new(None);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_response(status: u16, body: &str) {
    *SIM_RESPONSE.lock().unwrap() = Some((status, body.to_string()));
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_clear_response() {
    *SIM_RESPONSE.lock().unwrap() = None;
}

pub struct HttpAdapter;

impl HttpAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HttpAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPort for HttpAdapter {
    #[cfg(target_os = "espidf")]
    fn get(&mut self, url: &str) -> Result<String, CommsError> {
        // Device build:
        //   let conn = EspHttpConnection::new(&Configuration::default())?;
        //   let mut client = embedded_svc::http::client::Client::wrap(conn);
        //   let response = client.get(url)?.submit()?;
        //   read up to 512 bytes of the body, map non-2xx to HttpStatus.
        let _ = url;
        Err(CommsError::HttpConnectFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn get(&mut self, url: &str) -> Result<String, CommsError> {
        let _ = url;
        match &*SIM_RESPONSE.lock().unwrap() {
            Some((status, body)) if (200..300).contains(status) => Ok(body.clone()),
            Some((status, _)) => Err(CommsError::HttpStatus(*status)),
            None => Err(CommsError::HttpConnectFailed),
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    // Shared process-wide static: run serially within one test to avoid
    // cross-test interference.
    #[test]
    fn scripted_responses() {
        let mut http = HttpAdapter::new();

        sim_clear_response();
        assert_eq!(
            http.get("http://hud.example.com/status.txt"),
            Err(CommsError::HttpConnectFailed)
        );

        sim_set_response(200, "line0:hi");
        assert_eq!(
            http.get("http://hud.example.com/status.txt"),
            Ok("line0:hi".to_string())
        );

        sim_set_response(404, "nope");
        assert_eq!(
            http.get("http://hud.example.com/status.txt"),
            Err(CommsError::HttpStatus(404))
        );
        sim_clear_response();
    }
}
