//! Integration test binary.
//!
//! Drives the full [`HudService`](pe32hud::service::HudService) — every
//! component plus the Device blackboard — against the recording mocks in
//! [`mock_hw`].

mod hud_service_tests;
mod mock_hw;
