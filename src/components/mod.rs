//! Per-resource components of the HUD.
//!
//! Each component owns exactly one hardware resource and its own FSM state,
//! exposes `setup(...)` plus a non-blocking `tick(now_ms, &mut Device, ...)`,
//! and coordinates with the rest of the system only through the
//! [`Device`](crate::device::Device) blackboard.  The scheduler in
//! [`service`](crate::service) ticks them in a fixed order, forever.
//!
//! All elapsed-time guards use `u32` millisecond timestamps compared with
//! `wrapping_sub`, so the arithmetic stays correct across counter wrap.

pub mod air_quality;
pub mod display;
pub mod led_status;
pub mod network;
pub mod sunscreen;
pub mod temperature;
