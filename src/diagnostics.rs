//! Connectivity diagnostics: a round-robin ICMP ping monitor.
//!
//! Keeps a short rolling history per target (gateway, broker, internet
//! reference, ...) and derives loss / response-time / TTL stats from it.
//! A target is pinged at most once a second and, once its history window
//! has filled, rests ten minutes before the next round.  Each tick pings at
//! most one due target so the control loop's time budget holds.

use log::{debug, info, warn};

use crate::ports::{PingPort, PingReply};

/// Samples kept per target.
const HISTORY: usize = 4;
/// Monitored targets, stack-allocated.
const MAX_TARGETS: usize = 6;
/// Minimum spacing between two pings of the same target.
const MIN_SPACING_MS: u32 = 1_000;
/// Rest after a full history window.
const WINDOW_REST_MS: u32 = 600_000;
/// Echo timeout handed to the transport.
const PING_TIMEOUT_MS: u32 = 1_000;

/// Derived statistics over one target's history window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingStats {
    pub loss_pct: f32,
    pub response_time_ms: u16,
    pub ttl: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Sample {
    #[default]
    Unset,
    Timeout,
    Reply {
        response_time_ms: u16,
        ttl: u8,
    },
}

struct Target {
    name: &'static str,
    host: heapless::String<64>,
    history: [Sample; HISTORY],
    hist_ptr: usize,
    last_attempt_ms: u32,
    total_attempts: u32,
    ever_pinged: bool,
}

impl Target {
    fn new(name: &'static str, host: &str) -> Self {
        let mut h = heapless::String::new();
        for ch in host.chars() {
            if h.push(ch).is_err() {
                break;
            }
        }
        Self {
            name,
            host: h,
            history: [Sample::Unset; HISTORY],
            hist_ptr: 0,
            last_attempt_ms: 0,
            total_attempts: 0,
            ever_pinged: false,
        }
    }

    fn due(&self, now_ms: u32) -> bool {
        if !self.ever_pinged {
            return true;
        }
        let elapsed = now_ms.wrapping_sub(self.last_attempt_ms);
        if elapsed < MIN_SPACING_MS {
            return false;
        }
        // A completed window earns the target a long rest.
        if self.total_attempts % HISTORY as u32 == (HISTORY as u32 - 1)
            && elapsed < WINDOW_REST_MS
        {
            return false;
        }
        true
    }

    fn record(&mut self, now_ms: u32, reply: Option<PingReply>) {
        self.history[self.hist_ptr] = match reply {
            Some(r) => Sample::Reply {
                response_time_ms: r.response_time_ms,
                ttl: r.ttl,
            },
            None => Sample::Timeout,
        };
        self.hist_ptr = (self.hist_ptr + 1) % HISTORY;
        self.last_attempt_ms = now_ms;
        self.total_attempts = self.total_attempts.wrapping_add(1);
        self.ever_pinged = true;
    }

    fn stats(&self) -> PingStats {
        let mut sent: u32 = 0;
        let mut lost: u32 = 0;
        let mut sum_ms: u32 = 0;
        let mut sum_ttl: u32 = 0;
        for sample in &self.history {
            match *sample {
                Sample::Reply {
                    response_time_ms,
                    ttl,
                } => {
                    sent += 1;
                    sum_ms += u32::from(response_time_ms);
                    sum_ttl += u32::from(ttl);
                }
                Sample::Timeout => {
                    sent += 1;
                    lost += 1;
                }
                Sample::Unset => {}
            }
        }

        let mut stats = PingStats {
            loss_pct: 100.0,
            response_time_ms: 0,
            ttl: 0,
        };
        if sent > lost {
            stats.loss_pct = lost as f32 * 100.0 / sent as f32;
            stats.response_time_ms = (sum_ms / (sent - lost)) as u16;
            stats.ttl = (sum_ttl / (sent - lost)) as u8;
        }
        if lost == sent {
            stats.response_time_ms = 999; // all is gone
        }
        stats
    }
}

/// The monitor itself: a handful of targets serviced round-robin, one ping
/// per tick at most.
pub struct PingMonitor {
    targets: heapless::Vec<Target, MAX_TARGETS>,
    cursor: usize,
}

impl PingMonitor {
    pub fn new() -> Self {
        Self {
            targets: heapless::Vec::new(),
            cursor: 0,
        }
    }

    /// Register a target.  Returns `false` when all slots are taken.
    pub fn add_target(&mut self, name: &'static str, host: &str) -> bool {
        self.targets.push(Target::new(name, host)).is_ok()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Stats for target `i`, in registration order.
    pub fn stats(&self, i: usize) -> Option<PingStats> {
        self.targets.get(i).map(Target::stats)
    }

    /// Ping the next due target, if any.
    pub fn tick<P: PingPort>(&mut self, now_ms: u32, pinger: &mut P) {
        let n = self.targets.len();
        if n == 0 {
            return;
        }
        for i in 0..n {
            let idx = (self.cursor + i) % n;
            if !self.targets[idx].due(now_ms) {
                continue;
            }
            let reply = pinger.ping(&self.targets[idx].host, PING_TIMEOUT_MS);
            let target = &mut self.targets[idx];
            match reply {
                Some(r) => debug!(
                    "PingMonitor: {} ({}) {}ms ttl={}",
                    target.name, target.host, r.response_time_ms, r.ttl
                ),
                None => warn!("PingMonitor: {} ({}) timeout", target.name, target.host),
            }
            target.record(now_ms, reply);
            if target.total_attempts % HISTORY as u32 == 0 {
                let s = target.stats();
                info!(
                    "PingMonitor: {} window: {:.0}% loss, {}ms avg, ttl {}",
                    target.name, s.loss_pct, s.response_time_ms, s.ttl
                );
            }
            self.cursor = (idx + 1) % n;
            return;
        }
    }
}

impl Default for PingMonitor {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
