//! Coarse time source feeding the drift term.
//!
//! The derivation needs a non-decreasing tick so sequence numbers move
//! forward over real time; granularity and epoch are the time source's
//! choice as long as they stay consistent within a process. Hosted or
//! constrained environments without a usable clock can plug in
//! [`FixedTicks`] — the reference environment pinned the tick to zero —
//! at the cost of the drift guarantee (security then rests on PRF
//! unpredictability alone).

use std::time::Instant;

/// Supplier of the coarse tick consumed by the derivation.
///
/// Repeated calls within a short window should return the same or a
/// nearby tick, and the tick must not decrease over real time (modulo
/// 32-bit wraparound).
pub trait TickSource {
    /// The current tick.
    fn coarse_tick(&self) -> u32;
}

/// Nanosecond-scale ticks from the process monotonic clock.
///
/// Ticks count nanoseconds since the source was created, truncated to 32
/// bits; the divided-down drift term wraps alongside the sequence number
/// space, which TCP arithmetic already tolerates.
#[derive(Debug)]
pub struct MonotonicTicks {
    origin: Instant,
}

impl MonotonicTicks {
    /// Create a source ticking from now.
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for MonotonicTicks {
    fn coarse_tick(&self) -> u32 {
        self.origin.elapsed().as_nanos() as u32
    }
}

/// A constant tick.
///
/// Degenerate but valid: derivations stay unpredictable to an attacker
/// without the secret, they just stop drifting forward. Also the natural
/// source for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTicks {
    tick: u32,
}

impl FixedTicks {
    /// A source that always returns `tick`.
    #[must_use]
    pub const fn new(tick: u32) -> Self {
        Self { tick }
    }

    /// The documented always-zero fallback.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }
}

impl TickSource for FixedTicks {
    fn coarse_tick(&self) -> u32 {
        self.tick
    }
}
