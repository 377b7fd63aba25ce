//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized timing settings for the supervisor.
//!
//! The delays are fixed design constants of the reload protocol, not
//! operator-facing knobs: the CLI never exposes them. They live in one
//! struct so the loop, the terminator, and the tests agree on the values.

use std::time::Duration;

/// Timing configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `grace`: wait between the graceful (SIGTERM) and forceful (SIGKILL)
///   signal to the child's process group. Bounds total termination latency.
/// - `settle`: wait after a termination returns and before the next spawn,
///   so OS resources (ports, file descriptors) are released.
/// - `key_poll`: how often the key reader wakes up to check for pending
///   input and for cancellation. Purely a responsiveness bound; no key is
///   ever dropped by a longer interval.
/// - `channel_capacity`: bound of the event channel between producers and
///   the loop. Producers await free slots; events are never dropped.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Delay between the graceful and the forceful termination signal.
    pub grace: Duration,
    /// Delay after termination before relaunching the child.
    pub settle: Duration,
    /// Poll interval of the raw-mode key reader.
    pub key_poll: Duration,
    /// Capacity of the event channel feeding the supervisor loop.
    pub channel_capacity: usize,
}

impl Config {
    /// Returns the channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn channel_capacity_clamped(&self) -> usize {
        self.channel_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 200ms` (well-behaved children flush state, latency stays bounded)
    /// - `settle = 500ms` (ports and descriptors release before respawn)
    /// - `key_poll = 100ms`
    /// - `channel_capacity = 16`
    fn default() -> Self {
        Self {
            grace: Duration::from_millis(200),
            settle: Duration::from_millis(500),
            key_poll: Duration::from_millis(100),
            channel_capacity: 16,
        }
    }
}
