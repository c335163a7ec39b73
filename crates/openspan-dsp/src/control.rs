//! Configuration transport — control context to audio callback.
//!
//! A bounded channel of complete [`EffectConfig`] snapshots. The control
//! side (UI thread, automation) publishes full replacements; the audio
//! side drains the queue to the newest snapshot once per block, so a
//! block always runs against either the fully-old or the fully-new
//! configuration, never a mix.
//!
//! The channel is array-backed: after construction neither side
//! allocates, and neither side ever blocks.

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::config::EffectConfig;

/// Queue depth. Updates are tiny and the audio side drains every block
/// (a few milliseconds), so this only needs to absorb control-side
/// bursts.
pub const CONTROL_QUEUE_CAPACITY: usize = 32;

/// Create a connected control-side / audio-side pair.
pub fn control_link() -> (ControlHandle, ControlPort) {
    let (tx, rx) = bounded(CONTROL_QUEUE_CAPACITY);
    (ControlHandle { tx }, ControlPort { rx })
}

/// Control-side publisher. Cheap to clone into UI callbacks.
#[derive(Clone)]
pub struct ControlHandle {
    tx: Sender<EffectConfig>,
}

impl ControlHandle {
    /// Publish a complete snapshot without blocking.
    ///
    /// Returns false if the queue is full (the audio side has stopped
    /// draining) and the update was dropped.
    pub fn send(&self, config: EffectConfig) -> bool {
        self.tx.try_send(config).is_ok()
    }
}

/// Audio-side receiver, drained once per block.
pub struct ControlPort {
    rx: Receiver<EffectConfig>,
}

impl ControlPort {
    /// Drain every pending snapshot and return the newest, or None when
    /// nothing arrived since the last call. Non-blocking.
    pub fn latest(&self) -> Option<EffectConfig> {
        let mut latest = None;
        while let Ok(config) = self.rx.try_recv() {
            latest = Some(config);
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DepthConfig, WidenerConfig};

    fn cfg(width: f32) -> EffectConfig {
        EffectConfig {
            widener: WidenerConfig {
                enabled: true,
                width,
            },
            depth: DepthConfig::default(),
        }
    }

    #[test]
    fn test_empty_port_returns_none() {
        let (_handle, port) = control_link();
        assert_eq!(port.latest(), None);
    }

    #[test]
    fn test_latest_wins() {
        let (handle, port) = control_link();
        for w in [0.5, 1.0, 2.0] {
            assert!(handle.send(cfg(w)));
        }
        assert_eq!(port.latest(), Some(cfg(2.0)));
        // Drained: nothing stale left behind.
        assert_eq!(port.latest(), None);
    }

    #[test]
    fn test_full_queue_drops_and_reports() {
        let (handle, port) = control_link();
        for i in 0..CONTROL_QUEUE_CAPACITY {
            assert!(handle.send(cfg(i as f32)));
        }
        assert!(!handle.send(cfg(99.0)));
        // The drained value is the newest that fit.
        assert_eq!(
            port.latest(),
            Some(cfg((CONTROL_QUEUE_CAPACITY - 1) as f32))
        );
    }
}
