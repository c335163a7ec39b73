/// Stereo effects engine — per-block orchestration.
///
/// One `FxEngine` is owned per audio session (a plugin instance, a bench
/// loop) and driven from the host's real-time callback. The hot path
/// never allocates, never blocks, and touches no shared state: the host
/// hands over a configuration snapshot at block entry and two channel
/// slices to process in place.
///
/// Fixed signal order per sample: depth surround, then widener.

use crate::config::EffectConfig;
use crate::depth::DepthEffect;
use crate::widener::StereoWidener;

pub struct FxEngine {
    config: EffectConfig,
    depth: DepthEffect,
    widener: StereoWidener,
}

impl FxEngine {
    /// Engine with everything disabled: an exact pass-through until the
    /// host supplies a configuration.
    pub fn new() -> Self {
        Self {
            config: EffectConfig::default(),
            depth: DepthEffect::new(),
            widener: StereoWidener::new(),
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Replace the active configuration with a new snapshot.
    ///
    /// Call between blocks, never mid-block. Derived coefficients (the
    /// depth mapping contains a `powf`) are rederived only for the
    /// sections that actually changed.
    pub fn apply_config(&mut self, config: EffectConfig) {
        if config == self.config {
            return;
        }
        if config.depth != self.config.depth {
            self.depth.set_strength(config.depth.strength);
        }
        if config.widener != self.config.widener {
            self.widener.set_width(config.widener.enabled, config.widener.width);
        }
        self.config = config;
    }

    /// Process one block in place. Slices must be the same length.
    ///
    /// A disabled depth section bypasses the delay network without
    /// touching its buffers or feedback state, so re-enabling resumes
    /// from the live state instead of clicking in from silence.
    pub fn process_block(&mut self, left: &mut [f64], right: &mut [f64]) {
        assert_eq!(left.len(), right.len(), "channel slices must match");
        let depth_on = self.config.depth.enabled;
        let widener_on = self.config.widener.enabled;

        for i in 0..left.len() {
            let mut l = left[i];
            let mut r = right[i];
            if depth_on {
                (l, r) = self.depth.process(l, r);
            }
            if widener_on {
                (l, r) = self.widener.process(l, r);
            }
            left[i] = l;
            right[i] = r;
        }
    }

    /// Back to construction state: delay lines and feedback cleared,
    /// configuration kept.
    pub fn reset(&mut self) {
        self.depth.reset();
    }
}

impl Default for FxEngine {
    fn default() -> Self {
        Self::new()
    }
}
