//! Effect configuration snapshots.
//!
//! A configuration is always replaced wholesale: the control side builds
//! a complete `EffectConfig` and hands it over, and the engine applies it
//! at block entry. No partial-field update is ever observable mid-block.
//! `Default` is everything disabled — a fresh engine is an exact
//! pass-through until the host says otherwise.

/// Stereo widener section.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WidenerConfig {
    pub enabled: bool,
    /// Stereo width: 1.0 = unity image, 0.0 = mono, above 1.0 = wider.
    pub width: f32,
}

/// Depth surround section.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DepthConfig {
    pub enabled: bool,
    /// Effect strength, nominally 0..=1000 (see `mapping`).
    pub strength: f32,
}

/// Complete user-intent snapshot, replaced atomically on every update.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EffectConfig {
    pub widener: WidenerConfig,
    pub depth: DepthConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_disabled() {
        let cfg = EffectConfig::default();
        assert!(!cfg.widener.enabled);
        assert!(!cfg.depth.enabled);
        assert_eq!(cfg.widener.width, 0.0);
        assert_eq!(cfg.depth.strength, 0.0);
    }
}
