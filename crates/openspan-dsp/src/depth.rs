/// Depth pseudo-surround effect — cross-feedback delay network.
///
/// Each channel feeds a delay line tapped at a fixed distance (short tap
/// on the left line, long tap on the right), and each channel's gained
/// delayed sample is fed back into the OTHER channel's line input before
/// storage. The gained taps are then summed onto the dry signal. The
/// unequal taps decorrelate the channels; the cross-routing smears the
/// echoes across the image, which reads as depth rather than as a
/// discrete slapback.
///
/// Signal flow per sample (fb_l/fb_r persist across blocks):
///
///   line_l <- L + fb_r          fb_l = gain * line_l[tap 20]
///   line_r <- R + fb_l          fb_r = ±gain * line_r[tap 140]
///   out    = (L + fb_l, R + fb_r)

use crate::delay_line::DelayLine;
use crate::mapping;

/// Short tap distance in samples (left line).
pub const SHORT_TAP: usize = 20;
/// Long tap distance in samples (right line).
pub const LONG_TAP: usize = 140;
/// Delay line capacity: power of two (bitmask wrap) with headroom above
/// the longest tap.
pub const DELAY_CAPACITY: usize = 512;

pub struct DepthEffect {
    line_l: DelayLine,
    line_r: DelayLine,
    fb_l: f64,
    fb_r: f64,
    gain: f64,
    invert: bool,
}

impl DepthEffect {
    pub fn new() -> Self {
        let (gain, invert) = mapping::depth_params(0.0);
        Self {
            line_l: DelayLine::new(DELAY_CAPACITY),
            line_r: DelayLine::new(DELAY_CAPACITY),
            fb_l: 0.0,
            fb_r: 0.0,
            gain,
            invert,
        }
    }

    /// Rederive feedback gain and long-tap polarity from the strength
    /// control. Called on configuration change, not per sample.
    pub fn set_strength(&mut self, strength: f32) {
        let (gain, invert) = mapping::depth_params(strength);
        self.gain = gain;
        self.invert = invert;
    }

    /// Current feedback gain (magnitude capped at 1.0).
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Whether the long tap is polarity-inverted at the current strength.
    pub fn inverts_long_tap(&self) -> bool {
        self.invert
    }

    /// Process one stereo sample.
    ///
    /// Taps are read before this step's writes, so both reads observe the
    /// pre-advance cursor; each line's write then advances its cursor
    /// exactly once, keeping the two in lockstep.
    #[inline]
    pub fn process(&mut self, l: f64, r: f64) -> (f64, f64) {
        let delayed_l = self.line_l.read_at(SHORT_TAP);
        let delayed_r = self.line_r.read_at(LONG_TAP);

        self.line_l.write(l + self.fb_r);
        self.line_r.write(r + self.fb_l);

        let long_gain = if self.invert { -self.gain } else { self.gain };
        self.fb_l = self.gain * delayed_l;
        self.fb_r = long_gain * delayed_r;

        (l + self.fb_l, r + self.fb_r)
    }

    /// Clear delay contents and feedback state. Only for session start or
    /// a host-driven reset — a bypassed effect keeps its state so that
    /// re-enabling resumes without a discontinuity.
    pub fn reset(&mut self) {
        self.line_l.reset();
        self.line_r.reset();
        self.fb_l = 0.0;
        self.fb_r = 0.0;
    }
}

impl Default for DepthEffect {
    fn default() -> Self {
        Self::new()
    }
}
