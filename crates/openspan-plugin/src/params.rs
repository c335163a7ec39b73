use nih_plug::prelude::*;
use openspan_dsp::mapping;

#[derive(Params)]
pub struct OpenSpanParams {
    /// Widener on/off.
    #[id = "wide_on"]
    pub widener_enabled: BoolParam,

    /// Stereo width: 1.0 = unity image, 0 = mono, above 1 = wider.
    #[id = "width"]
    pub width: FloatParam,

    /// Depth surround on/off.
    #[id = "depth_on"]
    pub depth_enabled: BoolParam,

    /// Depth strength: sweeps the feedback gain over a 10 dB range and
    /// flips the long-tap polarity in the upper half.
    #[id = "strength"]
    pub strength: FloatParam,
}

impl Default for OpenSpanParams {
    fn default() -> Self {
        Self {
            widener_enabled: BoolParam::new("Widener", true),

            width: FloatParam::new(
                "Width",
                2.0,
                FloatRange::Linear {
                    min: 0.0,
                    max: mapping::WIDTH_MAX,
                },
            )
            .with_smoother(SmoothingStyle::Linear(50.0))
            .with_step_size(0.1)
            .with_unit(" x"),

            depth_enabled: BoolParam::new("Depth", true),

            strength: FloatParam::new(
                "Depth Strength",
                800.0,
                FloatRange::Linear {
                    min: 0.0,
                    max: mapping::STRENGTH_MAX,
                },
            )
            .with_smoother(SmoothingStyle::Linear(50.0))
            .with_step_size(1.0),
        }
    }
}
