// OpenSpan — depth surround + stereo widener effect plugin (CLAP + VST3).

use nih_plug::prelude::*;
use openspan_dsp::config::{DepthConfig, EffectConfig, WidenerConfig};
use openspan_dsp::engine::FxEngine;
use std::num::NonZeroU32;
use std::sync::Arc;

mod params;
use params::OpenSpanParams;

const MAX_BLOCK_SIZE: usize = 8192;

struct OpenSpan {
    params: Arc<OpenSpanParams>,

    // One engine per plugin instance; it owns all audio-session state
    // (delay lines, feedback scalars, derived coefficients).
    engine: FxEngine,

    // Pre-allocated scratch: the DSP crate runs double precision, hosts
    // hand us f32.
    scratch_l: Vec<f64>,
    scratch_r: Vec<f64>,
}

impl Default for OpenSpan {
    fn default() -> Self {
        Self {
            params: Arc::new(OpenSpanParams::default()),
            engine: FxEngine::new(),
            scratch_l: vec![0.0; MAX_BLOCK_SIZE],
            scratch_r: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl Plugin for OpenSpan {
    const NAME: &'static str = "OpenSpan";
    const VENDOR: &'static str = "OpenSpan";
    const URL: &'static str = "";
    const EMAIL: &'static str = "";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[AudioIOLayout {
        main_input_channels: NonZeroU32::new(2),
        main_output_channels: NonZeroU32::new(2),
        aux_input_ports: &[],
        aux_output_ports: &[],
        names: PortNames::const_default(),
    }];

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn initialize(
        &mut self,
        _audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let max_samples = buffer_config.max_buffer_size as usize;
        if self.scratch_l.len() < max_samples {
            self.scratch_l.resize(max_samples, 0.0);
            self.scratch_r.resize(max_samples, 0.0);
        }
        true
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        let num_samples = buffer.samples();

        // One complete configuration snapshot at block entry; the engine
        // sees either the old or the new settings for the whole block.
        // These are slow controls, so per-buffer smoothing is fine.
        let config = EffectConfig {
            widener: WidenerConfig {
                enabled: self.params.widener_enabled.value(),
                width: self.params.width.smoothed.next(),
            },
            depth: DepthConfig {
                enabled: self.params.depth_enabled.value(),
                strength: self.params.strength.smoothed.next(),
            },
        };
        self.engine.apply_config(config);

        let channels = buffer.as_slice();
        for i in 0..num_samples {
            self.scratch_l[i] = channels[0][i] as f64;
            self.scratch_r[i] = channels[1][i] as f64;
        }

        self.engine.process_block(
            &mut self.scratch_l[..num_samples],
            &mut self.scratch_r[..num_samples],
        );

        for i in 0..num_samples {
            channels[0][i] = self.scratch_l[i] as f32;
            channels[1][i] = self.scratch_r[i] as f32;
        }

        ProcessStatus::Normal
    }
}

impl ClapPlugin for OpenSpan {
    const CLAP_ID: &'static str = "com.openspan.stereo-image-fx";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Depth surround and stereo widener for live stereo streams");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Custom("stereo-widener"),
    ];
}

impl Vst3Plugin for OpenSpan {
    const VST3_CLASS_ID: [u8; 16] = *b"OpenSpanImageFX0";
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Spatial];
}

nih_export_clap!(OpenSpan);
nih_export_vst3!(OpenSpan);
