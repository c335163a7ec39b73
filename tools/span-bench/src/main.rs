/// Span Bench — stereo image DSP validation CLI.
///
/// Measures engine characteristics against the design targets.
///
/// Usage:
///   span-bench taps [--strength S]
///   span-bench width-sweep [--points N] [--csv FILE]
///   span-bench stability [--strength S] [--blocks N] [--freq F]
///   span-bench render --input FILE --output FILE [--width W] [--strength S]
///                     [--no-widener] [--no-depth]

use std::f64::consts::PI;

use openspan_dsp::config::{DepthConfig, EffectConfig, WidenerConfig};
use openspan_dsp::depth::{LONG_TAP, SHORT_TAP};
use openspan_dsp::engine::FxEngine;
use openspan_dsp::mapping;

const SAMPLE_RATE: f64 = 44100.0;
/// Same block size the engine sees from a typical live host.
const BLOCK_SIZE: usize = 4096;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "taps" => cmd_taps(&args[2..]),
        "width-sweep" => cmd_width_sweep(&args[2..]),
        "stability" => cmd_stability(&args[2..]),
        "render" => cmd_render(&args[2..]),
        _ => {
            eprintln!("Unknown subcommand: {}", args[1]);
            print_usage();
        }
    }
}

fn print_usage() {
    eprintln!("Span Bench — stereo image DSP validation");
    eprintln!();
    eprintln!("Subcommands:");
    eprintln!("  taps            Impulse response: tap arrival times and amplitudes");
    eprintln!("  width-sweep     Mid/side gain vs width control");
    eprintln!("  stability       Feedback boundedness over a long sustained input");
    eprintln!("  render          Stereo WAV -> engine -> stereo WAV");
}

fn parse_flag(args: &[String], flag: &str, default: f64) -> f64 {
    for i in 0..args.len().saturating_sub(1) {
        if args[i] == flag {
            return args[i + 1].parse().unwrap_or(default);
        }
    }
    default
}

fn parse_flag_str<'a>(args: &'a [String], flag: &str, default: &'a str) -> &'a str {
    for i in 0..args.len().saturating_sub(1) {
        if args[i] == flag {
            return &args[i + 1];
        }
    }
    default
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn depth_only(strength: f32) -> EffectConfig {
    EffectConfig {
        widener: WidenerConfig::default(),
        depth: DepthConfig {
            enabled: true,
            strength,
        },
    }
}

// ─── Tap timing ─────────────────────────────────────────────────────────────

/// Run a single-channel impulse through a fresh engine and return the
/// first nonzero sample (index, amplitude) on that channel.
fn first_arrival(strength: f32, right_channel: bool) -> Option<(usize, f64)> {
    let mut engine = FxEngine::new();
    engine.apply_config(depth_only(strength));

    let mut left = vec![0.0f64; 512];
    let mut right = vec![0.0f64; 512];
    if right_channel {
        right[0] = 1.0;
    } else {
        left[0] = 1.0;
    }
    engine.process_block(&mut left, &mut right);

    let monitored = if right_channel { &right } else { &left };
    monitored
        .iter()
        .enumerate()
        .skip(1)
        .find(|&(_, &v)| v != 0.0)
        .map(|(i, &v)| (i, v))
}

fn cmd_taps(args: &[String]) {
    let strength = parse_flag(args, "--strength", 800.0) as f32;
    let (gain, invert) = mapping::depth_params(strength);
    let expected_long = if invert { -gain } else { gain };

    println!("Tap timing (strength = {strength:.0})");
    println!("  Expected gain:     {gain:.6} ({:.2} dB)", 20.0 * gain.log10());
    println!("  Long tap polarity: {}", if invert { "inverted" } else { "normal" });
    println!();
    println!("{:>10}  {:>8}  {:>12}  {:>12}", "Tap", "Sample", "Amplitude", "Expected");
    println!("{:-<10}  {:-<8}  {:-<12}  {:-<12}", "", "", "", "");

    match first_arrival(strength, false) {
        Some((n, a)) => {
            println!("{:>10}  {n:>8}  {a:>12.6}  {gain:>12.6}", "short (L)");
            if n != SHORT_TAP {
                eprintln!("  WARNING: short tap expected at sample {SHORT_TAP}");
            }
        }
        None => eprintln!("  WARNING: no short tap arrival within one block"),
    }
    match first_arrival(strength, true) {
        Some((n, a)) => {
            println!("{:>10}  {n:>8}  {a:>12.6}  {expected_long:>12.6}", "long (R)");
            if n != LONG_TAP {
                eprintln!("  WARNING: long tap expected at sample {LONG_TAP}");
            }
        }
        None => eprintln!("  WARNING: no long tap arrival within one block"),
    }
}

// ─── Width sweep ────────────────────────────────────────────────────────────

/// Measure mid and side gain at one width setting using pure-mid and
/// pure-side sine inputs.
fn measure_width_gains(width: f32) -> (f64, f64) {
    let mut engine = FxEngine::new();
    engine.apply_config(EffectConfig {
        widener: WidenerConfig {
            enabled: true,
            width,
        },
        depth: DepthConfig::default(),
    });

    let n = 512;
    let tone: Vec<f64> = (0..n)
        .map(|i| 0.5 * (2.0 * PI * 1000.0 * i as f64 / SAMPLE_RATE).sin())
        .collect();

    // Pure mid: L == R.
    let mut l = tone.clone();
    let mut r = tone.clone();
    engine.process_block(&mut l, &mut r);
    let mid_peak = l
        .iter()
        .zip(&r)
        .map(|(a, b)| ((a + b) * 0.5).abs())
        .fold(0.0f64, f64::max);

    // Pure side: L == -R.
    let mut l: Vec<f64> = tone.clone();
    let mut r: Vec<f64> = tone.iter().map(|x| -x).collect();
    engine.process_block(&mut l, &mut r);
    let side_peak = l
        .iter()
        .zip(&r)
        .map(|(a, b)| ((b - a) * 0.5).abs())
        .fold(0.0f64, f64::max);

    (mid_peak / 0.5, side_peak / 0.5)
}

fn cmd_width_sweep(args: &[String]) {
    let points = parse_flag(args, "--points", 9.0) as usize;
    let csv_path = parse_flag_str(args, "--csv", "");

    let mut csv_lines = Vec::new();
    csv_lines.push("width,mid_gain,side_gain".to_string());

    println!("Width sweep (side gain should track the width control)");
    println!("{:>8}  {:>10}  {:>10}", "Width", "Mid gain", "Side gain");
    println!("{:-<8}  {:-<10}  {:-<10}", "", "", "");

    for i in 0..points {
        let frac = i as f64 / (points - 1).max(1) as f64;
        let width = (frac * mapping::WIDTH_MAX as f64) as f32;
        let (mid_gain, side_gain) = measure_width_gains(width);

        println!("{width:>8.2}  {mid_gain:>10.4}  {side_gain:>10.4}");
        csv_lines.push(format!("{width:.2},{mid_gain:.4},{side_gain:.4}"));
    }

    if !csv_path.is_empty() {
        std::fs::write(csv_path, csv_lines.join("\n") + "\n").expect("Failed to write CSV");
        println!("\nCSV written to {csv_path}");
    }
}

// ─── Feedback stability ─────────────────────────────────────────────────────

fn cmd_stability(args: &[String]) {
    let strength = parse_flag(args, "--strength", 1000.0) as f32;
    let blocks = parse_flag(args, "--blocks", 200.0) as usize;
    let freq = parse_flag(args, "--freq", 440.0);

    let mut engine = FxEngine::new();
    engine.apply_config(depth_only(strength));
    let (gain, _) = mapping::depth_params(strength);

    println!("Feedback stability (strength = {strength:.0}, gain = {gain:.4})");
    println!("{:>8}  {:>10}", "Block", "Peak");
    println!("{:-<8}  {:-<10}", "", "");

    let mut overall_peak = 0.0f64;
    let report_every = (blocks / 10).max(1);
    let mut sample_index = 0usize;

    for block in 0..blocks {
        let mut l = vec![0.0f64; 512];
        let mut r = vec![0.0f64; 512];
        for i in 0..512 {
            let t = (sample_index + i) as f64 / SAMPLE_RATE;
            let x = (2.0 * PI * freq * t).sin();
            l[i] = x;
            r[i] = x;
        }
        sample_index += 512;
        engine.process_block(&mut l, &mut r);

        let peak = l
            .iter()
            .chain(&r)
            .map(|v| v.abs())
            .fold(0.0f64, f64::max);
        overall_peak = overall_peak.max(peak);

        if block % report_every == 0 || block == blocks - 1 {
            println!("{block:>8}  {peak:>10.4}");
        }
    }

    println!();
    if overall_peak.is_finite() && overall_peak < 8.0 {
        println!("Bounded: overall peak {overall_peak:.4}");
    } else {
        println!("UNSTABLE: overall peak {overall_peak}");
        std::process::exit(1);
    }
}

// ─── Render (WAV -> engine -> WAV) ──────────────────────────────────────────

fn cmd_render(args: &[String]) {
    let input = parse_flag_str(args, "--input", "");
    let output = parse_flag_str(args, "--output", "");
    if input.is_empty() || output.is_empty() {
        eprintln!("render requires --input and --output");
        std::process::exit(1);
    }
    let width = parse_flag(args, "--width", 2.0) as f32;
    let strength = parse_flag(args, "--strength", 800.0) as f32;
    let config = EffectConfig {
        widener: WidenerConfig {
            enabled: !has_flag(args, "--no-widener"),
            width,
        },
        depth: DepthConfig {
            enabled: !has_flag(args, "--no-depth"),
            strength,
        },
    };

    let (mut left, mut right, sample_rate) = read_wav_stereo(input);
    eprintln!(
        "Rendering {} frames at {sample_rate} Hz (widener {}, depth {}) → {output}",
        left.len(),
        if config.widener.enabled { "on" } else { "off" },
        if config.depth.enabled { "on" } else { "off" },
    );

    let mut engine = FxEngine::new();
    engine.apply_config(config);

    let frames = left.len();
    let mut start = 0;
    while start < frames {
        let end = (start + BLOCK_SIZE).min(frames);
        engine.process_block(&mut left[start..end], &mut right[start..end]);
        start = end;
    }

    write_wav_stereo(output, &left, &right, sample_rate);
    eprintln!("  Written: {output}");
}

fn read_wav_stereo(path: &str) -> (Vec<f64>, Vec<f64>, u32) {
    let mut reader = hound::WavReader::open(path).expect("failed to open input WAV");
    let spec = reader.spec();
    if spec.channels != 2 {
        eprintln!("Input must be stereo, got {} channel(s)", spec.channels);
        std::process::exit(1);
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.expect("failed to read sample") as f64)
            .collect(),
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.expect("failed to read sample") as f64 / scale)
                .collect()
        }
    };

    let frames = interleaved.len() / 2;
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    for frame in interleaved.chunks_exact(2) {
        left.push(frame[0]);
        right.push(frame[1]);
    }
    (left, right, spec.sample_rate)
}

fn write_wav_stereo(path: &str, left: &[f64], right: &[f64], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("failed to create WAV file");
    for (&l, &r) in left.iter().zip(right) {
        writer
            .write_sample(l as f32)
            .expect("failed to write sample");
        writer
            .write_sample(r as f32)
            .expect("failed to write sample");
    }
    writer.finalize().expect("failed to finalize WAV");
}
