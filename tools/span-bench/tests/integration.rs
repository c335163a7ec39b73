/// Integration tests for the span-bench CLI.
///
/// These render short clips through the engine binary and verify:
/// 1. Full bypass is a bit-exact pass-through
/// 2. Width 0 collapses the output to mono
/// 3. Output WAV shape matches the input
use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "span-bench", "--"]);
    cmd
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(name)
}

/// Write a short stereo f32 test clip: sine left, ramp right.
fn write_test_clip(path: &std::path::Path, frames: usize) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("failed to create test clip");
    for i in 0..frames {
        let l = (2.0 * std::f32::consts::PI * i as f32 / 64.0).sin() * 0.5;
        let r = (i % 100) as f32 / 100.0 - 0.5;
        writer.write_sample(l).unwrap();
        writer.write_sample(r).unwrap();
    }
    writer.finalize().unwrap();
}

fn read_frames(path: &std::path::Path) -> Vec<(f32, f32)> {
    let mut reader = hound::WavReader::open(path).expect("invalid WAV file");
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    samples.chunks_exact(2).map(|f| (f[0], f[1])).collect()
}

#[test]
fn test_render_bypass_is_identity() {
    let input = temp_path("span_bypass_in.wav");
    let output = temp_path("span_bypass_out.wav");
    for path in [&input, &output] {
        let _ = std::fs::remove_file(path);
    }
    write_test_clip(&input, 4410);

    let status = cargo_bin()
        .args(["render", "--no-widener", "--no-depth", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("failed to run span-bench");
    assert!(status.success(), "span-bench exited with error");

    let in_frames = read_frames(&input);
    let out_frames = read_frames(&output);
    assert_eq!(in_frames.len(), out_frames.len());
    assert_eq!(in_frames, out_frames, "bypass must pass samples through untouched");

    for path in [&input, &output] {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn test_render_zero_width_collapses_to_mono() {
    let input = temp_path("span_mono_in.wav");
    let output = temp_path("span_mono_out.wav");
    for path in [&input, &output] {
        let _ = std::fs::remove_file(path);
    }
    write_test_clip(&input, 2205);

    let status = cargo_bin()
        .args(["render", "--no-depth", "--width", "0", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("failed to run span-bench");
    assert!(status.success());

    let in_frames = read_frames(&input);
    let out_frames = read_frames(&output);
    assert_eq!(in_frames.len(), out_frames.len());
    for (i, ((il, ir), (ol, or))) in in_frames.iter().zip(&out_frames).enumerate() {
        assert_eq!(ol, or, "channels differ at frame {i}");
        let expected = ((*il as f64 + *ir as f64) * 0.5) as f32;
        assert_eq!(*ol, expected, "wrong mono mix at frame {i}");
    }

    for path in [&input, &output] {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn test_taps_reports_cleanly() {
    let status = cargo_bin()
        .args(["taps", "--strength", "400"])
        .status()
        .expect("failed to run span-bench");
    assert!(status.success());
}
