//! Audio loading for the feature pipeline
//!
//! Decodes a cough recording (any format Symphonia supports) to mono f32 at
//! 22 050 Hz and normalizes it to exactly 5 seconds. The downstream mel and
//! MFCC transforms rely on the fixed 110 250-sample length.

use std::path::Path;

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::{Result, ScreenError};

/// Working sample rate for all feature extraction
pub const SAMPLE_RATE: u32 = 22_050;

/// Normalized clip length: 5 seconds at 22 050 Hz
pub const CLIP_SAMPLES: usize = 110_250;

/// Load a recording as a normalized mono waveform.
///
/// Shorter clips are zero-padded at the tail; longer clips keep the first
/// 5 seconds.
pub fn load_waveform(path: &Path) -> Result<Vec<f32>> {
    let (samples, sample_rate) = decode_mono(path)?;
    let resampled = resample(samples, sample_rate, SAMPLE_RATE)?;
    Ok(normalize_duration(resampled))
}

/// Pad or truncate a waveform to exactly [`CLIP_SAMPLES`]
pub fn normalize_duration(mut samples: Vec<f32>) -> Vec<f32> {
    samples.resize(CLIP_SAMPLES, 0.0);
    samples
}

/// Decode an audio file to mono f32 samples using Symphonia
fn decode_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    use std::fs::File;
    use symphonia::core::audio::SampleBuffer;
    use symphonia::core::codecs::DecoderOptions;
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::MediaSourceStream;
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;

    let file = File::open(path).map_err(|e| ScreenError::AudioDecode(e.to_string()))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the probe with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| ScreenError::AudioDecode(e.to_string()))?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| ScreenError::AudioDecode("No audio track found".to_string()))?;

    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| ScreenError::AudioDecode("Unknown sample rate".to_string()))?;

    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .unwrap_or(1)
        .max(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| ScreenError::AudioDecode(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut decoded_any = false;

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                if decoded_any {
                    log::warn!("Error reading packet: {}", e);
                    break;
                }
                return Err(ScreenError::AudioDecode(e.to_string()));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("Error decoding packet: {}", e);
                continue;
            }
        };
        decoded_any = true;

        // Initialize sample buffer on first decode
        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(duration, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            // Downmix interleaved frames to mono by channel average
            for frame in buf.samples().chunks(channels) {
                samples.push(frame.iter().sum::<f32>() / channels as f32);
            }
        }
    }

    if samples.is_empty() {
        return Err(ScreenError::AudioDecode(
            "No decodable audio data".to_string(),
        ));
    }

    Ok((samples, sample_rate))
}

/// Resample a mono waveform with a windowed-sinc kernel
fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }

    log::debug!("Resampling {} Hz -> {} Hz", from_rate, to_rate);

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        to_rate as f64 / from_rate as f64,
        1.1,
        params,
        1024,
        1,
    )
    .map_err(|e| ScreenError::AudioDecode(e.to_string()))?;

    let mut output = Vec::with_capacity(
        (samples.len() as f64 * to_rate as f64 / from_rate as f64) as usize + 1024,
    );

    let mut pos = 0;
    while pos < samples.len() {
        let needed = resampler.input_frames_next();
        if pos + needed <= samples.len() {
            let chunk = vec![samples[pos..pos + needed].to_vec()];
            let frames = resampler
                .process(&chunk, None)
                .map_err(|e| ScreenError::AudioDecode(e.to_string()))?;
            output.extend_from_slice(&frames[0]);
            pos += needed;
        } else {
            let chunk = vec![samples[pos..].to_vec()];
            let frames = resampler
                .process_partial(Some(chunk.as_slice()), None)
                .map_err(|e| ScreenError::AudioDecode(e.to_string()))?;
            output.extend_from_slice(&frames[0]);
            pos = samples.len();
        }
    }

    // Flush the resampler's internal delay line
    let tail = resampler
        .process_partial(Option::<&[Vec<f32>]>::None, None)
        .map_err(|e| ScreenError::AudioDecode(e.to_string()))?;
    output.extend_from_slice(&tail[0]);

    Ok(output)
}
