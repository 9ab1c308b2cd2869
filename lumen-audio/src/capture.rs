//! Default-input capture stream feeding the sample ring

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat};
use crossbeam_channel::{bounded, Receiver, Sender};
use ringbuf::traits::{Producer, Split};
use ringbuf::{HeapProd, HeapRb};
use tracing::info;

use crate::sampler::Sampler;
use lumen_analysis::FFT_SIZE;

/// Ring capacity in mono samples (~4 analysis windows of headroom)
const RING_CAPACITY: usize = FFT_SIZE * 4;

/// Errors that prevent the capture stream from starting
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no audio input device available")]
    NoDevice,
    #[error("failed to query input config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("unsupported input sample format: {0}")]
    UnsupportedFormat(SampleFormat),
    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Events reported from the stream after startup
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// The stream reported an error; capture may have stalled
    Error(String),
}

/// Owns the live input stream. Dropping the engine closes the stream and
/// releases the device.
pub struct CaptureEngine {
    _stream: cpal::Stream,
    sample_rate: u32,
    event_rx: Receiver<CaptureEvent>,
}

impl CaptureEngine {
    /// Open the default input device and start capturing.
    ///
    /// Returns the engine (keep it alive for the session) and the sampler
    /// for the render thread.
    pub fn start() -> Result<(Self, Sampler), CaptureError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;
        let config = device.default_input_config()?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let device_name = device.name().unwrap_or_else(|_| "unknown".into());
        info!(device = %device_name, sample_rate, channels, "opening capture stream");

        let ring = HeapRb::<f32>::new(RING_CAPACITY);
        let (producer, consumer) = ring.split();

        let (event_tx, event_rx) = bounded(16);
        let stream_config: cpal::StreamConfig = config.config();

        let stream = match config.sample_format() {
            SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, channels, producer, event_tx)?
            }
            SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, channels, producer, event_tx)?
            }
            SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, channels, producer, event_tx)?
            }
            other => return Err(CaptureError::UnsupportedFormat(other)),
        };

        stream.play()?;

        let engine = Self {
            _stream: stream,
            sample_rate,
            event_rx,
        };
        Ok((engine, Sampler::new(consumer)))
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Drain pending stream events without blocking
    pub fn try_event(&self) -> Option<CaptureEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut producer: HeapProd<f32>,
    event_tx: Sender<CaptureEvent>,
) -> Result<cpal::Stream, CaptureError>
where
    T: Sample + cpal::SizedSample,
    f32: FromSample<T>,
{
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            // Downmix to mono in the callback, no allocation. When the ring
            // is full the newest samples are dropped; the render thread
            // drains far faster than the device fills.
            let mut acc = 0.0f32;
            let mut ch = 0;
            for &s in data {
                acc += f32::from_sample(s);
                ch += 1;
                if ch == channels {
                    let _ = producer.try_push(acc / channels as f32);
                    acc = 0.0;
                    ch = 0;
                }
            }
        },
        move |err| {
            let _ = event_tx.try_send(CaptureEvent::Error(err.to_string()));
        },
        None,
    )?;
    Ok(stream)
}
