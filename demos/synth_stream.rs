//! Example: Synthetic frame stream
//!
//! Synthesizes a stream of sensor frames whose channels ramp fast enough to
//! roll over, pushes them through a processor, and prints what comes out the
//! other side. Exercises masking, unwrapping, filtering and decimation in
//! one place.
//!
//! Usage:
//!   cargo run --release --example synth_stream -- \
//!       --channels 16 --mapped 4 -n 2000 --factor 20
//!
//! Without the filter stage:
//!   cargo run --release --example synth_stream -- \
//!       --channels 16 --mapped 4 -n 2000 --factor 20 --no-filter

use clap::Parser;
use framepipe::runtime::frame::read_output_sample;
use framepipe::{
    ChannelTransport, FrameHeader, FrameProcessor, FrameSink, HEADER_LEN, RAW_SAMPLE_LEN, RawFrame,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Channels carried by each synthesized inbound frame
    #[arg(long, default_value = "16")]
    channels: usize,

    /// Channels mapped into the output (mask = 0..mapped)
    #[arg(long, default_value = "4")]
    mapped: usize,

    /// Number of frames to synthesize
    #[arg(short, long, default_value = "1000")]
    n: usize,

    /// Decimation factor (one outbound frame per this many inbound)
    #[arg(long, default_value = "20")]
    factor: usize,

    /// Per-frame phase increment on channel 0; channel k ramps k+1 times
    /// faster. Keep the fastest ramp well under the roll-over detection
    /// band (0x2000 per frame) or wraps go unnoticed, as on real hardware.
    #[arg(long, default_value = "1500")]
    step: i32,

    /// Disable the filter stage (raw unwrapped output)
    #[arg(long)]
    no_filter: bool,
}

/// Fold an unbounded phase into the wrapped range the frontend would emit
fn wrap_phase(phase: i32) -> i32 {
    (phase + 0x8000).rem_euclid(0x10000) - 0x8000
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("=== Synthetic Frame Stream ===");
    info!("Channels: {} in, {} mapped", args.channels, args.mapped);
    info!("Frames: {}, decimation factor: {}", args.n, args.factor);

    let (transport, rx) = ChannelTransport::with_capacity(256);
    let processor = FrameProcessor::with_max_channels(transport, args.channels);

    let mask: Vec<usize> = (0..args.mapped).collect();
    processor.set_mask(&mask)?;
    processor.set_factor(args.factor)?;
    if args.no_filter {
        processor.set_filter_enabled(false);
    } else {
        // First-order smoother across consecutive frames
        processor.set_order(1);
        processor.set_a(&[1.0, 0.0])?;
        processor.set_b(&[0.5, 0.5])?;
    }

    // Consumer: print one line per outbound frame
    let printer = std::thread::spawn(move || {
        let mut count = 0usize;
        while let Ok(frame) = rx.recv() {
            count += 1;
            let header = FrameHeader::from_slice(&frame).expect("valid outbound header");
            info!(
                "Out #{:<4} counter={:<6} channels={} ch0={}",
                count,
                header.frame_counter(),
                header.num_channels(),
                read_output_sample(&frame, 0)
            );
        }
        count
    });

    // Producer: each channel is a phase ramp that rolls over at the range
    // edges; the processor's unwrapper should reconstruct a straight line
    let mut phase = vec![0i32; args.channels];
    for n in 0..args.n {
        let mut header = FrameHeader::zeroed();
        header.set_version(1);
        header.set_num_channels(args.channels as u32);
        header.set_frame_counter(n as u32);
        header.set_timestamp(n as u64 * 500);

        let mut payload = vec![0u8; HEADER_LEN + args.channels * RAW_SAMPLE_LEN];
        payload[..HEADER_LEN].copy_from_slice(header.as_bytes());
        for (ch, p) in phase.iter_mut().enumerate() {
            *p += args.step * (ch as i32 + 1);
            let offset = HEADER_LEN + ch * RAW_SAMPLE_LEN;
            payload[offset..offset + RAW_SAMPLE_LEN]
                .copy_from_slice(&wrap_phase(*p).to_le_bytes());
        }

        processor.accept_frame(&RawFrame::new(payload));
    }

    // Dropping the processor stops the transmitter worker and closes the
    // transport, which ends the printer loop
    drop(processor);
    let delivered = printer.join().expect("printer thread panicked");

    info!("Synthesized {} frames, received {}", args.n, delivered);
    info!("Done!");

    Ok(())
}
