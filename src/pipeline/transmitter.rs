//! Asynchronous outbound transmitter
//!
//! Frame construction and delivery run on a dedicated worker thread so the
//! ingestion path never waits on the transport. The pipeline publishes its
//! newest completed output into a single slot (overwrite-on-publish); the
//! worker drains the slot, builds the wire frame, and hands it downstream.
//! A slow transport therefore costs dropped outputs, never ingestion lag.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::runtime::errors::TransportResult;
use crate::runtime::frame::{
    FrameHeader, HEADER_LEN, OUTPUT_SAMPLE_LEN, OutputSample, write_output_sample,
};
use crate::runtime::ports::FrameTransport;
use crate::runtime::slot::{SlotReceiver, SlotRecvError, SlotSender, slot};

/// How long the worker waits on an empty slot before rechecking for
/// shutdown. A liveness safeguard only; shutdown also notifies the slot,
/// so nothing observable depends on this value.
const IDLE_WAIT: Duration = Duration::from_secs(10);

/// One published pipeline output: the patched header copy plus one output
/// sample per mapped channel
pub(crate) struct TxJob {
    pub header: FrameHeader,
    pub samples: Vec<OutputSample>,
}

/// Owns the worker thread and the publishing half of the slot
///
/// Dropping the transmitter signals shutdown and joins the worker; a job
/// still pending at that point is dropped, not flushed.
pub(crate) struct Transmitter {
    sender: SlotSender<TxJob>,
    worker: Option<JoinHandle<()>>,
}

impl Transmitter {
    /// Spawn the worker thread around the injected transport
    ///
    /// `payload_size` is the configured payload-size override, read by the
    /// worker at send time.
    pub fn spawn(transport: Box<dyn FrameTransport>, payload_size: Arc<AtomicUsize>) -> Self {
        let (sender, receiver) = slot();
        let worker = std::thread::Builder::new()
            .name("frame-tx".to_string())
            .spawn(move || run_worker(receiver, transport, payload_size))
            .expect("Failed to spawn transmitter thread");
        Self {
            sender,
            worker: Some(worker),
        }
    }

    /// Publish the newest output, displacing any unsent one
    pub fn publish(&self, job: TxJob) {
        if self.sender.publish(job).is_some() {
            debug!("Transmitter busy, displaced an unsent output frame");
        }
    }
}

impl Drop for Transmitter {
    fn drop(&mut self) {
        self.sender.shutdown();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

fn run_worker(
    jobs: SlotReceiver<TxJob>,
    transport: Box<dyn FrameTransport>,
    payload_size: Arc<AtomicUsize>,
) {
    info!("Transmitter thread started");

    loop {
        match jobs.recv_timeout(IDLE_WAIT) {
            Ok(job) => {
                if let Err(e) = send_job(&*transport, &payload_size, &job) {
                    error!("Dropping output frame: {}", e);
                }
            }
            Err(SlotRecvError::TimedOut) => continue,
            Err(SlotRecvError::Shutdown) => break,
        }
    }

    info!("Transmitter thread stopped");
}

/// Build the outbound wire frame for one job and hand it to the transport
///
/// The frame is the header copy followed by `max(payload override, mapped
/// channels)` sample slots; slots beyond the mapped channels stay zero.
fn send_job(
    transport: &dyn FrameTransport,
    payload_size: &AtomicUsize,
    job: &TxJob,
) -> TransportResult {
    let slots = payload_size.load(Ordering::Relaxed).max(job.samples.len());
    let len = HEADER_LEN + slots * OUTPUT_SAMPLE_LEN;

    let mut frame = transport.request_buffer(len)?;
    frame[..HEADER_LEN].copy_from_slice(job.header.as_bytes());
    for (ch, &value) in job.samples.iter().enumerate() {
        write_output_sample(&mut frame, ch, value);
    }
    transport.send_frame(frame)
}
