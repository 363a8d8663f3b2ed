//! Background slideshow worker: open, traverse, decode, hand off.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::decode::{DecodePipeline, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use crate::device::{DeviceSession, MtpTransport};
use crate::error::Result;
use crate::frame::{ChannelSink, DecodedFrame, FrameSink};
use crate::gallery::filter::is_eligible_image;
use crate::gallery::object::ObjectFormat;
use crate::gallery::walker::{TreeWalker, WalkStats};

/// Policy knobs for one slideshow run.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Largest frame width handed to the sink
    pub max_width: u32,
    /// Largest frame height handed to the sink
    pub max_height: u32,
    /// Folder recursion ceiling per storage unit
    pub max_depth: u32,
    /// Narrow enumeration to one format; `None` asks the device for
    /// everything and lets the eligibility filter decide
    pub format_filter: Option<ObjectFormat>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            max_depth: 64,
            format_filter: None,
        }
    }
}

/// Cooperative cancellation flag shared between the worker and its
/// controller.
///
/// Observed once per object iteration, never mid-request; the worker
/// finishes the exchange in flight and then unwinds, closing the
/// session on the way out.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to stop at the next object boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run the whole open → enumerate → traverse → decode sequence on the
/// calling thread.
///
/// This is the synchronous core behind [`spawn`]; it is also usable
/// directly when no async runtime is around. Device I/O is strictly
/// sequential: one request in flight, no parallelism across storage
/// units, folders, or objects. The session closes on every exit path,
/// including cancellation.
pub fn run_blocking<T, S>(
    transport: T,
    config: &GalleryConfig,
    sink: &mut S,
    cancel: &CancelFlag,
) -> Result<WalkStats>
where
    T: MtpTransport,
    S: FrameSink + ?Sized,
{
    let mut session = DeviceSession::open(transport)?;
    let pipeline = DecodePipeline::new(config.max_width, config.max_height);
    let mut stats = WalkStats::default();

    for storage in session.storage_ids() {
        if cancel.is_cancelled() {
            stats.cancelled = true;
            break;
        }
        stats.storages_scanned += 1;

        let mut walker = TreeWalker::new(
            &mut session,
            storage,
            config.format_filter,
            config.max_depth,
        );
        walker.walk(cancel, &mut stats, &mut |session, handle, info, stats| {
            if !is_eligible_image(info) {
                return;
            }
            stats.eligible_images += 1;
            if let Some(frame) = pipeline.produce(session, handle, info, stats) {
                sink.on_frame(frame);
            }
        });
    }

    session.close();
    Ok(stats)
}

/// Handle to a running slideshow worker.
pub struct SlideshowHandle {
    cancel: CancelFlag,
    task: JoinHandle<Result<WalkStats>>,
}

impl SlideshowHandle {
    /// Signal the worker to abort; it stops at the next object
    /// iteration and still closes the device session.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The flag shared with the worker.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Wait for the worker to finish and collect its run report.
    pub async fn join(self) -> Result<WalkStats> {
        self.task.await?
    }
}

/// Spawn the slideshow worker for one device.
///
/// Exactly one worker and one session per invocation. The worker does
/// all device I/O and decoding on a blocking task and never waits on
/// the consumer: frames are pushed through the returned channel in
/// discovery order as they are produced, so the producer may outpace
/// the display. Dropping the receiver cancels the run.
pub fn spawn<T>(
    transport: T,
    config: GalleryConfig,
) -> (SlideshowHandle, mpsc::UnboundedReceiver<DecodedFrame>)
where
    T: MtpTransport + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();

    let task = tokio::task::spawn_blocking(move || {
        let mut sink = ChannelSink::new(tx, worker_cancel.clone());
        run_blocking(transport, &config, &mut sink, &worker_cancel)
    });

    (SlideshowHandle { cancel, task }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.max_width, 800);
        assert_eq!(config.max_height, 600);
        assert_eq!(config.max_depth, 64);
        assert!(config.format_filter.is_none());
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }
}
