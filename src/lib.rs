//! # mtpgallery
//!
//! Traverse the object tree of a USB-attached MTP (Media Transfer
//! Protocol) device and stream downscaled JPEG frames to a display
//! sink, in discovery order.
//!
//! ## Features
//!
//! - **Session lifecycle** over a pluggable [`MtpTransport`]: open
//!   once, close exactly once on every exit path (completion, fatal
//!   error, cancellation).
//! - **Depth-first traversal** of every storage unit with defensive
//!   consistency checks: parent-mismatch discard, a per-storage
//!   visited set, and a configurable depth ceiling.
//! - **Eligibility policy**: EXIF JPEG objects the device marks
//!   transferable; everything else is silently skipped.
//! - **Downscaled decode**: integer sample factor against fixed
//!   display bounds (800x600 by default, configurable).
//! - **Producer/consumer handoff**: a background worker pushes frames
//!   through a channel without waiting on the consumer; cancellation
//!   is a flag observed between object iterations.
//! - **Run reporting**: per-object failures never abort the walk; each
//!   skip class is counted in [`WalkStats`].
//!
//! ## Example
//!
//! ```no_run
//! use mtpgallery::{spawn, GalleryConfig, MtpTransport};
//!
//! # async fn example(transport: impl MtpTransport + Send + 'static) -> mtpgallery::Result<()> {
//! let (handle, mut frames) = spawn(transport, GalleryConfig::default());
//!
//! while let Some(frame) = frames.recv().await {
//!     println!("{}x{} from {}", frame.width, frame.height, frame.source);
//!     // hand frame.image to the display
//! }
//!
//! let stats = handle.join().await?;
//! println!("produced {} frames", stats.frames_produced);
//! # Ok(())
//! # }
//! ```

pub mod decode;
pub mod device;
pub mod error;
pub mod frame;
pub mod gallery;
pub mod slideshow;

pub use decode::{sample_factor, DecodePipeline, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
pub use device::{DeviceSession, MtpTransport};
pub use error::{GalleryError, Result};
pub use frame::{ChannelSink, DecodedFrame, FnSink, FrameSink};
pub use gallery::{
    is_eligible_image, AssociationType, ObjectFormat, ObjectHandle, ObjectInfo, ProtectionStatus,
    StorageId, TreeWalker, WalkStats,
};
pub use slideshow::{run_blocking, spawn, CancelFlag, GalleryConfig, SlideshowHandle};
