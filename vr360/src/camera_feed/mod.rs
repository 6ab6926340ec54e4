//! Dual-fisheye camera capture, split into front and rear screen textures.

pub mod feed;
pub mod frame_splitter;
pub mod video_source;

pub use feed::{CameraFeed, FeedStats};
pub use frame_splitter::{
    FrameHalf, FrameSplitter, RowOrder, SplitOutcome, MIN_FRAME_DIMENSION,
};
pub use video_source::{StillImageSource, TestPatternSource, VideoError, VideoSource};
