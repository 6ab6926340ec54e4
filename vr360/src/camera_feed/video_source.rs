use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::{video_log, RawTextureData};
use thiserror::Error;

use super::RowOrder;
use crate::time::Time;

#[derive(Error, Debug)]
pub enum VideoError {
    #[error("no video device available")]
    NoDevice,

    #[error("failed to load frame image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("frame image {0} failed to load earlier")]
    LoadFailed(PathBuf),
}

/// A producer of RGBA frames, polled once per tick.
///
/// `pixels` is row-major, four bytes per pixel, `width * height` pixels long
/// once a frame exists. Row order is a property of the source and is
/// reconciled by the splitter's [`RowOrder`].
pub trait VideoSource {
    fn start(&mut self) -> Result<(), VideoError>;

    fn stop(&mut self);

    fn is_playing(&self) -> bool;

    /// Move the source forward to `time`, possibly producing a new frame.
    fn advance(&mut self, time: &Time);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixels(&self) -> &[u8];

    fn did_update_this_frame(&self) -> bool;
}

/// Width and height reported while a camera is still warming up.
pub const PLACEHOLDER_DIMENSION: u32 = 16;

/// Synthetic dual-lens camera.
///
/// Memory rows `[H/2, H)` are filled with the front colour and rows
/// `[0, H/2)` with the rear colour, matching a bottom-up capture. The first
/// pixel carries the frame counter in its red and green channels (little
/// endian).
pub struct TestPatternSource {
    width: u32,
    height: u32,
    front_color: [u8; 4],
    rear_color: [u8; 4],
    frame_interval: Duration,
    unavailable_starts: u32,
    warmup_frames: u32,
    frame: RawTextureData,
    playing: bool,
    updated: bool,
    since_last_frame: Duration,
    first_frame_pending: bool,
    frame_counter: u16,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        TestPatternSource {
            width,
            height,
            front_color: [255, 128, 0, 255],
            rear_color: [0, 64, 255, 255],
            frame_interval: Duration::ZERO,
            unavailable_starts: 0,
            warmup_frames: 0,
            frame: RawTextureData::empty(),
            playing: false,
            updated: false,
            since_last_frame: Duration::ZERO,
            first_frame_pending: false,
            frame_counter: 0,
        }
    }

    pub fn with_colors(mut self, front: [u8; 4], rear: [u8; 4]) -> Self {
        self.front_color = front;
        self.rear_color = rear;
        self
    }

    /// Produce at most one frame per `interval`. Zero means every tick.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Fail the first `count` calls to `start`, like a headset whose camera
    /// permission has not been granted yet.
    pub fn with_unavailable_starts(mut self, count: u32) -> Self {
        self.unavailable_starts = count;
        self
    }

    /// Report `count` placeholder-sized frames before real ones.
    pub fn with_warmup_frames(mut self, count: u32) -> Self {
        self.warmup_frames = count;
        self
    }

    pub fn frame_counter(&self) -> u16 {
        self.frame_counter
    }

    fn render_placeholder(&mut self) {
        self.frame
            .reshape(PLACEHOLDER_DIMENSION, PLACEHOLDER_DIMENSION);
        self.frame.bytes.fill(0);
    }

    fn render_pattern(&mut self) {
        self.frame.reshape(self.width, self.height);
        let rear_rows = self.height / 2;
        for y in 0..self.height {
            let color = if y < rear_rows {
                self.rear_color
            } else {
                self.front_color
            };
            for pixel in self.frame.row_mut(y).chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        if let Some(first) = self.frame.bytes.get_mut(..2) {
            first.copy_from_slice(&self.frame_counter.to_le_bytes());
        }
    }
}

impl VideoSource for TestPatternSource {
    fn start(&mut self) -> Result<(), VideoError> {
        if self.unavailable_starts > 0 {
            self.unavailable_starts -= 1;
            return Err(VideoError::NoDevice);
        }
        self.playing = true;
        self.first_frame_pending = true;
        video_log!(DEBUG, "test pattern started at {}x{}", self.width, self.height);
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
        self.updated = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn advance(&mut self, time: &Time) {
        self.updated = false;
        if !self.playing {
            return;
        }

        if self.warmup_frames > 0 {
            self.warmup_frames -= 1;
            self.render_placeholder();
            self.updated = true;
            return;
        }

        if self.first_frame_pending {
            self.first_frame_pending = false;
            self.since_last_frame = Duration::ZERO;
        } else {
            self.since_last_frame += time.delta;
            if self.since_last_frame < self.frame_interval {
                return;
            }
            self.since_last_frame -= self.frame_interval;
        }

        self.render_pattern();
        self.updated = true;
    }

    fn width(&self) -> u32 {
        self.frame.width
    }

    fn height(&self) -> u32 {
        self.frame.height
    }

    fn pixels(&self) -> &[u8] {
        &self.frame.bytes
    }

    fn did_update_this_frame(&self) -> bool {
        self.updated
    }
}

/// A single dual-lens photograph presented as a one-frame video.
pub struct StillImageSource {
    path: Option<PathBuf>,
    row_order: RowOrder,
    frame: Option<RawTextureData>,
    load_failed: bool,
    playing: bool,
    pending_update: bool,
    updated: bool,
}

impl StillImageSource {
    /// Decode lazily from `path` on `start`, storing rows in `row_order`.
    pub fn open(path: impl AsRef<Path>, row_order: RowOrder) -> Self {
        StillImageSource {
            path: Some(path.as_ref().to_path_buf()),
            row_order,
            frame: None,
            load_failed: false,
            playing: false,
            pending_update: false,
            updated: false,
        }
    }

    pub fn from_image(image: &image::DynamicImage, row_order: RowOrder) -> Self {
        StillImageSource {
            path: None,
            row_order,
            frame: Some(Self::to_row_order(image, row_order)),
            load_failed: false,
            playing: false,
            pending_update: false,
            updated: false,
        }
    }

    fn to_row_order(image: &image::DynamicImage, row_order: RowOrder) -> RawTextureData {
        let mut frame = RawTextureData::from_image(image);
        if row_order == RowOrder::BottomUp {
            frame.flip_rows();
        }
        frame
    }
}

impl VideoSource for StillImageSource {
    fn start(&mut self) -> Result<(), VideoError> {
        if self.frame.is_none() {
            let Some(path) = self.path.as_ref() else {
                return Err(VideoError::NoDevice);
            };
            // The file is only read once; a failed decode stays failed.
            if self.load_failed {
                return Err(VideoError::LoadFailed(path.clone()));
            }
            let image = image::open(path).map_err(|source| {
                self.load_failed = true;
                VideoError::Image {
                    path: path.clone(),
                    source,
                }
            })?;
            video_log!(
                INFO,
                "loaded still frame {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            self.frame = Some(Self::to_row_order(&image, self.row_order));
        }
        self.playing = true;
        self.pending_update = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
        self.updated = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn advance(&mut self, _time: &Time) {
        self.updated = self.playing && self.pending_update;
        if self.updated {
            self.pending_update = false;
        }
    }

    fn width(&self) -> u32 {
        self.frame.as_ref().map_or(0, |f| f.width)
    }

    fn height(&self) -> u32 {
        self.frame.as_ref().map_or(0, |f| f.height)
    }

    fn pixels(&self) -> &[u8] {
        self.frame
            .as_ref()
            .map(|f| f.bytes.as_slice())
            .unwrap_or(&[])
    }

    fn did_update_this_frame(&self) -> bool {
        self.updated
    }
}
