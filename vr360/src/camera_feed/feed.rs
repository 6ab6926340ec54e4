use engine::{video_log, RenderSurface};

use super::{FrameHalf, FrameSplitter, RowOrder, SplitOutcome, VideoSource};
use crate::component::Component;
use crate::time::Time;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub frames_presented: u64,
    pub frames_skipped: u64,
    pub start_failures: u64,
}

/// Pulls frames from a dual-lens camera and shows each half on its own
/// surface.
///
/// Nothing here is fatal. A camera that fails to start is retried on the
/// next tick, and frames that are too small or truncated are dropped.
pub struct CameraFeed {
    name: String,
    source: Box<dyn VideoSource>,
    splitter: FrameSplitter,
    front_surface: Box<dyn RenderSurface>,
    rear_surface: Box<dyn RenderSurface>,
    mirror: Option<(FrameHalf, Box<dyn RenderSurface>)>,
    stats: FeedStats,
    start_failing: bool,
}

impl CameraFeed {
    pub fn new(
        source: Box<dyn VideoSource>,
        row_order: RowOrder,
        front_surface: Box<dyn RenderSurface>,
        rear_surface: Box<dyn RenderSurface>,
    ) -> Self {
        CameraFeed {
            name: "camera_feed".to_string(),
            source,
            splitter: FrameSplitter::new(row_order),
            front_surface,
            rear_surface,
            mirror: None,
            stats: FeedStats::default(),
            start_failing: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Also show `half` of every presented frame on `surface`.
    pub fn with_mirror(mut self, half: FrameHalf, surface: Box<dyn RenderSurface>) -> Self {
        self.mirror = Some((half, surface));
        self
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    pub fn is_running(&self) -> bool {
        self.source.is_playing()
    }

    pub fn splitter(&self) -> &FrameSplitter {
        &self.splitter
    }

    pub fn set_row_order(&mut self, row_order: RowOrder) {
        self.splitter.set_row_order(row_order);
    }

    fn ensure_started(&mut self) -> bool {
        if self.source.is_playing() {
            return true;
        }
        match self.source.start() {
            Ok(()) => {
                video_log!(INFO, "{} started", self.name);
                self.start_failing = false;
                true
            }
            Err(err) => {
                self.stats.start_failures += 1;
                // Warn once per run of failures; retries are logged quietly.
                if self.start_failing {
                    video_log!(DEBUG, "{} still cannot start: {}", self.name, err);
                } else {
                    video_log!(WARN, "{} could not start: {}", self.name, err);
                    self.start_failing = true;
                }
                false
            }
        }
    }
}

impl Component for CameraFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.ensure_started();
    }

    fn tick(&mut self, time: &Time) {
        if !self.ensure_started() {
            return;
        }

        self.source.advance(time);
        if !self.source.did_update_this_frame() {
            return;
        }

        let outcome = self.splitter.split(
            self.source.width(),
            self.source.height(),
            self.source.pixels(),
        );

        match outcome {
            SplitOutcome::Split { resized } => {
                if resized {
                    video_log!(
                        DEBUG,
                        "{} frame size now {}x{}",
                        self.name,
                        self.source.width(),
                        self.source.height()
                    );
                }
                self.front_surface.set_texture(self.splitter.front());
                self.rear_surface.set_texture(self.splitter.rear());
                if let Some((half, surface)) = self.mirror.as_mut() {
                    surface.set_texture(self.splitter.half(*half));
                }
                self.stats.frames_presented += 1;
            }
            SplitOutcome::TooSmall => {
                self.stats.frames_skipped += 1;
                video_log!(
                    TRACE,
                    "{} skipping {}x{} placeholder frame",
                    self.name,
                    self.source.width(),
                    self.source.height()
                );
            }
            SplitOutcome::ShortBuffer { expected, actual } => {
                self.stats.frames_skipped += 1;
                video_log!(
                    WARN,
                    "{} frame truncated: expected {} bytes, got {}",
                    self.name,
                    expected,
                    actual
                );
            }
        }
    }

    fn shutdown(&mut self) {
        self.source.stop();
        video_log!(INFO, "{} stopped after {:?}", self.name, self.stats);
    }
}
