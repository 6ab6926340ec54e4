//! Assembles the full 360° viewing scene from an [`AppConfig`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use engine::{config_log, RecordingSurface};

use crate::camera_feed::{CameraFeed, StillImageSource, TestPatternSource, VideoSource};
use crate::component::ComponentHost;
use crate::config::AppConfig;
use crate::input_context::InputContext;
use crate::locomotion::{
    shared, LocomotionDriver, LocomotionProvider, QueuedLocomotion, SnapToAnchor, XrRig,
};
use crate::screens::{CurvedScreen, HemisphereParams, HemisphereScreen};
use crate::teleport::HandTeleport;

/// Handles to the shared state of a running scene.
///
/// The host owns the components; everything a caller may want to inspect or
/// drive from outside is reachable through the shared handles here.
pub struct ViewerScene {
    pub host: ComponentHost,
    /// Front dome, textured with the visual top of each frame.
    pub front_dome: RecordingSurface,
    /// Rear dome, textured with the visual bottom of each frame.
    pub rear_dome: RecordingSurface,
    /// Curved screen, textured with `camera_feed.curved_screen_image`.
    pub curved_screen: RecordingSurface,
    pub input: Rc<RefCell<InputContext>>,
    pub locomotion: Rc<RefCell<QueuedLocomotion>>,
}

impl ViewerScene {
    /// Build with the camera source the config asks for: a still image when
    /// `camera_feed.image_path` is set, otherwise a synthetic pattern.
    pub fn from_config(config: &AppConfig) -> Self {
        let feed = &config.camera_feed;
        let source: Box<dyn VideoSource> = match &feed.image_path {
            Some(path) => Box::new(StillImageSource::open(path, feed.row_order)),
            None => Box::new(TestPatternSource::new(feed.width, feed.height)),
        };
        Self::with_source(config, source)
    }

    pub fn with_source(config: &AppConfig, source: Box<dyn VideoSource>) -> Self {
        let front_dome = RecordingSurface::new();
        let rear_dome = RecordingSurface::new();
        let curved_screen = RecordingSurface::new();
        let input = Rc::new(RefCell::new(InputContext::default()));
        let locomotion = shared(QueuedLocomotion::new(XrRig::default(), config.blink_delay()));

        let rear_params = HemisphereParams {
            half: config.hemisphere.half.opposite(),
            ..config.hemisphere.clone()
        };

        let mut host = ComponentHost::new();
        host.add(Box::new(
            HemisphereScreen::new(config.hemisphere.clone(), Box::new(front_dome.clone()))
                .with_name("front_dome"),
        ));
        host.add(Box::new(
            HemisphereScreen::new(rear_params, Box::new(rear_dome.clone())).with_name("rear_dome"),
        ));
        host.add(Box::new(CurvedScreen::new(
            config.curved_screen.clone(),
            Box::new(curved_screen.clone()),
        )));
        let mut feed = CameraFeed::new(
            source,
            config.camera_feed.row_order,
            Box::new(front_dome.clone()),
            Box::new(rear_dome.clone()),
        );
        if let Some(half) = config.camera_feed.curved_screen_image {
            feed = feed.with_mirror(half, Box::new(curved_screen.clone()));
        }
        host.add(Box::new(feed));
        host.add(Box::new(SnapToAnchor::new(
            config.snap.clone(),
            locomotion.clone(),
        )));
        host.add(Box::new(HandTeleport::new(
            config.teleport.clone(),
            input.clone(),
            locomotion.clone(),
        )));
        host.add(Box::new(LocomotionDriver::new(locomotion.clone())));

        config_log!(DEBUG, "viewer scene assembled with {} components", host.len());

        ViewerScene {
            host,
            front_dome,
            rear_dome,
            curved_screen,
            input,
            locomotion,
        }
    }

    pub fn start(&mut self) {
        self.host.initialize_all();
    }

    /// Tick `frames` times with a fixed frame time.
    pub fn run(&mut self, frames: u64, frame_time: Duration) {
        for _ in 0..frames {
            self.host.tick_all(frame_time);
        }
    }

    pub fn stop(&mut self) {
        self.host.shutdown_all();
    }

    pub fn rig(&self) -> XrRig {
        *self.locomotion.borrow().rig()
    }
}
