//! Rig movement: teleport requests, the providers that carry them out, and
//! the anchor snap used to place the viewer in front of the screens.

pub mod provider;
pub mod rig;
pub mod snap_to_anchor;

pub use provider::{
    apply_teleport, shared, InstantLocomotion, LocomotionProvider, MatchOrientation,
    QueuedLocomotion, SharedLocomotion, TeleportRequest,
};
pub use rig::XrRig;
pub use snap_to_anchor::{SnapSettings, SnapToAnchor};

use crate::component::Component;
use crate::time::Time;

/// Ticks a shared provider so queued moves complete.
pub struct LocomotionDriver {
    locomotion: SharedLocomotion,
}

impl LocomotionDriver {
    pub fn new(locomotion: SharedLocomotion) -> Self {
        LocomotionDriver { locomotion }
    }
}

impl Component for LocomotionDriver {
    fn name(&self) -> &str {
        "locomotion"
    }

    fn tick(&mut self, time: &Time) {
        self.locomotion.borrow_mut().tick(time);
    }
}
