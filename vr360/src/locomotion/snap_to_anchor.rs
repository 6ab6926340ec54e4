use cgmath::{vec3, Deg, Quaternion, Rotation3, Vector3};
use engine::locomotion_log;
use serde::{Deserialize, Serialize};

use super::{MatchOrientation, SharedLocomotion, TeleportRequest};
use crate::component::Component;
use crate::time::Time;

/// Where the viewer should stand relative to the screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    pub anchor_position: Vector3<f32>,
    pub anchor_yaw_degrees: f32,
    pub match_orientation: MatchOrientation,
    pub snap_on_start: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        SnapSettings {
            anchor_position: vec3(0.0, 0.0, 0.0),
            anchor_yaw_degrees: 0.0,
            match_orientation: MatchOrientation::TargetUpAndForward,
            snap_on_start: true,
        }
    }
}

impl SnapSettings {
    pub fn anchor_rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_y(Deg(self.anchor_yaw_degrees))
    }

    pub fn request(&self) -> TeleportRequest {
        TeleportRequest::new(
            self.anchor_position,
            self.anchor_rotation(),
            self.match_orientation,
        )
    }
}

/// Puts the viewer at a fixed anchor: once at start, whenever the anchor
/// moves, and whenever [`SnapToAnchor::snap_now`] is called (a recentre
/// button, for instance).
pub struct SnapToAnchor {
    settings: SnapSettings,
    locomotion: SharedLocomotion,
    pending: bool,
    snaps: u64,
}

impl SnapToAnchor {
    pub fn new(settings: SnapSettings, locomotion: SharedLocomotion) -> Self {
        SnapToAnchor {
            settings,
            locomotion,
            pending: false,
            snaps: 0,
        }
    }

    pub fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SnapSettings {
        &mut self.settings
    }

    pub fn snaps(&self) -> u64 {
        self.snaps
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn snap_now(&mut self) {
        self.pending = true;
        self.submit();
    }

    fn submit(&mut self) {
        let accepted = self
            .locomotion
            .borrow_mut()
            .request_teleport(self.settings.request());
        if accepted {
            self.pending = false;
            self.snaps += 1;
            locomotion_log!(
                INFO,
                "snapped to anchor {:?} yaw {}",
                self.settings.anchor_position,
                self.settings.anchor_yaw_degrees
            );
        } else {
            locomotion_log!(DEBUG, "snap deferred, locomotion busy");
        }
    }
}

impl Component for SnapToAnchor {
    fn name(&self) -> &str {
        "snap_to_anchor"
    }

    fn initialize(&mut self) {
        if self.settings.snap_on_start {
            self.snap_now();
        }
    }

    fn tick(&mut self, _time: &Time) {
        if self.pending {
            self.submit();
        }
    }

    fn on_parameters_changed(&mut self) {
        self.snap_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::{shared, InstantLocomotion, LocomotionProvider, QueuedLocomotion, XrRig};
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn settings() -> SnapSettings {
        SnapSettings {
            anchor_position: vec3(0.0, 0.0, -1.0),
            anchor_yaw_degrees: 180.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_snaps_on_initialize() {
        let provider = shared(InstantLocomotion::new(XrRig::default()));
        let mut snap = SnapToAnchor::new(settings(), provider.clone());

        snap.initialize();
        assert_eq!(snap.snaps(), 1);

        let rig = *provider.borrow().rig();
        let floor = rig.camera_floor_position();
        assert_relative_eq!(floor.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(rig.forward().z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_snap_on_start_can_be_disabled() {
        let provider = shared(InstantLocomotion::new(XrRig::default()));
        let mut snap = SnapToAnchor::new(
            SnapSettings {
                snap_on_start: false,
                ..settings()
            },
            provider.clone(),
        );
        snap.initialize();
        assert_eq!(provider.borrow().teleports(), 0);

        snap.snap_now();
        assert_eq!(provider.borrow().teleports(), 1);
    }

    #[test]
    fn test_busy_provider_is_retried() {
        let provider = shared(QueuedLocomotion::new(
            XrRig::default(),
            Duration::from_millis(50),
        ));
        let mut snap = SnapToAnchor::new(settings(), provider.clone());
        snap.initialize();

        snap.settings_mut().anchor_position = vec3(3.0, 0.0, 3.0);
        snap.on_parameters_changed();
        assert!(snap.is_pending());

        let mut time = Time::new();
        time.advance(Duration::from_millis(60));
        provider.borrow_mut().tick(&time);
        snap.tick(&time);
        assert!(!snap.is_pending());
        assert_eq!(snap.snaps(), 2);

        time.advance(Duration::from_millis(60));
        provider.borrow_mut().tick(&time);
        let floor = provider.borrow().rig().camera_floor_position();
        assert_relative_eq!(floor.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(floor.z, 3.0, epsilon = 1e-5);
    }
}
