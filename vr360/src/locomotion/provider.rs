use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use cgmath::{InnerSpace, Quaternion, Vector3};
use engine::locomotion_log;
use serde::{Deserialize, Serialize};

use super::rig::{yaw_rotation, XrRig, WORLD_UP};
use crate::time::Time;

/// How the rig's rotation is adjusted when it is moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchOrientation {
    /// Level the rig against world up and keep its heading.
    #[default]
    WorldSpaceUp,
    /// Align the rig's up with the destination's up and keep its heading.
    TargetUp,
    /// Take the destination rotation as is.
    TargetUpAndForward,
    /// Leave the rotation alone.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportRequest {
    /// Floor point the camera should end up above.
    pub destination: Vector3<f32>,
    pub destination_rotation: Quaternion<f32>,
    pub match_orientation: MatchOrientation,
}

impl TeleportRequest {
    pub fn new(
        destination: Vector3<f32>,
        destination_rotation: Quaternion<f32>,
        match_orientation: MatchOrientation,
    ) -> Self {
        TeleportRequest {
            destination,
            destination_rotation,
            match_orientation,
        }
    }
}

/// Move `rig` so its camera lands over the request's destination.
pub fn apply_teleport(rig: &mut XrRig, request: &TeleportRequest) {
    rig.rotation = match request.match_orientation {
        MatchOrientation::WorldSpaceUp => yaw_rotation(rig.yaw()),
        MatchOrientation::TargetUp => {
            let target_up = (request.destination_rotation * WORLD_UP).normalize();
            let align = Quaternion::from_arc(rig.up().normalize(), target_up, None);
            (align * rig.rotation).normalize()
        }
        MatchOrientation::TargetUpAndForward => request.destination_rotation.normalize(),
        MatchOrientation::None => rig.rotation,
    };

    rig.position = request.destination - rig.rotation * rig.floor_offset();
}

/// Moves an [`XrRig`] on request.
///
/// Providers decide when a move actually happens; a provider that is busy
/// with an earlier move may refuse a new one.
pub trait LocomotionProvider {
    /// Returns `false` when the request was refused.
    fn request_teleport(&mut self, request: TeleportRequest) -> bool;

    fn tick(&mut self, time: &Time);

    fn rig(&self) -> &XrRig;

    fn is_busy(&self) -> bool;
}

pub type SharedLocomotion = Rc<RefCell<dyn LocomotionProvider>>;

pub fn shared<P: LocomotionProvider + 'static>(provider: P) -> Rc<RefCell<P>> {
    Rc::new(RefCell::new(provider))
}

/// Writes the rig position immediately.
#[derive(Debug, Default)]
pub struct InstantLocomotion {
    rig: XrRig,
    teleports: u64,
}

impl InstantLocomotion {
    pub fn new(rig: XrRig) -> Self {
        InstantLocomotion { rig, teleports: 0 }
    }

    pub fn teleports(&self) -> u64 {
        self.teleports
    }
}

impl LocomotionProvider for InstantLocomotion {
    fn request_teleport(&mut self, request: TeleportRequest) -> bool {
        apply_teleport(&mut self.rig, &request);
        self.teleports += 1;
        locomotion_log!(DEBUG, "rig moved to {:?}", self.rig.position);
        true
    }

    fn tick(&mut self, _time: &Time) {}

    fn rig(&self) -> &XrRig {
        &self.rig
    }

    fn is_busy(&self) -> bool {
        false
    }
}

/// Holds one request and applies it after a blink delay, so a fade can
/// cover the jump.
#[derive(Debug)]
pub struct QueuedLocomotion {
    rig: XrRig,
    delay: Duration,
    pending: Option<(TeleportRequest, Duration)>,
    teleports: u64,
}

impl QueuedLocomotion {
    pub fn new(rig: XrRig, delay: Duration) -> Self {
        QueuedLocomotion {
            rig,
            delay,
            pending: None,
            teleports: 0,
        }
    }

    pub fn teleports(&self) -> u64 {
        self.teleports
    }

    pub fn pending(&self) -> Option<&TeleportRequest> {
        self.pending.as_ref().map(|(request, _)| request)
    }
}

impl LocomotionProvider for QueuedLocomotion {
    fn request_teleport(&mut self, request: TeleportRequest) -> bool {
        if self.pending.is_some() {
            locomotion_log!(DEBUG, "teleport refused, previous move still queued");
            return false;
        }
        self.pending = Some((request, Duration::ZERO));
        true
    }

    fn tick(&mut self, time: &Time) {
        let Some((request, waited)) = self.pending.as_mut() else {
            return;
        };
        *waited += time.delta;
        if *waited < self.delay {
            return;
        }

        let request = *request;
        self.pending = None;
        apply_teleport(&mut self.rig, &request);
        self.teleports += 1;
        locomotion_log!(DEBUG, "queued teleport applied at {:?}", self.rig.position);
    }

    fn rig(&self) -> &XrRig {
        &self.rig
    }

    fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}
