use cgmath::{vec3, InnerSpace, One, Quaternion, Rad, Rotation3, Vector3};

pub const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
pub const WORLD_FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// Tracking-space origin of the headset, standing on the floor.
///
/// `camera_offset` is where the tracked head currently is relative to the
/// origin, in rig space. +Z is forward and +Y is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrRig {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub camera_offset: Vector3<f32>,
}

impl Default for XrRig {
    fn default() -> Self {
        XrRig {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            camera_offset: vec3(0.0, 1.6, 0.0),
        }
    }
}

impl XrRig {
    pub fn new(position: Vector3<f32>) -> Self {
        XrRig {
            position,
            ..Default::default()
        }
    }

    pub fn with_camera_offset(mut self, camera_offset: Vector3<f32>) -> Self {
        self.camera_offset = camera_offset;
        self
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rotation * WORLD_UP
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * WORLD_FORWARD
    }

    pub fn camera_world_position(&self) -> Vector3<f32> {
        self.position + self.rotation * self.camera_offset
    }

    /// The camera position dropped onto the rig's floor plane.
    pub fn camera_floor_position(&self) -> Vector3<f32> {
        self.position + self.rotation * self.floor_offset()
    }

    pub fn floor_offset(&self) -> Vector3<f32> {
        vec3(self.camera_offset.x, 0.0, self.camera_offset.z)
    }

    /// Heading around world up, zero when facing +Z.
    pub fn yaw(&self) -> Rad<f32> {
        yaw_of(self.forward())
    }
}

pub fn yaw_of(direction: Vector3<f32>) -> Rad<f32> {
    let flat = vec3(direction.x, 0.0, direction.z);
    if flat.magnitude2() < 1e-8 {
        return Rad(0.0);
    }
    Rad(flat.x.atan2(flat.z))
}

pub fn yaw_rotation(yaw: Rad<f32>) -> Quaternion<f32> {
    Quaternion::from_angle_y(yaw)
}
