use cgmath::{vec3, One, Quaternion, Vector3};

/// Tracked controller state for one frame. Controllers point along their
/// local +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub trigger_value: f32,
    pub squeeze_value: f32,
    pub a_value: f32,
}

impl Default for Hand {
    fn default() -> Self {
        Hand {
            position: vec3(0.0, 1.0, 0.0),
            rotation: Quaternion::one(),
            trigger_value: 0.0,
            squeeze_value: 0.0,
            a_value: 0.0,
        }
    }
}

impl Hand {
    pub fn pointing_direction(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputContext {
    pub left_hand: Hand,
    pub right_hand: Hand,
}
