use cgmath::Vector3;
use engine::locomotion_log;
use serde::{Deserialize, Serialize};

use super::trajectory::{ArcParams, ArcTrajectory, TeleportArea};
use crate::input_context::{Hand, InputContext};
use crate::locomotion::rig::{yaw_of, yaw_rotation};
use crate::locomotion::{MatchOrientation, TeleportRequest};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    pub enabled: bool,
    pub max_distance: f32,
    pub arc_velocity: f32,
    pub arc_gravity: f32,
    pub arc_segments: usize,
    pub floor_height: f32,
    pub button_mapping: TeleportButton,
    pub trigger_threshold: f32,
    pub match_orientation: MatchOrientation,
    pub area: Option<TeleportArea>,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            max_distance: 20.0,
            arc_velocity: 10.0,
            arc_gravity: 9.8,
            arc_segments: 30,
            floor_height: 0.0,
            button_mapping: TeleportButton::Trigger,
            trigger_threshold: 0.5,
            match_orientation: MatchOrientation::WorldSpaceUp,
            area: None,
        }
    }
}

impl TeleportConfig {
    fn arc_params(&self) -> ArcParams {
        ArcParams {
            initial_velocity: self.arc_velocity,
            gravity: self.arc_gravity,
            max_distance: self.max_distance,
            segments: self.arc_segments,
            floor_height: self.floor_height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportButton {
    Trigger,
    AButton,
    Squeeze,
}

#[derive(Clone, Debug, Default)]
pub struct TeleportHandState {
    pub is_active: bool,
    pub was_button_pressed: bool,
    pub target_position: Option<Vector3<f32>>,
    pub is_valid_target: bool,
    pub current_trajectory: Option<ArcTrajectory>,
}

impl TeleportHandState {
    fn clear_target(&mut self) {
        self.target_position = None;
        self.is_valid_target = false;
        self.current_trajectory = None;
    }
}

/// Point-and-release teleport for both controllers.
///
/// Pressing the mapped button starts aiming, holding it traces an arc every
/// frame, and releasing it over a valid landing spot produces a
/// [`TeleportRequest`].
pub struct TeleportSystem {
    config: TeleportConfig,
    left_hand_state: TeleportHandState,
    right_hand_state: TeleportHandState,
}

impl TeleportSystem {
    pub fn new(config: TeleportConfig) -> Self {
        TeleportSystem {
            config,
            left_hand_state: TeleportHandState::default(),
            right_hand_state: TeleportHandState::default(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(TeleportConfig::default())
    }

    /// Advance both hands. When both release over valid targets on the
    /// same frame, the left hand wins.
    pub fn update(&mut self, input_context: &InputContext) -> Option<TeleportRequest> {
        if !self.config.enabled {
            return None;
        }

        let left = Self::update_hand(
            &self.config,
            &input_context.left_hand,
            &mut self.left_hand_state,
        );
        let right = Self::update_hand(
            &self.config,
            &input_context.right_hand,
            &mut self.right_hand_state,
        );
        left.or(right)
    }

    fn update_hand(
        config: &TeleportConfig,
        hand: &Hand,
        hand_state: &mut TeleportHandState,
    ) -> Option<TeleportRequest> {
        let button_value = match config.button_mapping {
            TeleportButton::Trigger => hand.trigger_value,
            TeleportButton::AButton => hand.a_value,
            TeleportButton::Squeeze => hand.squeeze_value,
        };

        let is_button_pressed = button_value >= config.trigger_threshold;
        let just_pressed = is_button_pressed && !hand_state.was_button_pressed;
        let just_released = !is_button_pressed && hand_state.was_button_pressed;
        hand_state.was_button_pressed = is_button_pressed;

        if just_pressed {
            hand_state.is_active = true;
            hand_state.clear_target();
        }

        if just_released && hand_state.is_active {
            hand_state.is_active = false;
            let request = match hand_state.target_position {
                Some(target) if hand_state.is_valid_target => {
                    // Face the direction of travel.
                    let heading = yaw_of(target - hand.position);
                    Some(TeleportRequest::new(
                        target,
                        yaw_rotation(heading),
                        config.match_orientation,
                    ))
                }
                _ => None,
            };
            hand_state.clear_target();
            if let Some(request) = &request {
                locomotion_log!(DEBUG, "teleport released at {:?}", request.destination);
            }
            return request;
        }

        if hand_state.is_active && is_button_pressed {
            let trajectory = ArcTrajectory::calculate(
                hand.position,
                hand.pointing_direction(),
                &config.arc_params(),
                config.area.as_ref(),
            );
            hand_state.target_position = trajectory.landing_position;
            hand_state.is_valid_target = trajectory.is_valid;
            hand_state.current_trajectory = Some(trajectory);
        }

        None
    }

    pub fn get_left_hand_state(&self) -> &TeleportHandState {
        &self.left_hand_state
    }

    pub fn get_right_hand_state(&self) -> &TeleportHandState {
        &self.right_hand_state
    }

    pub fn get_config(&self) -> &TeleportConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TeleportConfig) {
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec2, vec3, Deg, Quaternion, Rotation3};

    fn aiming_hand(trigger: f32) -> Hand {
        Hand {
            position: vec3(0.0, 1.2, 0.0),
            // Pitch the controller up so the arc travels forward.
            rotation: Quaternion::from_angle_x(Deg(-20.0)),
            trigger_value: trigger,
            ..Default::default()
        }
    }

    fn input(left: Hand) -> InputContext {
        InputContext {
            left_hand: left,
            right_hand: Hand::default(),
        }
    }

    #[test]
    fn test_press_hold_release_teleports() {
        let mut system = TeleportSystem::with_default_config();

        assert_eq!(system.update(&input(aiming_hand(1.0))), None);
        assert!(system.get_left_hand_state().is_active);
        assert!(system.get_left_hand_state().is_valid_target);
        let target = system.get_left_hand_state().target_position.unwrap();
        assert!(target.z > 1.0);

        let request = system.update(&input(aiming_hand(0.0))).unwrap();
        assert_eq!(request.destination, target);
        assert_eq!(request.match_orientation, MatchOrientation::WorldSpaceUp);
        assert!(!system.get_left_hand_state().is_active);
        assert!(system.get_left_hand_state().current_trajectory.is_none());
    }

    #[test]
    fn test_release_without_valid_target_does_nothing() {
        let mut system = TeleportSystem::new(TeleportConfig {
            area: Some(TeleportArea::new(vec2(-0.5, -0.5), vec2(0.5, 0.5))),
            ..Default::default()
        });

        system.update(&input(aiming_hand(1.0)));
        assert!(!system.get_left_hand_state().is_valid_target);
        assert_eq!(system.update(&input(aiming_hand(0.0))), None);
    }

    #[test]
    fn test_threshold_and_mapping() {
        let mut system = TeleportSystem::new(TeleportConfig {
            button_mapping: TeleportButton::Squeeze,
            ..Default::default()
        });

        system.update(&input(aiming_hand(1.0)));
        assert!(!system.get_left_hand_state().is_active);

        let squeezing = Hand {
            squeeze_value: 0.6,
            ..aiming_hand(0.0)
        };
        system.update(&input(squeezing));
        assert!(system.get_left_hand_state().is_active);
    }

    #[test]
    fn test_disabled_system_ignores_input() {
        let mut system = TeleportSystem::new(TeleportConfig {
            enabled: false,
            ..Default::default()
        });
        system.update(&input(aiming_hand(1.0)));
        assert_eq!(system.update(&input(aiming_hand(0.0))), None);
        assert!(!system.get_left_hand_state().is_active);
    }
}
