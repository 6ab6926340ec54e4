use cgmath::{vec2, vec3, InnerSpace, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Flight time used when the arc never comes back down to the floor.
const FALLBACK_FLIGHT_TIME: f32 = 10.0;
const MAX_HEIGHT_CHANGE: f32 = 2.0;
const MIN_TELEPORT_DISTANCE: f32 = 1.0;

/// Floor rectangle (on X/Z) that teleports may land in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleportArea {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

impl TeleportArea {
    pub fn new(min: Vector2<f32>, max: Vector2<f32>) -> Self {
        TeleportArea { min, max }
    }

    pub fn contains(&self, point: Vector3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.y
            && point.z <= self.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub initial_velocity: f32,
    pub gravity: f32,
    pub max_distance: f32,
    pub segments: usize,
    pub floor_height: f32,
}

impl Default for ArcParams {
    fn default() -> Self {
        ArcParams {
            initial_velocity: 10.0,
            gravity: 9.8,
            max_distance: 20.0,
            segments: 20,
            floor_height: 0.0,
        }
    }
}

/// Parabolic pointer arc from a controller to the floor.
#[derive(Clone, Debug)]
pub struct ArcTrajectory {
    pub points: Vec<Vector3<f32>>,
    pub landing_position: Option<Vector3<f32>>,
    pub is_valid: bool,
}

impl ArcTrajectory {
    pub fn calculate(
        start: Vector3<f32>,
        direction: Vector3<f32>,
        params: &ArcParams,
        area: Option<&TeleportArea>,
    ) -> Self {
        let segments = params.segments.max(1);
        let velocity = direction.normalize() * params.initial_velocity;
        let floor_time =
            flight_time_to_floor(velocity, params.gravity, start.y - params.floor_height);
        let step = floor_time.unwrap_or(FALLBACK_FLIGHT_TIME) / segments as f32;

        let mut points = Vec::with_capacity(segments + 1);
        let mut landing_position = None;

        for i in 0..=segments {
            let t = i as f32 * step;
            let position = start + velocity * t - vec3(0.0, 0.5 * params.gravity * t * t, 0.0);

            // The last sample is taken at the floor-crossing time; rounding
            // may leave it a hair above the floor.
            let at_floor_time = i == segments && floor_time.is_some();
            if position.y <= params.floor_height || at_floor_time {
                let landed = vec3(position.x, params.floor_height, position.z);
                if (landed - start).magnitude() <= params.max_distance {
                    points.push(landed);
                    landing_position = Some(landed);
                }
                break;
            }

            if (position - start).magnitude() > params.max_distance {
                break;
            }
            points.push(position);
        }

        let is_valid = landing_position
            .map(|landing| is_valid_landing(landing, start, area))
            .unwrap_or(false);

        ArcTrajectory {
            points,
            landing_position,
            is_valid,
        }
    }

    pub fn arc_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).magnitude())
            .sum()
    }

    /// Point at `t` in `[0, 1]` along the sampled arc, linearly interpolated.
    pub fn point_at(&self, t: f32) -> Option<Vector3<f32>> {
        let last = self.points.len().checked_sub(1)?;
        let scaled = t.clamp(0.0, 1.0) * last as f32;
        let index = (scaled as usize).min(last);
        if index == last {
            return Some(self.points[last]);
        }
        let local = scaled - index as f32;
        let (p1, p2) = (self.points[index], self.points[index + 1]);
        Some(p1 + (p2 - p1) * local)
    }
}

/// Positive root of `height + v_y t - g t^2 / 2 = 0`.
fn flight_time_to_floor(velocity: Vector3<f32>, gravity: f32, height: f32) -> Option<f32> {
    if gravity <= 0.0 {
        return None;
    }
    let a = 0.5 * gravity;
    let b = -velocity.y;
    let c = -height;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = (-b + discriminant.sqrt()) / (2.0 * a);
    (root > 0.0).then_some(root)
}

fn is_valid_landing(
    landing: Vector3<f32>,
    start: Vector3<f32>,
    area: Option<&TeleportArea>,
) -> bool {
    if !(landing.x.is_finite() && landing.y.is_finite() && landing.z.is_finite()) {
        return false;
    }
    if (landing.y - start.y).abs() > MAX_HEIGHT_CHANGE {
        return false;
    }
    let horizontal = vec2(landing.x - start.x, landing.z - start.z).magnitude();
    if horizontal < MIN_TELEPORT_DISTANCE {
        return false;
    }
    area.is_none_or(|area| area.contains(landing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_lands_forward() {
        let start = vec3(0.0, 2.0, 0.0);
        let trajectory =
            ArcTrajectory::calculate(start, vec3(0.0, 0.5, 1.0), &ArcParams::default(), None);

        let landing = trajectory.landing_position.unwrap();
        assert!(trajectory.is_valid);
        assert_eq!(landing.y, 0.0);
        assert!(landing.z > 1.0);
        assert_eq!(trajectory.points.last(), Some(&landing));
    }

    #[test]
    fn test_straight_down_is_too_close() {
        let params = ArcParams {
            initial_velocity: 1.0,
            ..Default::default()
        };
        let trajectory =
            ArcTrajectory::calculate(vec3(0.0, 1.0, 0.0), vec3(0.0, -1.0, 0.0), &params, None);
        assert!(trajectory.landing_position.is_some());
        assert!(!trajectory.is_valid);
    }

    #[test]
    fn test_max_distance_cuts_arc() {
        let start = vec3(0.0, 1.0, 0.0);
        let params = ArcParams {
            initial_velocity: 50.0,
            max_distance: 5.0,
            ..Default::default()
        };
        let trajectory = ArcTrajectory::calculate(start, vec3(1.0, 0.0, 0.0), &params, None);
        assert!(trajectory.landing_position.is_none());
        assert!(!trajectory.is_valid);
        assert!(trajectory
            .points
            .iter()
            .all(|p| (p - start).magnitude() <= 5.0));
    }

    #[test]
    fn test_area_rejects_outside_landing() {
        let start = vec3(0.0, 1.5, 0.0);
        let direction = vec3(0.0, 0.3, 1.0);
        let params = ArcParams::default();

        let inside = TeleportArea::new(vec2(-50.0, -50.0), vec2(50.0, 50.0));
        let outside = TeleportArea::new(vec2(-1.0, -1.0), vec2(1.0, 1.0));

        assert!(ArcTrajectory::calculate(start, direction, &params, Some(&inside)).is_valid);
        assert!(!ArcTrajectory::calculate(start, direction, &params, Some(&outside)).is_valid);
    }

    #[test]
    fn test_arc_length_and_interpolation() {
        let start = vec3(0.0, 2.0, 0.0);
        let params = ArcParams {
            segments: 10,
            ..Default::default()
        };
        let trajectory = ArcTrajectory::calculate(start, vec3(1.0, 0.0, 0.0), &params, None);

        let length = trajectory.arc_length();
        assert!(length > 0.0 && length < 50.0);
        assert_eq!(trajectory.point_at(0.0), Some(start));
        assert_eq!(trajectory.point_at(1.0), trajectory.points.last().copied());
        assert!(trajectory.point_at(0.5).is_some());

        let empty = ArcTrajectory {
            points: Vec::new(),
            landing_position: None,
            is_valid: false,
        };
        assert_eq!(empty.point_at(0.5), None);
        assert_eq!(empty.arc_length(), 0.0);
    }
}
