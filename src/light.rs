//! Light sources.

use serde::Deserialize;

use crate::math::Vec3;

/// Strength of a point light created with [`Light::point`].
pub const POINT_LIGHT_INTENSITY: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum Light {
    /// Parallel rays traveling along `direction` (not toward the light).
    Directional { direction: Vec3 },
    /// Radiates from `position`, falling off as `intensity / distance²`.
    Point { position: Vec3, intensity: f32 },
}

impl Light {
    pub fn directional(direction: Vec3) -> Self {
        Light::Directional {
            direction: direction.normalize(),
        }
    }

    pub fn point(position: Vec3) -> Self {
        Light::Point {
            position,
            intensity: POINT_LIGHT_INTENSITY,
        }
    }

    /// Unit vector from `p` toward the light, and the attenuation at `p`.
    pub fn incidence(&self, p: Vec3) -> (Vec3, f32) {
        match *self {
            Light::Directional { direction } => (-direction.normalize(), 1.0),
            Light::Point {
                position,
                intensity,
            } => {
                let to_light = position - p;
                let distance_sq = to_light.magnitude_squared().max(f32::EPSILON);
                (to_light.normalize(), intensity / distance_sq)
            }
        }
    }

    /// Attenuated Lambert term for a surface at `p` with unit normal `normal`.
    pub fn diffuse(&self, p: Vec3, normal: Vec3) -> f32 {
        let (l, attenuation) = self.incidence(p);
        normal.dot(l).max(0.0) * attenuation
    }
}
