//! Projection parameters.
//!
//! A [`Projection`] is the single source of the projection matrix for a
//! camera or a light.

use serde::Deserialize;

use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum Projection {
    /// Vertical field of view in radians.
    Perspective {
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    },
    /// A view-space box centered on the viewing axis.
    Orthographic {
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Projection::Perspective {
            fov_y,
            aspect_ratio,
            near,
            far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::perspective(fov_y_degrees.to_radians(), aspect_ratio, near, far)
    }

    pub fn orthographic(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Projection::Orthographic {
            half_width,
            half_height,
            near,
            far,
        }
    }

    /// Horizontal field of view in radians, for perspective projections.
    pub fn fov_x(&self) -> Option<f32> {
        match *self {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
                ..
            } => Some(2.0 * (aspect_ratio * (fov_y / 2.0).tan()).atan()),
            Projection::Orthographic { .. } => None,
        }
    }

    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        match self {
            Projection::Perspective { aspect_ratio, .. } => *aspect_ratio = ratio,
            Projection::Orthographic {
                half_width,
                half_height,
                ..
            } => *half_width = *half_height * ratio,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
                near,
                far,
            } => Mat4::perspective(fov_y, aspect_ratio, near, far),
            Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            } => Mat4::orthographic(-half_width, half_width, -half_height, half_height, near, far),
        }
    }
}
