//! Turtle state and operations for plant interpretation.

use crate::lsystem::LSystemConfig;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The state of the plant-drawing turtle.
///
/// Tracks the cursor position, an explicit orthonormal frame
/// (direction/up/right, right-handed), and the current segment dimensions.
/// Exactly one state is current at a time; branch symbols deep-copy it onto
/// an owned stack and pop-replace it, never alias it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantTurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Growth direction. Starts at `+Y`.
    pub direction: Vec3,

    /// Frame up vector. Starts at `+Z`.
    pub up: Vec3,

    /// Frame right vector. Starts at `+X`.
    pub right: Vec3,

    /// Length of the next forward segment. Decays geometrically per move.
    pub length: f32,

    /// Radius of the next forward segment. Decays geometrically per move.
    pub thickness: f32,
}

impl PlantTurtleState {
    /// Creates the initial state for a string interpretation: origin, frame
    /// aligned to the world axes, dimensions taken from `config`.
    pub fn new(config: &LSystemConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::Y,
            up: Vec3::Z,
            right: Vec3::X,
            length: config.length,
            thickness: config.thickness,
        }
    }

    /// Rotates the whole frame about `axis` by `angle` radians.
    ///
    /// Repeated rotations accumulate floating-point drift, so after rotating,
    /// `right` and `up` are rebuilt from cross products to hold the frame
    /// exactly orthonormal.
    pub fn rotate_about(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis.normalize(), angle);
        self.direction = (rot * self.direction).normalize();
        self.up = (rot * self.up).normalize();
        self.right = (rot * self.right).normalize();

        self.right = self.direction.cross(self.up).normalize();
        self.up = self.right.cross(self.direction).normalize();
    }

    /// Rotates the frame about its own up vector (`+`/`-`).
    pub fn yaw(&mut self, angle: f32) {
        self.rotate_about(self.up, angle);
    }

    /// Rotates the frame about its own right vector (`&`/`^`).
    pub fn pitch(&mut self, angle: f32) {
        self.rotate_about(self.right, angle);
    }

    /// Rotates the frame about its own direction vector (`\` / `/`).
    pub fn roll(&mut self, angle: f32) {
        self.rotate_about(self.direction, angle);
    }
}

/// Operations that can be performed by the plant turtle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlantOp {
    /// Draw a branch segment, advance, and decay length/thickness (`F`, `A`).
    Forward,
    /// Emit a leaf polygon at the current position (`L`).
    Leaf,
    /// Rotate about the frame's up vector (`+`/`-`).
    Yaw(f32),
    /// Rotate about the frame's right vector (`&`/`^`).
    Pitch(f32),
    /// Rotate about the frame's direction vector (`\` / `/`).
    Roll(f32),
    /// Save the full turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op — symbol has no registered meaning.
    Ignore,
}
