//! Turtle state and primitive operations for 2D interpretation.

use crate::sink::LineSink;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg};

/// A plane angle, stored in radians.
///
/// Heading `0` points along `+Y`; increasing angles rotate toward `+X`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub const fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self(self.0 * scalar)
    }
}

/// Whether forward motion draws or only relocates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenState {
    Up,
    #[default]
    Down,
}

/// The part of the turtle saved by `[` and restored by `]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the pen. Starts at the origin.
    pub position: DVec2,

    /// Current heading.
    pub heading: Angle,
}

impl TurtleState {
    /// Unit vector along the current heading: `(sin h, cos h)`.
    pub fn direction(&self) -> DVec2 {
        let (sin, cos) = self.heading.radians().sin_cos();
        DVec2::new(sin, cos)
    }
}

/// A pen-bearing agent that turns commands into [`LineSink`] calls.
///
/// Owns all of its mutable state; one turtle drives one render and is
/// then dropped.
pub struct Turtle<'a, S: LineSink + ?Sized> {
    sink: &'a mut S,
    state: TurtleState,
    pen: PenState,
    stack: Vec<TurtleState>,
    scale_depth: i32,
    depth_scale: f64,
}

impl<'a, S: LineSink + ?Sized> Turtle<'a, S> {
    /// Creates a turtle at the origin, heading `+Y`, pen down, bound to `sink`.
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            state: TurtleState::default(),
            pen: PenState::Down,
            stack: Vec::new(),
            scale_depth: 0,
            depth_scale: 1.0,
        }
    }

    pub fn set_heading(&mut self, heading: Angle) {
        self.state.heading = heading;
    }

    pub fn set_depth_scale(&mut self, scale: f64) {
        self.depth_scale = scale;
    }

    pub fn position(&self) -> DVec2 {
        self.state.position
    }

    pub fn heading(&self) -> Angle {
        self.state.heading
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    pub fn scale_depth(&self) -> i32 {
        self.scale_depth
    }

    /// Number of saved states on the branch stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Relocates the pen without drawing and without touching the heading.
    pub fn move_to(&mut self, position: DVec2) {
        self.state.position = position;
        self.sink.move_to(position);
    }

    /// Moves `distance × depth_scale^scale_depth` along the heading.
    ///
    /// Emits `line_to` with the pen down, `move_to` with the pen up.
    pub fn forward(&mut self, distance: f64) {
        let effective = distance * self.depth_scale.powi(self.scale_depth);
        let next = self.state.position + self.state.direction() * effective;
        match self.pen {
            PenState::Up => self.sink.move_to(next),
            PenState::Down => self.sink.line_to(next),
        }
        self.state.position = next;
    }

    /// Adds `angle` to the heading. The heading is never normalized.
    pub fn turn(&mut self, angle: Angle) {
        self.state.heading += angle;
    }

    pub fn pen_up(&mut self) {
        self.pen = PenState::Up;
    }

    pub fn pen_down(&mut self) {
        self.pen = PenState::Down;
    }

    pub fn save_state(&mut self) {
        self.stack.push(self.state);
    }

    /// Pops the last saved state and moves (never draws) back to it.
    ///
    /// Returns `false` and leaves the turtle untouched when the stack is empty.
    pub fn restore_state(&mut self) -> bool {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                self.sink.move_to(state.position);
                true
            }
            None => false,
        }
    }

    /// Increments the scale depth. Unclamped.
    pub fn enter_scale(&mut self) {
        self.scale_depth += 1;
    }

    /// Decrements the scale depth. May go negative.
    pub fn exit_scale(&mut self) {
        self.scale_depth -= 1;
    }
}

impl<S: LineSink + ?Sized> std::fmt::Debug for Turtle<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Turtle")
            .field("state", &self.state)
            .field("pen", &self.pen)
            .field("stack", &self.stack)
            .field("scale_depth", &self.scale_depth)
            .field("depth_scale", &self.depth_scale)
            .finish_non_exhaustive()
    }
}
