//! The line-drawing interface the turtle emits into.
//!
//! Any renderer (rasterizer, vector path builder, PDF writer, test
//! recorder) implements just [`LineSink::move_to`] and
//! [`LineSink::line_to`]. The engine holds no other contract with it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Consumer of turtle motion.
pub trait LineSink {
    /// Relocate the current point without drawing.
    fn move_to(&mut self, point: DVec2);

    /// Draw a segment from the current point to `point`.
    fn line_to(&mut self, point: DVec2);
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn move_to(&mut self, point: DVec2) {
        (**self).move_to(point);
    }

    fn line_to(&mut self, point: DVec2) {
        (**self).line_to(point);
    }
}

/// One recorded sink call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
}

impl PathCommand {
    pub fn point(self) -> DVec2 {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
        }
    }
}

impl LineSink for Vec<PathCommand> {
    fn move_to(&mut self, point: DVec2) {
        self.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.push(PathCommand::LineTo(point));
    }
}

/// A sink that records every call and tracks the extent of the drawing.
///
/// Hosts use [`bounds`](Self::bounds) to fit the finished path to a canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRecorder {
    commands: Vec<PathCommand>,
    segments: usize,
    min: Option<DVec2>,
    max: Option<DVec2>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, in emission order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }

    /// Number of `line_to` calls received.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Axis-aligned `(min, max)` corners of all points received, if any.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.min.zip(self.max)
    }

    fn include(&mut self, point: DVec2) {
        self.min = Some(self.min.map_or(point, |m| m.min(point)));
        self.max = Some(self.max.map_or(point, |m| m.max(point)));
    }
}

impl LineSink for PathRecorder {
    fn move_to(&mut self, point: DVec2) {
        self.include(point);
        self.commands.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.include(point);
        self.segments += 1;
        self.commands.push(PathCommand::LineTo(point));
    }
}
