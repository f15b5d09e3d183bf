//! 2D turtle graphics.

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Saved turtle pose.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurtleState {
    /// Position.
    pub position: DVec2,
    /// Heading in radians.
    pub angle: f64,
}

/// A 2D drawing cursor with a pose stack.
///
/// Angles increase clockwise in y-down screen coordinates: `turn_right`
/// adds to the heading and `turn_left` subtracts.
///
/// The path is a flat list of point pairs. Each drawing [`forward`](Turtle::forward)
/// appends its own start and end point, even when it continues the previous
/// segment. Use [`path_to_polylines`] to join contiguous segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Turtle {
    position: DVec2,
    angle: f64,
    pen_down: bool,
    stack: Vec<TurtleState>,
    path: Vec<DVec2>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Turtle {
    /// Creates a turtle at `(x, y)` heading `angle` radians, pen down.
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self::at(DVec2::new(x, y), angle)
    }

    /// Creates a turtle at `position` heading `angle` radians, pen down.
    pub fn at(position: DVec2, angle: f64) -> Self {
        Self {
            position,
            angle,
            pen_down: true,
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Current position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Current heading in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current pose.
    pub fn state(&self) -> TurtleState {
        TurtleState {
            position: self.position,
            angle: self.angle,
        }
    }

    /// Moves the turtle without drawing.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Sets the heading in radians.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Moves `distance` along the heading, recording a segment if the pen is down.
    pub fn forward(&mut self, distance: f64) {
        let next = self.step(distance);
        if self.pen_down {
            self.path.push(self.position);
            self.path.push(next);
        }
        self.position = next;
    }

    /// Moves `distance` along the heading without drawing, whatever the pen state.
    pub fn move_forward(&mut self, distance: f64) {
        self.position = self.step(distance);
    }

    fn step(&self, distance: f64) -> DVec2 {
        self.position + DVec2::new(self.angle.cos(), self.angle.sin()) * distance
    }

    /// Adds `delta` radians to the heading.
    pub fn turn(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Subtracts `delta` radians from the heading.
    pub fn turn_left(&mut self, delta: f64) {
        self.angle -= delta;
    }

    /// Adds `delta` radians to the heading.
    pub fn turn_right(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Saves the current pose.
    pub fn push(&mut self) {
        self.stack.push(self.state());
    }

    /// Restores the most recently saved pose. Does nothing if none is saved.
    pub fn pop(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.position = saved.position;
            self.angle = saved.angle;
        }
    }

    /// Stops recording segments.
    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    /// Resumes recording segments.
    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    /// Returns true if `forward` records segments.
    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Number of saved poses.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Clears the path and stack, moves to the given pose and lowers the pen.
    pub fn reset(&mut self, x: f64, y: f64, angle: f64) {
        self.path.clear();
        self.stack.clear();
        self.position = DVec2::new(x, y);
        self.angle = angle;
        self.pen_down = true;
    }

    /// The recorded path as consecutive `(start, end)` point pairs.
    pub fn path(&self) -> &[DVec2] {
        &self.path
    }

    /// Takes the recorded path, leaving it empty.
    pub fn take_path(&mut self) -> Vec<DVec2> {
        std::mem::take(&mut self.path)
    }

    /// Iterates over recorded segments.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.path.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Joins a pairs-of-points path into polylines.
///
/// Segments whose start meets the previous segment's end extend the current
/// polyline; any gap starts a new one.
pub fn path_to_polylines(path: &[DVec2]) -> Vec<Vec<DVec2>> {
    let mut polylines = Vec::new();
    let mut current: Vec<DVec2> = Vec::new();

    for pair in path.chunks_exact(2) {
        let (start, end) = (pair[0], pair[1]);
        match current.last() {
            Some(last) if last.distance(start) < 1e-9 => current.push(end),
            _ => {
                if !current.is_empty() {
                    polylines.push(std::mem::take(&mut current));
                }
                current.push(start);
                current.push(end);
            }
        }
    }

    if !current.is_empty() {
        polylines.push(current);
    }

    polylines
}
