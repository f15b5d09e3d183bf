//! Direct recursive fractal generators.
//!
//! These produce the same shapes an L-system would, without building the
//! intermediate string. Both work from an explicit stack or level loop, so
//! `depth` only bounds output size, never call depth. It is still the
//! caller's job to keep `depth` small: output grows exponentially.

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

/// Returns a closed Koch snowflake polyline (first point repeated at the end).
///
/// The base triangle is inscribed in a circle of `radius` around `center`
/// with one vertex straight up in y-up coordinates. Depth 0 is the triangle;
/// each level replaces every edge with four. The result has
/// `3 * 4^depth + 1` points.
pub fn koch_snowflake(center: DVec2, radius: f64, depth: u32) -> Vec<DVec2> {
    // Counter-clockwise, so the outward side of each edge is to its right.
    let mut points: Vec<DVec2> = (0..=3)
        .map(|i| {
            let angle = FRAC_PI_2 + TAU * (i % 3) as f64 / 3.0;
            center + DVec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect();

    let outward = DVec2::from_angle(-FRAC_PI_3);
    for _ in 0..depth {
        let mut next = Vec::with_capacity((points.len() - 1) * 4 + 1);
        for edge in points.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            let third = (b - a) / 3.0;
            let p1 = a + third;
            next.push(a);
            next.push(p1);
            next.push(p1 + outward.rotate(third));
            next.push(a + third * 2.0);
        }
        next.push(points[points.len() - 1]);
        points = next;
    }

    points
}

/// Parameters for [`fractal_tree`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeParams {
    /// Base of the trunk.
    pub root: DVec2,
    /// Trunk heading in radians.
    pub angle: f64,
    /// Trunk length.
    pub length: f64,
    /// Number of branch levels, trunk included.
    pub depth: u32,
    /// Angle between a branch and its parent, in radians.
    pub branch_angle: f64,
    /// Child length relative to parent.
    pub ratio: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            root: DVec2::ZERO,
            angle: -FRAC_PI_2,
            length: 100.0,
            depth: 8,
            branch_angle: 25f64.to_radians(),
            ratio: 0.7,
        }
    }
}

/// Returns a binary branching tree as a pairs-of-points path.
///
/// Every branch splits into two children turned by `±branch_angle`, giving
/// `2^depth - 1` segments. The default heads up the screen (y-down).
pub fn fractal_tree(params: &TreeParams) -> Vec<DVec2> {
    let mut path = Vec::new();
    let mut stack = Vec::new();
    if params.depth > 0 {
        stack.push((params.root, params.angle, params.length, params.depth));
    }

    while let Some((start, angle, length, remaining)) = stack.pop() {
        let end = start + DVec2::new(angle.cos(), angle.sin()) * length;
        path.push(start);
        path.push(end);

        if remaining > 1 {
            let child = length * params.ratio;
            stack.push((end, angle + params.branch_angle, child, remaining - 1));
            stack.push((end, angle - params.branch_angle, child, remaining - 1));
        }
    }

    path
}
