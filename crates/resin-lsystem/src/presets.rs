//! Preset L-systems for common patterns.
//!
//! The suggested turn angle for each preset is given in its docs; pass it to
//! [`LSystemInterpreter::new`](crate::LSystemInterpreter::new).

use crate::{LSystem, Rule};

/// Lindenmayer's algae model. Not meant for drawing.
pub fn algae() -> LSystem {
    LSystem::new("A", [Rule::new('A', "AB"), Rule::new('B', "A")])
}

/// Koch curve (90°).
pub fn koch_curve() -> LSystem {
    LSystem::new("F", [Rule::new('F', "F+F-F-F+F")])
}

/// Koch snowflake (60°).
pub fn koch_snowflake() -> LSystem {
    LSystem::new("F--F--F", [Rule::new('F', "F+F--F+F")])
}

/// Sierpinski triangle (120°).
pub fn sierpinski_triangle() -> LSystem {
    LSystem::new(
        "F-G-G",
        [Rule::new('F', "F-G+F+G-F"), Rule::new('G', "GG")],
    )
}

/// Dragon curve (90°).
pub fn dragon_curve() -> LSystem {
    LSystem::new("F", [Rule::new('F', "F+G"), Rule::new('G', "F-G")])
}

/// Hilbert curve (90°).
pub fn hilbert_curve() -> LSystem {
    LSystem::new(
        "A",
        [
            Rule::new('A', "-BF+AFA+FB-"),
            Rule::new('B', "+AF-BFB-FA+"),
        ],
    )
}

/// Simple tree (25°).
pub fn simple_tree() -> LSystem {
    LSystem::new("X", [Rule::new('X', "F[+X][-X]FX"), Rule::new('F', "FF")])
}

/// Binary tree (45°).
pub fn binary_tree() -> LSystem {
    LSystem::new("X", [Rule::new('X', "F[+X]F[-X]+X"), Rule::new('F', "FF")])
}

/// Fractal plant (25°).
pub fn fractal_plant() -> LSystem {
    LSystem::new(
        "X",
        [Rule::new('X', "F+[[X]-X]-F[-FX]+X"), Rule::new('F', "FF")],
    )
}
