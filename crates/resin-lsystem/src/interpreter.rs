//! Symbol-to-turtle command dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{LSystem, Turtle};

/// An action bound to an L-system symbol.
#[derive(Clone)]
pub enum Command {
    /// Move forward, drawing if the pen is down.
    Forward(f64),
    /// Move forward without drawing.
    Move(f64),
    /// Turn left by the given radians.
    TurnLeft(f64),
    /// Turn right by the given radians.
    TurnRight(f64),
    /// Save the turtle pose.
    Push,
    /// Restore the last saved pose.
    Pop,
    /// Stop drawing.
    PenUp,
    /// Resume drawing.
    PenDown,
    /// Arbitrary turtle mutation.
    Custom(Arc<dyn Fn(&mut Turtle) + Send + Sync>),
}

impl Command {
    /// Wraps a closure as a command.
    pub fn custom(action: impl Fn(&mut Turtle) + Send + Sync + 'static) -> Self {
        Command::Custom(Arc::new(action))
    }

    /// Runs the command against `turtle`.
    pub fn apply(&self, turtle: &mut Turtle) {
        match self {
            Command::Forward(distance) => turtle.forward(*distance),
            Command::Move(distance) => turtle.move_forward(*distance),
            Command::TurnLeft(angle) => turtle.turn_left(*angle),
            Command::TurnRight(angle) => turtle.turn_right(*angle),
            Command::Push => turtle.push(),
            Command::Pop => turtle.pop(),
            Command::PenUp => turtle.pen_up(),
            Command::PenDown => turtle.pen_down(),
            Command::Custom(action) => action(turtle),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Forward(d) => f.debug_tuple("Forward").field(d).finish(),
            Command::Move(d) => f.debug_tuple("Move").field(d).finish(),
            Command::TurnLeft(a) => f.debug_tuple("TurnLeft").field(a).finish(),
            Command::TurnRight(a) => f.debug_tuple("TurnRight").field(a).finish(),
            Command::Push => f.write_str("Push"),
            Command::Pop => f.write_str("Pop"),
            Command::PenUp => f.write_str("PenUp"),
            Command::PenDown => f.write_str("PenDown"),
            Command::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Turn angle and step distance for the built-in commands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterpreterConfig {
    /// Rotation angle in degrees for `+` and `-`.
    pub angle: f64,
    /// Step distance for `F` and `G`.
    pub step: f64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            angle: 25.0,
            step: 1.0,
        }
    }
}

impl InterpreterConfig {
    /// Sets the rotation angle in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the step distance.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

/// Drives a [`Turtle`] across an L-system string.
///
/// Built-in bindings:
/// - `F`, `G`: move forward by the step distance, drawing
/// - `+`: turn left by the angle
/// - `-`: turn right by the angle
/// - `[`: push state
/// - `]`: pop state
///
/// Symbols without a binding are skipped. Interpreting never changes the
/// interpreter itself, only the turtle passed in.
#[derive(Debug, Clone)]
pub struct LSystemInterpreter {
    commands: HashMap<char, Command>,
    angle: f64,
    step: f64,
}

impl Default for LSystemInterpreter {
    fn default() -> Self {
        Self::from_config(&InterpreterConfig::default())
    }
}

impl LSystemInterpreter {
    /// Creates an interpreter turning `angle` degrees and stepping `step` units.
    pub fn new(angle: f64, step: f64) -> Self {
        let angle = angle.to_radians();
        let commands = HashMap::from([
            ('F', Command::Forward(step)),
            ('G', Command::Forward(step)),
            ('+', Command::TurnLeft(angle)),
            ('-', Command::TurnRight(angle)),
            ('[', Command::Push),
            (']', Command::Pop),
        ]);
        Self {
            commands,
            angle,
            step,
        }
    }

    /// Creates an interpreter from a config.
    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(config.angle, config.step)
    }

    /// Default turn angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Default step distance.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Binds `symbol` to `command`, replacing any existing binding.
    pub fn add_command(&mut self, symbol: char, command: Command) {
        tracing::trace!(%symbol, ?command, "binding turtle command");
        self.commands.insert(symbol, command);
    }

    /// Binds `symbol` to a closure.
    pub fn add_action(
        &mut self,
        symbol: char,
        action: impl Fn(&mut Turtle) + Send + Sync + 'static,
    ) {
        self.add_command(symbol, Command::custom(action));
    }

    /// Builder form of [`add_command`](Self::add_command).
    pub fn with_command(mut self, symbol: char, command: Command) -> Self {
        self.add_command(symbol, command);
        self
    }

    /// Returns the command bound to `symbol`.
    pub fn command(&self, symbol: char) -> Option<&Command> {
        self.commands.get(&symbol)
    }

    /// Runs every symbol of `input` against `turtle` and returns its full path.
    pub fn interpret<'t>(&self, input: &str, turtle: &'t mut Turtle) -> &'t [DVec2] {
        let mut symbols = 0usize;
        let mut skipped = 0usize;

        for symbol in input.chars() {
            symbols += 1;
            match self.commands.get(&symbol) {
                Some(command) => command.apply(turtle),
                None => skipped += 1,
            }
        }

        tracing::debug!(
            symbols,
            skipped,
            points = turtle.path().len(),
            "interpreted l-system string"
        );
        turtle.path()
    }

    /// Iterates `lsystem` by `generations` more passes, then interprets the result.
    ///
    /// Advances the L-system's own state, so calling this twice expands twice.
    pub fn draw<'t>(
        &self,
        lsystem: &mut LSystem,
        generations: usize,
        turtle: &'t mut Turtle,
    ) -> &'t [DVec2] {
        lsystem.iterate(generations);
        self.interpret(lsystem.as_str(), turtle)
    }
}
