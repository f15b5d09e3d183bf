//! L-systems (Lindenmayer systems) for procedural generation.
//!
//! L-systems are parallel string rewriting systems that can generate
//! fractal-like structures, plant models, and other procedural content.
//! The expanded string is turned into geometry by driving a [`Turtle`]
//! with an [`LSystemInterpreter`].
//!
//! # Example
//!
//! ```
//! use rhizome_resin_lsystem::{LSystem, LSystemInterpreter, Rule, Turtle};
//!
//! // Koch curve
//! let mut lsystem = LSystem::new("F", [Rule::new('F', "F+F-F-F+F")]);
//!
//! let interpreter = LSystemInterpreter::new(90.0, 10.0);
//! let mut turtle = Turtle::new(0.0, 0.0, 0.0);
//! let path = interpreter.draw(&mut lsystem, 1, &mut turtle);
//!
//! // Five forward moves, two points each.
//! assert_eq!(path.len(), 10);
//! ```

use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod fractals;
mod interpreter;
pub mod presets;
mod turtle;

pub use interpreter::{Command, InterpreterConfig, LSystemInterpreter};
pub use turtle::{Turtle, TurtleState, path_to_polylines};

/// A production rule for an L-system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The symbol to replace.
    pub predecessor: char,
    /// The replacement string.
    pub successor: String,
}

impl Rule {
    /// Creates a rule rewriting `predecessor` to `successor`.
    pub fn new(predecessor: char, successor: &str) -> Self {
        Self {
            predecessor,
            successor: successor.to_string(),
        }
    }
}

impl From<(char, &str)> for Rule {
    fn from((predecessor, successor): (char, &str)) -> Self {
        Self::new(predecessor, successor)
    }
}

/// Serializable grammar of an [`LSystem`]: the axiom and its rules.
///
/// Expansion state is not part of the definition; loading one always yields
/// an L-system at generation 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LSystemDefinition {
    /// The starting string.
    pub axiom: String,
    /// Replacement string per symbol.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: BTreeMap<char, String>,
}

impl From<LSystemDefinition> for LSystem {
    fn from(definition: LSystemDefinition) -> Self {
        LSystem::new(
            &definition.axiom,
            definition
                .rules
                .into_iter()
                .map(|(predecessor, successor)| Rule {
                    predecessor,
                    successor,
                }),
        )
    }
}

impl From<LSystem> for LSystemDefinition {
    fn from(lsystem: LSystem) -> Self {
        Self {
            axiom: lsystem.axiom,
            rules: lsystem.rules.into_iter().collect(),
        }
    }
}

/// An L-system: an axiom, a rule map and the current expansion.
///
/// `as_str()` always equals the axiom rewritten `generation()` times.
/// Symbols without a rule rewrite to themselves. Rules live in one mutable
/// map, so [`add_rule`](LSystem::add_rule) affects every later pass.
///
/// Growth is exponential for most grammars and no cap is applied; use
/// [`length_after`](LSystem::length_after) to bound `generations` first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "LSystemDefinition", into = "LSystemDefinition")
)]
pub struct LSystem {
    axiom: String,
    rules: HashMap<char, String>,
    current: String,
    generation: usize,
}

impl LSystem {
    /// Creates an L-system. Later rules for the same symbol replace earlier ones.
    pub fn new(axiom: &str, rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (rule.predecessor, rule.successor))
            .collect();
        Self {
            axiom: axiom.to_string(),
            rules,
            current: axiom.to_string(),
            generation: 0,
        }
    }

    /// Adds a production rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.insert(rule.predecessor, rule.successor);
        self
    }

    /// Inserts or replaces the rule for `symbol`.
    pub fn add_rule(&mut self, symbol: char, replacement: &str) {
        tracing::trace!(%symbol, replacement, "adding l-system rule");
        self.rules.insert(symbol, replacement.to_string());
    }

    /// Returns the replacement for `symbol`, if it has a rule.
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Returns the axiom.
    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// Returns the current expansion.
    pub fn as_str(&self) -> &str {
        &self.current
    }

    /// Returns the number of rewrite passes applied since the last reset.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Applies `generations` more rewrite passes and returns the result.
    ///
    /// Each pass rewrites every symbol of the previous string at once.
    pub fn iterate(&mut self, generations: usize) -> &str {
        for _ in 0..generations {
            self.current = rewrite(&self.rules, &self.current);
            self.generation += 1;
            tracing::trace!(
                generation = self.generation,
                length = self.current.len(),
                "rewrite pass"
            );
        }

        tracing::debug!(
            generation = self.generation,
            length = self.current.len(),
            "l-system iterated"
        );
        &self.current
    }

    /// Returns to the axiom at generation 0.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.axiom);
        self.generation = 0;
    }

    /// Expands the axiom `iterations` times without touching the current state.
    pub fn generate(&self, iterations: usize) -> String {
        let mut current = self.axiom.clone();
        for _ in 0..iterations {
            current = rewrite(&self.rules, &current);
        }
        current
    }

    /// Returns the number of symbols in the axiom expanded `generations`
    /// times, without building the string. Saturates at `usize::MAX`.
    pub fn length_after(&self, generations: usize) -> usize {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for c in self.axiom.chars() {
            *counts.entry(c).or_default() += 1;
        }

        for _ in 0..generations {
            let mut next: HashMap<char, usize> = HashMap::with_capacity(counts.len());
            for (&symbol, &count) in &counts {
                match self.rules.get(&symbol) {
                    Some(successor) => {
                        for c in successor.chars() {
                            let slot = next.entry(c).or_default();
                            *slot = slot.saturating_add(count);
                        }
                    }
                    None => {
                        let slot = next.entry(symbol).or_default();
                        *slot = slot.saturating_add(count);
                    }
                }
            }
            counts = next;
        }

        counts.values().fold(0usize, |acc, &n| acc.saturating_add(n))
    }
}

/// One parallel rewrite pass.
fn rewrite(rules: &HashMap<char, String>, input: &str) -> String {
    let mut next = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        match rules.get(&c) {
            Some(successor) => next.push_str(successor),
            None => next.push(c),
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algae() -> LSystem {
        LSystem::new("A", [Rule::new('A', "AB"), Rule::new('B', "A")])
    }

    #[test]
    fn test_algae_sequence() {
        let mut lsystem = algae();

        assert_eq!(lsystem.as_str(), "A");
        assert_eq!(lsystem.iterate(1), "AB");
        assert_eq!(lsystem.iterate(1), "ABA");
        assert_eq!(lsystem.iterate(1), "ABAAB");
        assert_eq!(lsystem.generation(), 3);
    }

    #[test]
    fn test_iterate_accumulates() {
        let mut lsystem = algae();
        lsystem.iterate(2);
        assert_eq!(lsystem.iterate(2), "ABAABABA");
        assert_eq!(lsystem.generation(), 4);
        assert_eq!(lsystem.iterate(0), "ABAABABA");
    }

    #[test]
    fn test_no_rule() {
        let mut lsystem = LSystem::new("ABC", [Rule::new('A', "AA")]);
        assert_eq!(lsystem.iterate(1), "AABC");
    }

    #[test]
    fn test_later_rule_overwrites() {
        let lsystem = LSystem::new("A", [Rule::new('A', "B"), Rule::new('A', "C")]);
        assert_eq!(lsystem.rule('A'), Some("C"));
        assert_eq!(lsystem.generate(1), "C");
    }

    #[test]
    fn test_parallel_rewrite_uses_previous_string() {
        // A sequential rewrite would turn the fresh B back into A.
        let mut lsystem = LSystem::new("AB", [Rule::new('A', "B"), Rule::new('B', "A")]);
        assert_eq!(lsystem.iterate(1), "BA");
    }

    #[test]
    fn test_reset_reproduces_fresh_expansion() {
        let mut lsystem = algae();
        lsystem.iterate(4);
        lsystem.reset();
        assert_eq!(lsystem.as_str(), "A");
        assert_eq!(lsystem.generation(), 0);

        let mut fresh = algae();
        assert_eq!(lsystem.iterate(5), fresh.iterate(5));
    }

    #[test]
    fn test_add_rule_affects_later_passes() {
        let mut lsystem = LSystem::new("X", [Rule::new('X', "XY")]);
        lsystem.iterate(1);
        lsystem.add_rule('Y', "Z");
        assert_eq!(lsystem.iterate(1), "XYZ");
    }

    #[test]
    fn test_generate_is_pure() {
        let mut lsystem = algae();
        lsystem.iterate(1);
        assert_eq!(lsystem.generate(3), "ABAAB");
        assert_eq!(lsystem.as_str(), "AB");
        assert_eq!(lsystem.generation(), 1);
    }

    #[test]
    fn test_length_after() {
        let lsystem = algae();
        for n in 0..12 {
            assert_eq!(lsystem.length_after(n), lsystem.generate(n).chars().count());
        }

        let koch = presets::koch_curve();
        assert_eq!(koch.length_after(3), koch.generate(3).len());

        // Fibonacci growth overflows long before 200 generations.
        assert_eq!(algae().length_after(200), usize::MAX);
    }

    #[test]
    fn test_definition_roundtrip() {
        let lsystem = algae().with_rule(Rule::from(('C', "CC")));
        let definition = LSystemDefinition::from(lsystem.clone());
        assert_eq!(definition.axiom, "A");
        assert_eq!(definition.rules.len(), 3);

        let restored = LSystem::from(definition);
        assert_eq!(restored, lsystem);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_definition() {
        let json = r#"{ "axiom": "A", "rules": { "A": "AB", "B": "A" } }"#;
        let mut lsystem: LSystem = serde_json::from_str(json).unwrap();
        assert_eq!(lsystem.iterate(3), "ABAAB");

        let saved = serde_json::to_string(&lsystem).unwrap();
        let reloaded: LSystem = serde_json::from_str(&saved).unwrap();
        assert_eq!(reloaded.generation(), 0);
        assert_eq!(reloaded.as_str(), "A");
    }
}
