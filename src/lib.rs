//! Tabula is a constraint-propagation solver for logic grid puzzles
//! (a.k.a. "zebra puzzles").
//!
//! A puzzle consists of N categories of equal size K, where exactly one item
//! from each category corresponds to each of the K underlying slots, plus a
//! set of declarative clues. The solver models the puzzle as a *possibility
//! graph*: an edge between two items of different categories means "not yet
//! ruled out as the same slot". Clue rules and a structural
//! forced-assignment pass repeatedly remove edges until a fixed point is
//! reached; the surviving edges are the answer.
//!
//! # Core Concepts
//!
//! - **[`Puzzle`]**: the incidence model — categories, items, the
//!   possibility graph, and the answer map, built with [`PuzzleBuilder`].
//! - **[`ClueDefinition`]**: the declarative, serializable form of a clue,
//!   resolved against a puzzle into a runnable [`Rule`].
//! - **[`SolverEngine`]**: applies all rules round after round until no
//!   round removes an edge, then extracts the [`Outcome`].
//!
//! There is no backtracking search: the engine is pure propagation, and a
//! clue set that doesn't pin everything down converges to an
//! [`Outcome::Underconstrained`] instead of being guessed at.
//!
//! # Example: Three Houses
//!
//! Three houses with three colors, three pets, and positions 1 to 3.
//! The green house's owner keeps neither the dog nor the cat, the red
//! house's owner keeps neither the cat nor the bird, and the blue house
//! sits exactly two places after the red one.
//!
//! ```
//! use tabula::solver::engine::SolverEngine;
//! use tabula::solver::outcome::Outcome;
//! use tabula::solver::puzzle::Puzzle;
//! use tabula::solver::rule::ClueDefinition;
//!
//! let mut puzzle = Puzzle::builder()
//!     .category("Color", ["Red", "Green", "Blue"])
//!     .category("Pet", ["Dog", "Cat", "Bird"])
//!     .ordinal_category("Position", [1, 2, 3])
//!     .build()
//!     .unwrap();
//!
//! let clues = vec![
//!     ClueDefinition::NeitherNor {
//!         subject: "Green".to_string(),
//!         excluded: ("Dog".to_string(), "Cat".to_string()),
//!     },
//!     ClueDefinition::NeitherNor {
//!         subject: "Red".to_string(),
//!         excluded: ("Cat".to_string(), "Bird".to_string()),
//!     },
//!     ClueDefinition::DeltaComparison {
//!         lesser: "Red".to_string(),
//!         greater: "Blue".to_string(),
//!         delta: 2,
//!         category: "Position".to_string(),
//!     },
//! ];
//! let rules = puzzle.build_rules(&clues).unwrap();
//!
//! let engine = SolverEngine::new();
//! let (outcome, _stats) = engine.solve(&rules, &mut puzzle).unwrap();
//!
//! let Outcome::Solved(grid) = outcome else {
//!     panic!("the clues pin down a unique solution");
//! };
//! assert_eq!(grid.answer("Red", "Pet"), Some("Dog"));
//! assert_eq!(grid.answer("Green", "Pet"), Some("Bird"));
//! assert_eq!(grid.answer("Blue", "Position"), Some("3"));
//! ```
//!
//! [`Puzzle`]: solver::puzzle::Puzzle
//! [`PuzzleBuilder`]: solver::puzzle::PuzzleBuilder
//! [`ClueDefinition`]: solver::rule::ClueDefinition
//! [`Rule`]: solver::rule::Rule
//! [`SolverEngine`]: solver::engine::SolverEngine
//! [`Outcome`]: solver::outcome::Outcome
//! [`Outcome::Underconstrained`]: solver::outcome::Outcome::Underconstrained
pub mod error;
pub mod solver;
