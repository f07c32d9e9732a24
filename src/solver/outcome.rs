use std::collections::BTreeMap;

use serde::Serialize;

use crate::{error::Result, solver::puzzle::Puzzle};

/// The terminal result of a converged solve.
///
/// Convergence alone does not imply a solution: propagation may stop with
/// some items still holding several candidates, which is the
/// `Underconstrained` outcome, distinct from both success and error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Every item ended with exactly one candidate in every other category.
    Solved(SolvedGrid),
    /// At least one item retains more than one candidate somewhere; the
    /// surviving candidate sets are returned for diagnostics.
    Underconstrained(CandidateGrid),
}

/// The fully resolved assignment: for every item, its match in each other
/// category, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolvedGrid {
    answers: BTreeMap<String, BTreeMap<String, String>>,
}

impl SolvedGrid {
    pub fn answer(&self, item: &str, category: &str) -> Option<&str> {
        self.answers
            .get(item)
            .and_then(|row| row.get(category))
            .map(String::as_str)
    }

    /// Iterates `(item, category → match)` rows in item-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The surviving candidate sets of an underconstrained puzzle, in category
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateGrid {
    candidates: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl CandidateGrid {
    pub fn candidates(&self, item: &str, category: &str) -> Vec<&str> {
        self.candidates
            .get(item)
            .and_then(|row| row.get(category))
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Items that are not pinned down in every category.
    pub fn unresolved_items(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .filter(|(_, row)| row.values().any(|names| names.len() > 1))
            .map(|(item, _)| item.as_str())
            .collect()
    }
}

impl Outcome {
    /// Reads the outcome off a converged puzzle: solved if and only if every
    /// item has exactly one surviving candidate in every other category.
    pub(crate) fn extract(puzzle: &Puzzle) -> Result<Outcome> {
        let mut solved = true;
        'outer: for item in puzzle.item_ids() {
            for (_, degree) in puzzle.degree_by_category(item)? {
                if degree != 1 {
                    solved = false;
                    break 'outer;
                }
            }
        }

        if solved {
            let mut answers = BTreeMap::new();
            for item in puzzle.item_ids() {
                let own = puzzle.category_of(item)?;
                let mut row = BTreeMap::new();
                for category in puzzle.category_ids() {
                    if category == own {
                        continue;
                    }
                    let partner = puzzle.neighbors_in(item, category)?[0];
                    row.insert(
                        puzzle.category_name(category).to_string(),
                        puzzle.item_name(partner).to_string(),
                    );
                }
                answers.insert(puzzle.item_name(item).to_string(), row);
            }
            Ok(Outcome::Solved(SolvedGrid { answers }))
        } else {
            let mut candidates = BTreeMap::new();
            for item in puzzle.item_ids() {
                let own = puzzle.category_of(item)?;
                let mut row = BTreeMap::new();
                for category in puzzle.category_ids() {
                    if category == own {
                        continue;
                    }
                    let names = puzzle
                        .neighbors_in(item, category)?
                        .into_iter()
                        .map(|n| puzzle.item_name(n).to_string())
                        .collect();
                    row.insert(puzzle.category_name(category).to_string(), names);
                }
                candidates.insert(puzzle.item_name(item).to_string(), row);
            }
            Ok(Outcome::Underconstrained(CandidateGrid { candidates }))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn puzzle() -> Puzzle {
        Puzzle::builder()
            .category("Color", ["Red", "Green"])
            .category("Pet", ["Dog", "Cat"])
            .build()
            .unwrap()
    }

    #[test]
    fn fresh_puzzle_extracts_as_underconstrained() {
        let puzzle = puzzle();
        let outcome = Outcome::extract(&puzzle).unwrap();
        let candidates = match outcome {
            Outcome::Underconstrained(candidates) => candidates,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(candidates.candidates("Red", "Pet"), vec!["Dog", "Cat"]);
        assert_eq!(
            candidates.unresolved_items(),
            vec!["Cat", "Dog", "Green", "Red"]
        );
    }

    #[test]
    fn resolved_puzzle_extracts_as_solved() {
        let mut puzzle = puzzle();
        let red = puzzle.item("Red").unwrap();
        let dog = puzzle.item("Dog").unwrap();
        puzzle.mark_true(red, dog).unwrap();

        let outcome = Outcome::extract(&puzzle).unwrap();
        let grid = match outcome {
            Outcome::Solved(grid) => grid,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(grid.answer("Red", "Pet"), Some("Dog"));
        assert_eq!(grid.answer("Green", "Pet"), Some("Cat"));
        assert_eq!(grid.answer("Cat", "Color"), Some("Green"));
        assert_eq!(grid.answer("Red", "Color"), None);
    }
}
