use tracing::debug;

use crate::{
    error::{Result, SolverError},
    solver::{
        outcome::Outcome,
        puzzle::{ItemId, Puzzle},
        rule::Rule,
        stats::SolveStats,
    },
};

/// The propagation engine for logic grid puzzles.
///
/// The engine runs rounds of pure constraint propagation: every registered
/// rule is applied in registration order, then a structural pass forces the
/// assignment of any item left with a single candidate in some category.
/// Rounds repeat until one full round removes no edge from the possibility
/// graph. Edges only ever decrease, so the loop terminates in at most
/// initial-edge-count rounds.
///
/// There is no search: a puzzle whose clues don't pin down every pairing
/// converges to an [`Outcome::Underconstrained`] rather than being guessed
/// at.
pub struct SolverEngine {
    max_rounds: Option<usize>,
}

impl SolverEngine {
    pub fn new() -> Self {
        Self { max_rounds: None }
    }

    /// An engine with a round ceiling, as an external safety valve. The
    /// natural loop always terminates, so exceeding the ceiling means the
    /// puzzle needed more rounds than the caller was willing to spend, and
    /// surfaces as [`SolverError::NonConvergence`].
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self {
            max_rounds: Some(max_rounds),
        }
    }

    /// Runs rules and the structural pass to the fixed point, then reads the
    /// outcome off the converged graph.
    ///
    /// Rules mutate `puzzle` in place; after a successful solve the caller
    /// can still query it for diagnostics.
    pub fn solve(
        &self,
        rules: &[Box<dyn Rule>],
        puzzle: &mut Puzzle,
    ) -> Result<(Outcome, SolveStats)> {
        let mut stats = SolveStats::new(rules, puzzle.edge_count());

        let mut previous_edge_count = usize::MAX;
        while puzzle.edge_count() < previous_edge_count {
            if let Some(max) = self.max_rounds {
                if stats.rounds >= max {
                    return Err(SolverError::NonConvergence {
                        rounds: stats.rounds,
                    }
                    .into());
                }
            }
            previous_edge_count = puzzle.edge_count();
            stats.rounds += 1;
            debug!(
                round = stats.rounds,
                edges = previous_edge_count,
                "round started"
            );

            for (rule_id, rule) in rules.iter().enumerate() {
                let before = puzzle.edge_count();
                rule.apply(puzzle)?;
                stats.record_application(rule_id, before - puzzle.edge_count());
            }

            self.reduce(puzzle, &mut stats)?;
            debug!(
                round = stats.rounds,
                edges = puzzle.edge_count(),
                "round finished"
            );
        }

        stats.final_edges = puzzle.edge_count();
        let outcome = Outcome::extract(puzzle)?;
        Ok((outcome, stats))
    }

    /// The structural forced-assignment pass: any item with exactly one
    /// surviving candidate in another category is matched to it, and the
    /// newly matched pair's neighbor sets are reconciled. An item with zero
    /// candidates in some category means the puzzle has no solution.
    fn reduce(&self, puzzle: &mut Puzzle, stats: &mut SolveStats) -> Result<()> {
        let items: Vec<ItemId> = puzzle.item_ids().collect();
        let categories: Vec<_> = puzzle.category_ids().collect();

        for &item in &items {
            let own = puzzle.category_of(item)?;
            for &category in &categories {
                if category == own {
                    continue;
                }
                match puzzle.neighbors_in(item, category)?[..] {
                    [] => {
                        return Err(SolverError::Contradiction(format!(
                            "'{}' has no remaining candidates in category '{}'",
                            puzzle.item_name(item),
                            puzzle.category_name(category)
                        ))
                        .into());
                    }
                    [partner] => {
                        let newly_forced = puzzle.answer(item, category) != Some(partner);
                        puzzle.mark_true(item, partner)?;
                        if newly_forced {
                            stats.forced_assignments += 1;
                            debug!(
                                item = puzzle.item_name(item),
                                partner = puzzle.item_name(partner),
                                "forced assignment"
                            );
                        }
                        self.share_info(puzzle, item, partner)?;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Two items known to share a slot must agree on their candidates in
    /// every category: anything in the symmetric difference of their
    /// neighbor sets is removed from both sides. A side's own category is
    /// represented by its singleton membership.
    fn share_info(&self, puzzle: &mut Puzzle, a: ItemId, b: ItemId) -> Result<()> {
        let cat_a = puzzle.category_of(a)?;
        let cat_b = puzzle.category_of(b)?;
        let categories: Vec<_> = puzzle.category_ids().collect();

        for &category in &categories {
            let side_a = if category == cat_a {
                vec![a]
            } else {
                puzzle.neighbors_in(a, category)?
            };
            let side_b = if category == cat_b {
                vec![b]
            } else {
                puzzle.neighbors_in(b, category)?
            };

            let disagreement: Vec<ItemId> = side_a
                .iter()
                .filter(|&x| !side_b.contains(x))
                .chain(side_b.iter().filter(|&x| !side_a.contains(x)))
                .copied()
                .collect();

            for x in disagreement {
                if category != cat_a {
                    puzzle.mark_false(a, x)?;
                }
                if category != cat_b {
                    puzzle.mark_false(b, x)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for SolverEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::SolverError,
        solver::{outcome::Outcome, puzzle::Puzzle, rule::ClueDefinition},
    };

    fn three_house_puzzle() -> Puzzle {
        Puzzle::builder()
            .category("Color", ["Red", "Green", "Blue"])
            .category("Pet", ["Dog", "Cat", "Bird"])
            .ordinal_category("Position", [1, 2, 3])
            .build()
            .unwrap()
    }

    fn three_house_clues() -> Vec<ClueDefinition> {
        vec![
            ClueDefinition::NeitherNor {
                subject: "Green".to_string(),
                excluded: ("Dog".to_string(), "Cat".to_string()),
            },
            ClueDefinition::NeitherNor {
                subject: "Red".to_string(),
                excluded: ("Cat".to_string(), "Bird".to_string()),
            },
            ClueDefinition::DeltaComparison {
                lesser: "Red".to_string(),
                greater: "Blue".to_string(),
                delta: 2,
                category: "Position".to_string(),
            },
        ]
    }

    #[test]
    fn solves_the_three_house_puzzle() {
        let mut puzzle = three_house_puzzle();
        let rules = puzzle.build_rules(&three_house_clues()).unwrap();

        let (outcome, stats) = SolverEngine::new().solve(&rules, &mut puzzle).unwrap();

        let grid = match outcome {
            Outcome::Solved(grid) => grid,
            other => panic!("expected a full solution, got {other:?}"),
        };
        assert_eq!(grid.answer("Red", "Pet"), Some("Dog"));
        assert_eq!(grid.answer("Red", "Position"), Some("1"));
        assert_eq!(grid.answer("Green", "Pet"), Some("Bird"));
        assert_eq!(grid.answer("Green", "Position"), Some("2"));
        assert_eq!(grid.answer("Blue", "Pet"), Some("Cat"));
        assert_eq!(grid.answer("Blue", "Position"), Some("3"));
        // The answer map reads the same from the other side.
        assert_eq!(grid.answer("Dog", "Color"), Some("Red"));
        assert_eq!(grid.answer("2", "Pet"), Some("Bird"));

        assert_eq!(stats.initial_edges, 27);
        // A fully resolved 3x3x3 grid keeps one edge per item pair per slot.
        assert_eq!(stats.final_edges, 9);
        assert!(stats.rounds >= 2);
        assert!(stats.forced_assignments > 0);
    }

    #[test]
    fn answer_map_agrees_with_the_graph_after_convergence() {
        let mut puzzle = three_house_puzzle();
        let rules = puzzle.build_rules(&three_house_clues()).unwrap();
        SolverEngine::new().solve(&rules, &mut puzzle).unwrap();

        for item in puzzle.item_ids().collect::<Vec<_>>() {
            let own = puzzle.category_of(item).unwrap();
            for category in puzzle.category_ids().collect::<Vec<_>>() {
                if category == own {
                    continue;
                }
                let neighbors = puzzle.neighbors_in(item, category).unwrap();
                assert_eq!(neighbors.len(), 1);
                assert_eq!(puzzle.answer(item, category), Some(neighbors[0]));
            }
        }
    }

    #[test]
    fn underconstrained_puzzle_reports_candidates() {
        let mut puzzle = Puzzle::builder()
            .category("Person", ["Alice", "Bob", "Carol"])
            .category("Drink", ["Tea", "Coffee", "Milk"])
            .build()
            .unwrap();
        let clues = vec![ClueDefinition::Pairs {
            left: ("Alice".to_string(), "Bob".to_string()),
            right: ("Tea".to_string(), "Coffee".to_string()),
        }];
        let rules = puzzle.build_rules(&clues).unwrap();

        let (outcome, _stats) = SolverEngine::new().solve(&rules, &mut puzzle).unwrap();

        let candidates = match outcome {
            Outcome::Underconstrained(candidates) => candidates,
            other => panic!("expected an underconstrained outcome, got {other:?}"),
        };
        // Carol's drink is forced, Alice's and Bob's are not.
        assert_eq!(candidates.candidates("Carol", "Drink"), vec!["Milk"]);
        assert_eq!(candidates.candidates("Alice", "Drink"), vec!["Tea", "Coffee"]);
        assert_eq!(candidates.candidates("Bob", "Drink"), vec!["Tea", "Coffee"]);
    }

    #[test]
    fn contradictory_clues_surface_as_contradiction() {
        let mut puzzle = three_house_puzzle();
        let clues = vec![
            ClueDefinition::NeitherNor {
                subject: "Red".to_string(),
                excluded: ("Dog".to_string(), "Cat".to_string()),
            },
            ClueDefinition::NeitherNor {
                subject: "Red".to_string(),
                excluded: ("Bird".to_string(), "Dog".to_string()),
            },
        ];
        let rules = puzzle.build_rules(&clues).unwrap();

        let err = SolverEngine::new().solve(&rules, &mut puzzle).unwrap_err();
        assert!(matches!(err.inner(), SolverError::Contradiction(_)));
    }

    #[test]
    fn round_ceiling_surfaces_as_non_convergence() {
        let mut puzzle = three_house_puzzle();
        let rules = puzzle.build_rules(&three_house_clues()).unwrap();

        let err = SolverEngine::with_max_rounds(1)
            .solve(&rules, &mut puzzle)
            .unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::NonConvergence { rounds: 1 }
        ));
    }

    #[test]
    fn clueless_puzzle_converges_immediately() {
        let mut puzzle = three_house_puzzle();
        let (outcome, stats) = SolverEngine::new().solve(&[], &mut puzzle).unwrap();

        assert!(matches!(outcome, Outcome::Underconstrained(_)));
        assert_eq!(stats.rounds, 1);
        assert_eq!(stats.initial_edges, stats.final_edges);
    }
}
