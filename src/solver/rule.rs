use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SolverError},
    solver::{
        puzzle::Puzzle,
        rules::{
            delta_comparison::DeltaComparisonRule, either_or::EitherOrRule,
            mutually_exclusive::MutuallyExclusiveRule, neither_nor::NeitherNorRule,
            pairs::PairsRule,
        },
    },
};

#[derive(Debug, Clone)]
pub struct RuleDescriptor {
    pub name: String,
    pub description: String,
}

/// A single clue pattern, applied once per propagation round.
///
/// A rule reads the puzzle through the query layer and mutates it only
/// through `mark_false`/`mark_true`. Rules never assume convergence within a
/// single call; the engine re-invokes every rule each round until a full
/// round removes no edges, so each rule's effects must be idempotent once
/// satisfied.
pub trait Rule: std::fmt::Debug {
    fn descriptor(&self) -> RuleDescriptor;

    fn apply(&self, puzzle: &mut Puzzle) -> Result<()>;
}

/// The declarative form of a clue, over item and category *names*.
///
/// Definitions are plain data (serializable, comparable in tests) and carry
/// no puzzle state; [`Puzzle::build_rule`] resolves the names and returns the
/// runnable [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClueDefinition {
    /// `subject` is matched to exactly one of the two options.
    EitherOr {
        subject: String,
        options: (String, String),
    },
    /// `subject` is matched to neither of the two items (which are also
    /// mutually distinct).
    NeitherNor {
        subject: String,
        excluded: (String, String),
    },
    /// No two of these items share a slot.
    MutuallyExclusive { items: Vec<String> },
    /// `{left}` matches `{right}` in some order.
    Pairs {
        left: (String, String),
        right: (String, String),
    },
    /// `greater`'s value in the ordinal category exceeds `lesser`'s by
    /// exactly `delta`.
    DeltaComparison {
        lesser: String,
        greater: String,
        delta: i64,
        category: String,
    },
}

impl Puzzle {
    /// Resolves a clue definition against this puzzle into a runnable rule.
    ///
    /// All name resolution and clue-shape validation happens here, so that a
    /// bad clue surfaces as a [`SolverError::Configuration`] before solving
    /// starts rather than as a mid-round failure.
    pub fn build_rule(&self, definition: &ClueDefinition) -> Result<Box<dyn Rule>> {
        match definition {
            ClueDefinition::EitherOr { subject, options } => {
                let obj = self.item(subject)?;
                let p1 = self.item(&options.0)?;
                let p2 = self.item(&options.1)?;
                if p1 == p2 || obj == p1 || obj == p2 {
                    return Err(SolverError::Configuration(format!(
                        "either/or clue for '{subject}' must name three distinct items"
                    ))
                    .into());
                }
                if self.category_of(obj)? == self.category_of(p1)?
                    || self.category_of(obj)? == self.category_of(p2)?
                {
                    return Err(SolverError::Configuration(format!(
                        "either/or options for '{subject}' cannot come from its own category"
                    ))
                    .into());
                }
                Ok(Box::new(EitherOrRule::new(obj, p1, p2)))
            }
            ClueDefinition::NeitherNor { subject, excluded } => {
                let obj = self.item(subject)?;
                let p1 = self.item(&excluded.0)?;
                let p2 = self.item(&excluded.1)?;
                if p1 == p2 || obj == p1 || obj == p2 {
                    return Err(SolverError::Configuration(format!(
                        "neither/nor clue for '{subject}' must name three distinct items"
                    ))
                    .into());
                }
                Ok(Box::new(NeitherNorRule::new(obj, p1, p2)))
            }
            ClueDefinition::MutuallyExclusive { items } => {
                if items.len() < 2 {
                    return Err(SolverError::Configuration(
                        "a mutual-exclusion clue needs at least two items".to_string(),
                    )
                    .into());
                }
                let mut resolved = Vec::with_capacity(items.len());
                for name in items {
                    let item = self.item(name)?;
                    if resolved.contains(&item) {
                        return Err(SolverError::Configuration(format!(
                            "mutual-exclusion clue names '{name}' twice"
                        ))
                        .into());
                    }
                    resolved.push(item);
                }
                Ok(Box::new(MutuallyExclusiveRule::new(resolved)))
            }
            ClueDefinition::Pairs { left, right } => {
                let a = self.item(&left.0)?;
                let b = self.item(&left.1)?;
                let c = self.item(&right.0)?;
                let d = self.item(&right.1)?;
                let mut all = vec![a, b, c, d];
                all.sort_unstable();
                all.dedup();
                if all.len() != 4 {
                    return Err(SolverError::Configuration(
                        "a pairing clue must name four distinct items".to_string(),
                    )
                    .into());
                }
                // An item can never match two items of its own category, so a
                // pair drawn from a single category that also contains one of
                // the opposite items is unsatisfiable by construction.
                let (ca, cb) = (self.category_of(a)?, self.category_of(b)?);
                let (cc, cd) = (self.category_of(c)?, self.category_of(d)?);
                if (ca == cb && (cc == ca || cd == ca)) || (cc == cd && (ca == cc || cb == cc)) {
                    return Err(SolverError::Configuration(
                        "a pairing clue cannot match a pair against its own category".to_string(),
                    )
                    .into());
                }
                Ok(Box::new(PairsRule::new((a, b), (c, d))))
            }
            ClueDefinition::DeltaComparison {
                lesser,
                greater,
                delta,
                category,
            } => {
                let lesser = self.item(lesser)?;
                let greater = self.item(greater)?;
                let category_id = self.category(category)?;
                if !self.is_ordinal(category_id) {
                    return Err(SolverError::Configuration(format!(
                        "category '{category}' is not ordinal"
                    ))
                    .into());
                }
                if *delta < 0 {
                    return Err(SolverError::Configuration(format!(
                        "delta must be non-negative, got {delta}"
                    ))
                    .into());
                }
                if lesser == greater {
                    return Err(SolverError::Configuration(
                        "a delta clue must compare two distinct items".to_string(),
                    )
                    .into());
                }
                if self.category_of(lesser)? == category_id
                    || self.category_of(greater)? == category_id
                {
                    return Err(SolverError::Configuration(format!(
                        "delta clue endpoints must live outside the ordinal category '{category}'"
                    ))
                    .into());
                }
                Ok(Box::new(DeltaComparisonRule::new(
                    lesser,
                    greater,
                    *delta,
                    category_id,
                )))
            }
        }
    }

    /// Convenience wrapper resolving a whole clue list in registration order.
    pub fn build_rules(&self, definitions: &[ClueDefinition]) -> Result<Vec<Box<dyn Rule>>> {
        definitions.iter().map(|d| self.build_rule(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    fn puzzle() -> Puzzle {
        Puzzle::builder()
            .category("Color", ["Red", "Green", "Blue"])
            .category("Pet", ["Dog", "Cat", "Bird"])
            .ordinal_category("Position", [1, 2, 3])
            .build()
            .unwrap()
    }

    #[test]
    fn definitions_round_trip_through_json() {
        let clues = vec![
            ClueDefinition::EitherOr {
                subject: "Red".to_string(),
                options: ("Dog".to_string(), "Cat".to_string()),
            },
            ClueDefinition::DeltaComparison {
                lesser: "Red".to_string(),
                greater: "Blue".to_string(),
                delta: 2,
                category: "Position".to_string(),
            },
        ];
        let json = serde_json::to_string(&clues).unwrap();
        let parsed: Vec<ClueDefinition> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, clues);
    }

    #[test]
    fn unknown_item_name_is_a_configuration_error() {
        let puzzle = puzzle();
        let err = puzzle
            .build_rule(&ClueDefinition::NeitherNor {
                subject: "Mauve".to_string(),
                excluded: ("Dog".to_string(), "Cat".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Configuration(_)));
    }

    #[test]
    fn negative_delta_is_rejected() {
        let puzzle = puzzle();
        let err = puzzle
            .build_rule(&ClueDefinition::DeltaComparison {
                lesser: "Red".to_string(),
                greater: "Blue".to_string(),
                delta: -1,
                category: "Position".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Configuration(_)));
    }

    #[test]
    fn delta_against_non_ordinal_category_is_rejected() {
        let puzzle = puzzle();
        let err = puzzle
            .build_rule(&ClueDefinition::DeltaComparison {
                lesser: "Dog".to_string(),
                greater: "Cat".to_string(),
                delta: 1,
                category: "Color".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Configuration(_)));
    }

    #[test]
    fn delta_endpoint_inside_ordinal_category_is_rejected() {
        let puzzle = puzzle();
        let err = puzzle
            .build_rule(&ClueDefinition::DeltaComparison {
                lesser: "1".to_string(),
                greater: "Blue".to_string(),
                delta: 1,
                category: "Position".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Configuration(_)));
    }
}
