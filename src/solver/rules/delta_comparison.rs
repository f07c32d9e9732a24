use crate::{
    error::{Result, SolverError},
    solver::{
        puzzle::{CategoryId, ItemId, Puzzle},
        rule::{Rule, RuleDescriptor},
    },
};

/// Encodes "`greater`'s value in the ordinal category exceeds `lesser`'s by
/// exactly `delta`" for two items living outside that category.
///
/// With `delta == 0` the clue degenerates to a plain distinctness assertion
/// and none of the directional reasoning applies. With `delta > 0`, each
/// application prunes ordinal candidates four ways: values only reachable
/// through an already-excluded counterpart (in both directions), and values
/// outside the window implied by the pair's shrinking min/max bounds. The
/// engine's fixed-point loop re-applies the rule until these stop firing.
#[derive(Debug, Clone)]
pub struct DeltaComparisonRule {
    pub lesser: ItemId,
    pub greater: ItemId,
    pub delta: i64,
    pub category: CategoryId,
}

impl DeltaComparisonRule {
    pub fn new(lesser: ItemId, greater: ItemId, delta: i64, category: CategoryId) -> Self {
        Self {
            lesser,
            greater,
            delta,
            category,
        }
    }

    /// The surviving ordinal values for `item`, failing fast when nothing
    /// survives (the puzzle is contradictory, not merely tight).
    fn surviving(&self, puzzle: &Puzzle, item: ItemId) -> Result<Vec<i64>> {
        let values: Vec<i64> = puzzle
            .neighbors_in(item, self.category)?
            .into_iter()
            .filter_map(|n| puzzle.ordinal_value(n))
            .collect();
        if values.is_empty() {
            return Err(SolverError::Contradiction(format!(
                "'{}' has no remaining candidates in category '{}'",
                puzzle.item_name(item),
                puzzle.category_name(self.category)
            ))
            .into());
        }
        Ok(values)
    }

    fn exclude_value(&self, puzzle: &mut Puzzle, item: ItemId, value: i64) -> Result<()> {
        if let Some(target) = puzzle.item_for_value(self.category, value) {
            puzzle.mark_false(item, target)?;
        }
        Ok(())
    }
}

impl Rule for DeltaComparisonRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "DeltaComparisonRule".to_string(),
            description: format!(
                "DeltaComparison(?{} + {} = ?{})",
                self.lesser, self.delta, self.greater
            ),
        }
    }

    fn apply(&self, puzzle: &mut Puzzle) -> Result<()> {
        puzzle.mark_false(self.lesser, self.greater)?;

        // Zero delta carries no ordering information.
        if self.delta == 0 {
            return Ok(());
        }

        let values: Vec<i64> = puzzle
            .category_items(self.category)
            .iter()
            .filter_map(|&i| puzzle.ordinal_value(i))
            .collect();
        let min_value = *values.iter().min().expect("ordinal category is non-empty");
        let max_value = *values.iter().max().expect("ordinal category is non-empty");

        // Baseline bounds: the greater item can never sit at the minimum,
        // nor the lesser at the maximum.
        self.exclude_value(puzzle, self.greater, min_value)?;
        self.exclude_value(puzzle, self.lesser, max_value)?;

        for &p in &values {
            let p_plus = p + self.delta;
            let p_minus = p - self.delta;

            // A value unreachable through its counterpart is excluded, in
            // both directions.
            if !self.surviving(puzzle, self.lesser)?.contains(&p) && values.contains(&p_plus) {
                self.exclude_value(puzzle, self.greater, p_plus)?;
            }
            if !self.surviving(puzzle, self.greater)?.contains(&p) && values.contains(&p_minus) {
                self.exclude_value(puzzle, self.lesser, p_minus)?;
            }

            // Window bounds, re-derived from the pair's current extremes so
            // that removals earlier in this pass tighten later checks.
            let lesser_min = *self
                .surviving(puzzle, self.lesser)?
                .iter()
                .min()
                .expect("surviving() is non-empty");
            if p < lesser_min + self.delta {
                self.exclude_value(puzzle, self.greater, p)?;
            }
            let greater_max = *self
                .surviving(puzzle, self.greater)?
                .iter()
                .max()
                .expect("surviving() is non-empty");
            if p > greater_max - self.delta {
                self.exclude_value(puzzle, self.lesser, p)?;
            }

            // Reverse eliminations: a value whose required counterpart is
            // gone cannot stand itself.
            if values.contains(&p_minus) && !self.surviving(puzzle, self.lesser)?.contains(&p_minus)
            {
                self.exclude_value(puzzle, self.greater, p)?;
            }
            if values.contains(&p_plus) && !self.surviving(puzzle, self.greater)?.contains(&p_plus)
            {
                self.exclude_value(puzzle, self.lesser, p)?;
            }
        }

        Ok(())
    }
}
