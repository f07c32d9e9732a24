use crate::{
    error::Result,
    solver::{
        puzzle::{ItemId, Puzzle},
        rule::{Rule, RuleDescriptor},
    },
};

/// An all-pairwise-distinct assertion over a set of items: no two of them
/// refer to the same slot.
///
/// This is a structural fact rather than an inference; a single application
/// removes every edge it ever will. Pairs within the same category are
/// no-ops since those edges never existed.
#[derive(Debug, Clone)]
pub struct MutuallyExclusiveRule {
    pub items: Vec<ItemId>,
}

impl MutuallyExclusiveRule {
    pub fn new(items: Vec<ItemId>) -> Self {
        Self { items }
    }
}

impl Rule for MutuallyExclusiveRule {
    fn descriptor(&self) -> RuleDescriptor {
        let items = self
            .items
            .iter()
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        RuleDescriptor {
            name: "MutuallyExclusiveRule".to_string(),
            description: format!("MutuallyExclusive({items})"),
        }
    }

    fn apply(&self, puzzle: &mut Puzzle) -> Result<()> {
        for (i, &a) in self.items.iter().enumerate() {
            for &b in &self.items[i + 1..] {
                puzzle.mark_false(a, b)?;
            }
        }
        Ok(())
    }
}
