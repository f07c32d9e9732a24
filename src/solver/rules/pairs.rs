use crate::{
    error::Result,
    solver::{
        puzzle::{ItemId, Puzzle},
        rule::{Rule, RuleDescriptor},
        rules::either_or::apply_either_or,
    },
};

/// Encodes "`{a, b}` matches `{c, d}` in some order" — a cross-pairing clue
/// such as "the red and green houses belong to Alice and Bob".
///
/// Both pairs are asserted distinct, then each item of one pair runs the
/// either-or propagation against the opposite pair. When a pair shares a
/// category, its two members jointly occupy the opposite pair's slots, so
/// every other item of that category is excluded from both opposite items.
#[derive(Debug, Clone)]
pub struct PairsRule {
    pub pair1: (ItemId, ItemId),
    pub pair2: (ItemId, ItemId),
}

impl PairsRule {
    pub fn new(pair1: (ItemId, ItemId), pair2: (ItemId, ItemId)) -> Self {
        Self { pair1, pair2 }
    }
}

impl Rule for PairsRule {
    fn descriptor(&self) -> RuleDescriptor {
        let (a, b) = self.pair1;
        let (c, d) = self.pair2;
        RuleDescriptor {
            name: "PairsRule".to_string(),
            description: format!("Pairs({{?{a}, ?{b}}}, {{?{c}, ?{d}}})"),
        }
    }

    fn apply(&self, puzzle: &mut Puzzle) -> Result<()> {
        let (a, b) = self.pair1;
        let (c, d) = self.pair2;

        puzzle.mark_false(a, b)?;
        puzzle.mark_false(c, d)?;

        apply_either_or(puzzle, a, c, d)?;
        apply_either_or(puzzle, b, c, d)?;
        apply_either_or(puzzle, c, a, b)?;
        apply_either_or(puzzle, d, a, b)?;

        self.exclude_outsiders(puzzle, (a, b), (c, d))?;
        self.exclude_outsiders(puzzle, (c, d), (a, b))?;

        Ok(())
    }
}

impl PairsRule {
    /// When `pair` shares a category, its members occupy `opposite`'s two
    /// slots, so no other item of that category can match either opposite
    /// item.
    fn exclude_outsiders(
        &self,
        puzzle: &mut Puzzle,
        pair: (ItemId, ItemId),
        opposite: (ItemId, ItemId),
    ) -> Result<()> {
        let cat1 = puzzle.category_of(pair.0)?;
        let cat2 = puzzle.category_of(pair.1)?;
        if cat1 != cat2 {
            return Ok(());
        }
        for outsider in puzzle.category_items(cat1).to_vec() {
            if outsider != pair.0 && outsider != pair.1 {
                puzzle.mark_false(outsider, opposite.0)?;
                puzzle.mark_false(outsider, opposite.1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn puzzle() -> Puzzle {
        Puzzle::builder()
            .category("Person", ["Alice", "Bob", "Carol"])
            .category("Drink", ["Tea", "Coffee", "Milk"])
            .ordinal_category("Position", [1, 2, 3])
            .build()
            .unwrap()
    }

    #[test]
    fn same_category_pair_excludes_outsiders_from_the_opposite_pair() {
        let mut puzzle = puzzle();
        let alice = puzzle.item("Alice").unwrap();
        let bob = puzzle.item("Bob").unwrap();
        let carol = puzzle.item("Carol").unwrap();
        let tea = puzzle.item("Tea").unwrap();
        let coffee = puzzle.item("Coffee").unwrap();
        let milk = puzzle.item("Milk").unwrap();

        PairsRule::new((alice, bob), (tea, coffee))
            .apply(&mut puzzle)
            .unwrap();

        // Tea and Coffee belong to Alice and Bob in some order, so Carol
        // drinks neither.
        assert!(!puzzle.has_edge(carol, tea));
        assert!(!puzzle.has_edge(carol, coffee));
        assert!(puzzle.has_edge(carol, milk));
        assert!(puzzle.has_edge(alice, tea));
        assert!(puzzle.has_edge(alice, coffee));
    }

    #[test]
    fn resolved_half_forces_the_cross_assignment() {
        let mut puzzle = puzzle();
        let alice = puzzle.item("Alice").unwrap();
        let bob = puzzle.item("Bob").unwrap();
        let tea = puzzle.item("Tea").unwrap();
        let coffee = puzzle.item("Coffee").unwrap();
        let drink = puzzle.category("Drink").unwrap();

        // Alice is known not to drink tea, so the pairing resolves fully.
        puzzle.mark_false(alice, tea).unwrap();
        PairsRule::new((alice, bob), (tea, coffee))
            .apply(&mut puzzle)
            .unwrap();

        assert_eq!(puzzle.answer(alice, drink), Some(coffee));
        assert_eq!(puzzle.answer(bob, drink), Some(tea));
    }

    #[test]
    fn cross_category_pairs_separate_their_members() {
        let mut puzzle = puzzle();
        let alice = puzzle.item("Alice").unwrap();
        let tea = puzzle.item("Tea").unwrap();
        let bob = puzzle.item("Bob").unwrap();
        let one = puzzle.item("1").unwrap();

        PairsRule::new((alice, tea), (bob, one))
            .apply(&mut puzzle)
            .unwrap();

        // {Alice, Tea} = {Bob, 1} in some order; Alice can't be Bob, so
        // Alice is slot 1 and Tea is Bob's.
        assert!(!puzzle.has_edge(alice, tea));
        assert!(!puzzle.has_edge(bob, one));
        let position = puzzle.category("Position").unwrap();
        let drink = puzzle.category("Drink").unwrap();
        assert_eq!(puzzle.answer(alice, position), Some(one));
        assert_eq!(puzzle.answer(bob, drink), Some(tea));
    }

    #[test]
    fn reapplication_is_idempotent() {
        let mut puzzle = puzzle();
        let alice = puzzle.item("Alice").unwrap();
        let bob = puzzle.item("Bob").unwrap();
        let tea = puzzle.item("Tea").unwrap();
        let coffee = puzzle.item("Coffee").unwrap();
        let rule = PairsRule::new((alice, bob), (tea, coffee));

        rule.apply(&mut puzzle).unwrap();
        let edges = puzzle.edge_count();
        rule.apply(&mut puzzle).unwrap();
        assert_eq!(puzzle.edge_count(), edges);
    }
}
