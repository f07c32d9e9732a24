use crate::{
    error::Result,
    solver::{
        puzzle::{ItemId, Puzzle},
        rule::{Rule, RuleDescriptor},
    },
};

/// Encodes "`obj` is matched to `p1` or `p2`, exclusively".
///
/// The two options may come from the same category or from two different
/// ones; the stronger two-hop inferences only apply in the two-category
/// case.
#[derive(Debug, Clone)]
pub struct EitherOrRule {
    pub obj: ItemId,
    pub p1: ItemId,
    pub p2: ItemId,
}

impl EitherOrRule {
    pub fn new(obj: ItemId, p1: ItemId, p2: ItemId) -> Self {
        Self { obj, p1, p2 }
    }
}

impl Rule for EitherOrRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "EitherOrRule".to_string(),
            description: format!("EitherOr(?{}, {{?{}, ?{}}})", self.obj, self.p1, self.p2),
        }
    }

    fn apply(&self, puzzle: &mut Puzzle) -> Result<()> {
        apply_either_or(puzzle, self.obj, self.p1, self.p2)
    }
}

/// The shared either-or propagation body, also embedded by the pairing rule.
///
/// Effects, in order (each may enable later ones within the same call; the
/// engine's outer fixed-point loop makes the ordering irrelevant for the
/// final state):
///
/// 1. the two options exclude each other;
/// 2. an option no longer possible for the subject forces the other one;
/// 3. (two-category pairs) a subject whose candidates in one option's
///    category have shrunk to that option alone is excluded from the other
///    option;
/// 4. an option whose sole candidate in the subject's category is someone
///    else forces the other option;
/// 5. (two-category pairs) if an option is pinned to a single candidate in
///    the other option's category, the subject's candidates there reduce to
///    that candidate or the other option itself.
pub(crate) fn apply_either_or(
    puzzle: &mut Puzzle,
    obj: ItemId,
    p1: ItemId,
    p2: ItemId,
) -> Result<()> {
    let cat_obj = puzzle.category_of(obj)?;
    let cat_p1 = puzzle.category_of(p1)?;
    let cat_p2 = puzzle.category_of(p2)?;

    puzzle.mark_false(p1, p2)?;

    if !puzzle.has_edge(obj, p1) {
        puzzle.mark_true(obj, p2)?;
    }
    if !puzzle.has_edge(obj, p2) {
        puzzle.mark_true(obj, p1)?;
    }

    if cat_p1 != cat_p2 && cat_p1 != cat_obj && cat_p2 != cat_obj {
        if let [only] = puzzle.neighbors_in(obj, cat_p1)?[..] {
            if only == p1 {
                puzzle.mark_false(obj, p2)?;
            }
        }
        if let [only] = puzzle.neighbors_in(obj, cat_p2)?[..] {
            if only == p2 {
                puzzle.mark_false(obj, p1)?;
            }
        }
    }

    if cat_p1 != cat_obj {
        if let [only] = puzzle.neighbors_in(p1, cat_obj)?[..] {
            if only != obj {
                puzzle.mark_true(obj, p2)?;
            }
        }
    }
    if cat_p2 != cat_obj {
        if let [only] = puzzle.neighbors_in(p2, cat_obj)?[..] {
            if only != obj {
                puzzle.mark_true(obj, p1)?;
            }
        }
    }

    if cat_p1 != cat_p2 {
        if cat_p2 != cat_obj {
            if let [pinned] = puzzle.neighbors_in(p1, cat_p2)?[..] {
                for other in puzzle.category_items(cat_p2).to_vec() {
                    if other != pinned && other != p2 {
                        puzzle.mark_false(obj, other)?;
                    }
                }
            }
        }
        if cat_p1 != cat_obj {
            if let [pinned] = puzzle.neighbors_in(p2, cat_p1)?[..] {
                for other in puzzle.category_items(cat_p1).to_vec() {
                    if other != pinned && other != p1 {
                        puzzle.mark_false(obj, other)?;
                    }
                }
            }
        }
    }

    Ok(())
}
