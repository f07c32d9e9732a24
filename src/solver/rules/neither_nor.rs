use crate::{
    error::Result,
    solver::{
        puzzle::{ItemId, Puzzle},
        rule::{Rule, RuleDescriptor},
    },
};

/// Encodes "`obj` is matched to neither `p1` nor `p2`", which also records
/// that `p1` and `p2` are distinct slots.
///
/// All three eliminations are single edge removals, so one application fully
/// satisfies the clue. The `p1`–`p2` removal is a no-op when the two share a
/// category, since no intra-category edge exists to begin with.
#[derive(Debug, Clone)]
pub struct NeitherNorRule {
    pub obj: ItemId,
    pub p1: ItemId,
    pub p2: ItemId,
}

impl NeitherNorRule {
    pub fn new(obj: ItemId, p1: ItemId, p2: ItemId) -> Self {
        Self { obj, p1, p2 }
    }
}

impl Rule for NeitherNorRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: "NeitherNorRule".to_string(),
            description: format!("NeitherNor(?{}, {{?{}, ?{}}})", self.obj, self.p1, self.p2),
        }
    }

    fn apply(&self, puzzle: &mut Puzzle) -> Result<()> {
        puzzle.mark_false(self.obj, self.p1)?;
        puzzle.mark_false(self.obj, self.p2)?;
        puzzle.mark_false(self.p1, self.p2)?;
        Ok(())
    }
}
