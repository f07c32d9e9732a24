use std::collections::HashMap;

use im::HashMap as ImHashMap;
use im::HashSet;
use tracing::{debug, trace};

use crate::error::{Result, SolverError};

pub type ItemId = u32;
pub type CategoryId = u32;

#[derive(Debug, Clone)]
struct CategoryInfo {
    name: String,
    items: Vec<ItemId>,
    ordinal: bool,
}

#[derive(Debug, Clone)]
struct ItemInfo {
    name: String,
    category: CategoryId,
    /// Set only for items of an ordinal category.
    value: Option<i64>,
}

/// The incidence model for a logic grid puzzle.
///
/// Holds the categories, their items, and the *possibility graph*: an
/// undirected graph in which an edge between two items of different
/// categories means "not yet ruled out as referring to the same slot".
/// The graph starts complete (every inter-category pair) and only ever
/// shrinks; there are never edges between items of the same category.
///
/// Alongside the graph, the puzzle maintains an answer map: once an item's
/// match in some category is certain, the pairing is recorded in both
/// directions and never unset.
///
/// All mutation goes through the two primitives [`Puzzle::mark_false`] and
/// [`Puzzle::mark_true`]; everything else is a read-only view.
#[derive(Debug, Clone)]
pub struct Puzzle {
    categories: Vec<CategoryInfo>,
    items: Vec<ItemInfo>,
    by_name: HashMap<String, ItemId>,
    adjacency: Vec<HashSet<ItemId>>,
    answers: Vec<ImHashMap<CategoryId, ItemId>>,
    edge_count: usize,
}

/// Builder for [`Puzzle`]. Categories are added in order; `build` validates
/// the whole configuration at once.
#[derive(Debug, Default)]
pub struct PuzzleBuilder {
    categories: Vec<(String, Vec<(String, Option<i64>)>)>,
}

impl PuzzleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain (unordered) category with the given item names.
    pub fn category<N, I, S>(mut self, name: N, items: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(|s| (s.into(), None)).collect();
        self.categories.push((name.into(), items));
        self
    }

    /// Adds an ordinal category whose items are integer values, enabling
    /// delta/comparison clues against it. Item names are the decimal
    /// renderings of the values.
    pub fn ordinal_category<N, I>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = i64>,
    {
        let items = values
            .into_iter()
            .map(|v| (v.to_string(), Some(v)))
            .collect();
        self.categories.push((name.into(), items));
        self
    }

    /// Validates the configuration and builds the complete inter-category
    /// possibility graph.
    pub fn build(self) -> Result<Puzzle> {
        if self.categories.len() < 2 {
            return Err(SolverError::Configuration(
                "a puzzle needs at least two categories".to_string(),
            )
            .into());
        }

        let cardinality = self.categories[0].1.len();
        if cardinality == 0 {
            return Err(SolverError::Configuration(format!(
                "category '{}' has no items",
                self.categories[0].0
            ))
            .into());
        }

        let mut categories: Vec<CategoryInfo> = Vec::with_capacity(self.categories.len());
        let mut items: Vec<ItemInfo> = Vec::new();
        let mut by_name: HashMap<String, ItemId> = HashMap::new();

        for (name, members) in self.categories {
            if members.is_empty() {
                return Err(SolverError::Configuration(format!(
                    "category '{name}' has no items"
                ))
                .into());
            }
            if members.len() != cardinality {
                return Err(SolverError::Configuration(format!(
                    "category '{}' has {} items, expected {}",
                    name,
                    members.len(),
                    cardinality
                ))
                .into());
            }
            if categories.iter().any(|c| c.name == name) {
                return Err(
                    SolverError::Configuration(format!("duplicate category '{name}'")).into(),
                );
            }

            let category_id = categories.len() as CategoryId;
            let ordinal = members.iter().all(|(_, v)| v.is_some());
            let mut member_ids = Vec::with_capacity(members.len());
            for (item_name, value) in members {
                let item_id = items.len() as ItemId;
                if by_name.insert(item_name.clone(), item_id).is_some() {
                    return Err(SolverError::Configuration(format!(
                        "duplicate item '{item_name}'"
                    ))
                    .into());
                }
                items.push(ItemInfo {
                    name: item_name,
                    category: category_id,
                    value,
                });
                member_ids.push(item_id);
            }
            categories.push(CategoryInfo {
                name,
                items: member_ids,
                ordinal,
            });
        }

        // Complete graph between every pair of items from different
        // categories, no edges within a category.
        let mut adjacency = vec![HashSet::new(); items.len()];
        let mut edge_count = 0;
        for (i, a) in categories.iter().enumerate() {
            for b in categories.iter().skip(i + 1) {
                for &x in &a.items {
                    for &y in &b.items {
                        adjacency[x as usize].insert(y);
                        adjacency[y as usize].insert(x);
                        edge_count += 1;
                    }
                }
            }
        }

        let answers = vec![ImHashMap::new(); items.len()];

        Ok(Puzzle {
            categories,
            items,
            by_name,
            adjacency,
            answers,
            edge_count,
        })
    }
}

impl Puzzle {
    pub fn builder() -> PuzzleBuilder {
        PuzzleBuilder::new()
    }

    fn check_item(&self, item: ItemId) -> Result<()> {
        if (item as usize) < self.items.len() {
            Ok(())
        } else {
            Err(SolverError::InvariantViolation(format!("unknown item id {item}")).into())
        }
    }

    fn check_category(&self, category: CategoryId) -> Result<()> {
        if (category as usize) < self.categories.len() {
            Ok(())
        } else {
            Err(SolverError::InvariantViolation(format!("unknown category id {category}")).into())
        }
    }

    /// Resolves an item name, as used in clue definitions.
    pub fn item(&self, name: &str) -> Result<ItemId> {
        self.by_name.get(name).copied().ok_or_else(|| {
            SolverError::Configuration(format!("unknown item '{name}'")).into()
        })
    }

    /// Resolves a category name, as used in clue definitions.
    pub fn category(&self, name: &str) -> Result<CategoryId> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .map(|i| i as CategoryId)
            .ok_or_else(|| SolverError::Configuration(format!("unknown category '{name}'")).into())
    }

    pub fn item_name(&self, item: ItemId) -> &str {
        &self.items[item as usize].name
    }

    pub fn category_name(&self, category: CategoryId) -> &str {
        &self.categories[category as usize].name
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category_ids(&self) -> impl Iterator<Item = CategoryId> {
        0..self.categories.len() as CategoryId
    }

    /// The items of a category, in the order they were declared.
    pub fn category_items(&self, category: CategoryId) -> &[ItemId] {
        &self.categories[category as usize].items
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> {
        0..self.items.len() as ItemId
    }

    pub fn is_ordinal(&self, category: CategoryId) -> bool {
        self.categories[category as usize].ordinal
    }

    /// The single category containing `item`.
    pub fn category_of(&self, item: ItemId) -> Result<CategoryId> {
        self.check_item(item)?;
        Ok(self.items[item as usize].category)
    }

    /// The integer value of an ordinal category's item, `None` otherwise.
    pub fn ordinal_value(&self, item: ItemId) -> Option<i64> {
        self.items.get(item as usize).and_then(|i| i.value)
    }

    /// Looks up the item of an ordinal category carrying `value`.
    pub fn item_for_value(&self, category: CategoryId, value: i64) -> Option<ItemId> {
        self.categories[category as usize]
            .items
            .iter()
            .copied()
            .find(|&i| self.items[i as usize].value == Some(value))
    }

    /// Current edge cardinality of the possibility graph. This is the
    /// engine's sole convergence signal.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn has_edge(&self, a: ItemId, b: ItemId) -> bool {
        self.adjacency
            .get(a as usize)
            .map(|adj| adj.contains(&b))
            .unwrap_or(false)
    }

    /// Rules out the pairing of `a` and `b`. Returns whether an edge was
    /// actually removed; ruling out an already-absent pairing is a no-op.
    pub fn mark_false(&mut self, a: ItemId, b: ItemId) -> Result<bool> {
        self.check_item(a)?;
        self.check_item(b)?;
        if !self.adjacency[a as usize].contains(&b) {
            return Ok(false);
        }
        self.adjacency[a as usize].remove(&b);
        self.adjacency[b as usize].remove(&a);
        self.edge_count -= 1;
        trace!(
            a = self.item_name(a),
            b = self.item_name(b),
            remaining = self.edge_count,
            "edge removed"
        );
        Ok(true)
    }

    /// Asserts that `a` and `b` are matched: every competing edge (other
    /// items of `a`'s category against `b`, and of `b`'s category against
    /// `a`) is removed, and the answer map is filled in both directions.
    ///
    /// Idempotent: re-asserting an established match changes nothing.
    /// Asserting a pairing that has already been ruled out, or that
    /// conflicts with an established answer, is a [`SolverError::Contradiction`].
    pub fn mark_true(&mut self, a: ItemId, b: ItemId) -> Result<()> {
        self.check_item(a)?;
        self.check_item(b)?;
        let ca = self.items[a as usize].category;
        let cb = self.items[b as usize].category;
        if ca == cb {
            return Err(SolverError::InvariantViolation(format!(
                "cannot match '{}' and '{}': both are in category '{}'",
                self.item_name(a),
                self.item_name(b),
                self.category_name(ca)
            ))
            .into());
        }
        if let Some(&prev) = self.answers[a as usize].get(&cb) {
            if prev != b {
                return Err(SolverError::Contradiction(format!(
                    "'{}' is already matched to '{}' in category '{}', cannot also match '{}'",
                    self.item_name(a),
                    self.item_name(prev),
                    self.category_name(cb),
                    self.item_name(b)
                ))
                .into());
            }
        }
        if !self.has_edge(a, b) {
            return Err(SolverError::Contradiction(format!(
                "'{}' and '{}' were asserted matched but that pairing was already ruled out",
                self.item_name(a),
                self.item_name(b)
            ))
            .into());
        }

        debug!(a = self.item_name(a), b = self.item_name(b), "matched");

        let peers_a = self.categories[ca as usize].items.clone();
        for n in peers_a {
            if n != a {
                self.mark_false(n, b)?;
            }
        }
        let peers_b = self.categories[cb as usize].items.clone();
        for n in peers_b {
            if n != b {
                self.mark_false(n, a)?;
            }
        }

        self.answers[a as usize].insert(cb, b);
        self.answers[b as usize].insert(ca, a);
        Ok(())
    }

    /// All items still possibly matched to `item`, in ascending id order.
    pub fn neighbors(&self, item: ItemId) -> Result<Vec<ItemId>> {
        self.check_item(item)?;
        let mut out: Vec<ItemId> = self.adjacency[item as usize].iter().copied().collect();
        out.sort_unstable();
        Ok(out)
    }

    /// The surviving neighbors of `item` within one category. Looking an
    /// item up against its own category is a logic error.
    pub fn neighbors_in(&self, item: ItemId, category: CategoryId) -> Result<Vec<ItemId>> {
        self.check_item(item)?;
        self.check_category(category)?;
        if self.items[item as usize].category == category {
            return Err(SolverError::InvariantViolation(format!(
                "neighbor lookup for '{}' against its own category '{}'",
                self.item_name(item),
                self.category_name(category)
            ))
            .into());
        }
        let adj = &self.adjacency[item as usize];
        Ok(self.categories[category as usize]
            .items
            .iter()
            .copied()
            .filter(|n| adj.contains(n))
            .collect())
    }

    /// Surviving neighbors partitioned by category, excluding `item`'s own.
    pub fn neighbors_by_category(&self, item: ItemId) -> Result<ImHashMap<CategoryId, Vec<ItemId>>> {
        let own = self.category_of(item)?;
        let mut out = ImHashMap::new();
        for category in self.category_ids() {
            if category != own {
                out.insert(category, self.neighbors_in(item, category)?);
            }
        }
        Ok(out)
    }

    /// Surviving neighbor counts per category, excluding `item`'s own.
    pub fn degree_by_category(&self, item: ItemId) -> Result<ImHashMap<CategoryId, usize>> {
        let own = self.category_of(item)?;
        let adj = &self.adjacency[item as usize];
        let mut out = ImHashMap::new();
        for category in self.category_ids() {
            if category != own {
                let count = self.categories[category as usize]
                    .items
                    .iter()
                    .filter(|n| adj.contains(n))
                    .count();
                out.insert(category, count);
            }
        }
        Ok(out)
    }

    /// The established match for `item` in `category`, if certainty has been
    /// reached.
    pub fn answer(&self, item: ItemId, category: CategoryId) -> Option<ItemId> {
        self.answers
            .get(item as usize)
            .and_then(|m| m.get(&category).copied())
    }

    /// The full answer map for `item`: category → matched item, for every
    /// category where certainty has been reached so far.
    pub fn answers_for(&self, item: ItemId) -> &ImHashMap<CategoryId, ItemId> {
        &self.answers[item as usize]
    }
}
