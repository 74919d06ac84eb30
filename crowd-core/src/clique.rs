//! Arena of informant cliques indexed by member vertex.
//!
//! Cliques are stored once in an arena and referred to by [`CliqueId`]. Each
//! vertex maps to the ids of the cliques it belongs to, so growing a clique
//! never requires shared ownership between vertices.

use std::collections::HashMap;

/// Index of a clique inside a [`CliqueRegistry`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CliqueId(usize);

impl CliqueId {
    /// Returns the arena slot.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-query registry of cliques of pairwise independent informants.
///
/// Members are kept sorted, so set operations are linear merges. The same
/// member set may be registered more than once; each registration gets its
/// own id.
///
/// # Examples
/// ```
/// use crowd_core::CliqueRegistry;
///
/// let mut registry = CliqueRegistry::default();
/// let ab = registry.register_pair(0, 1);
/// let ac = registry.register_pair(0, 2);
/// let grown = registry.union(ab, ac);
/// assert_eq!(grown, vec![0, 1, 2]);
///
/// let abc = registry.insert(grown);
/// assert_eq!(registry.cliques_of(2), &[ac, abc]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CliqueRegistry {
    arena: Vec<Vec<usize>>,
    by_vertex: HashMap<usize, Vec<CliqueId>>,
}

impl CliqueRegistry {
    /// Registers the two-member clique `{a, b}` under both vertices.
    pub fn register_pair(&mut self, a: usize, b: usize) -> CliqueId {
        let mut members = vec![a, b];
        members.sort_unstable();
        members.dedup();
        self.insert_sorted(members)
    }

    /// Registers `members` under every member vertex.
    pub fn insert(&mut self, mut members: Vec<usize>) -> CliqueId {
        members.sort_unstable();
        members.dedup();
        self.insert_sorted(members)
    }

    fn insert_sorted(&mut self, members: Vec<usize>) -> CliqueId {
        let id = CliqueId(self.arena.len());
        for &vertex in &members {
            self.by_vertex.entry(vertex).or_default().push(id);
        }
        self.arena.push(members);
        id
    }

    /// Returns the cliques containing `vertex`, oldest first.
    #[must_use]
    pub fn cliques_of(&self, vertex: usize) -> &[CliqueId] {
        self.by_vertex.get(&vertex).map_or(&[], Vec::as_slice)
    }

    /// Returns the sorted members of `id`, or an empty slice for an id this
    /// registry did not issue.
    #[must_use]
    pub fn members(&self, id: CliqueId) -> &[usize] {
        self.arena.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of members of `id`.
    #[must_use]
    pub fn size(&self, id: CliqueId) -> usize {
        self.members(id).len()
    }

    /// Returns the sorted union of the members of `left` and `right`.
    #[must_use]
    pub fn union(&self, left: CliqueId, right: CliqueId) -> Vec<usize> {
        let (left, right) = (self.members(left), self.members(right));
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(left[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(right[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(left[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    }

    /// Returns the number of registered cliques.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns whether no clique has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
