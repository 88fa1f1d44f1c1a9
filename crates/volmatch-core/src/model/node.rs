//! Shared vertex capability for events and volunteers.
//!
//! Identity is the node name compared case-insensitively. The same ordering
//! sorts the registry's collections and every adjacency list, so lookups can
//! binary-search either one.

use std::cmp::Ordering;
use std::fmt;

/// Which side of the bipartite graph a node lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Event,
    Volunteer,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Volunteer => "volunteer",
        }
    }

    /// The kind found in this node's adjacency list.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Event => Self::Volunteer,
            Self::Volunteer => Self::Event,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two names ignoring case.
#[must_use]
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive name equality, consistent with [`cmp_ignore_case`].
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    cmp_ignore_case(a, b) == Ordering::Equal
}

/// Names of the counterpart nodes a node is matched to.
///
/// Kept sorted by [`cmp_ignore_case`] after every insertion. The list does
/// not reject duplicates itself; callers check [`Adjacency::contains`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    names: Vec<String>,
}

impl Adjacency {
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Append `name` and restore sorted order.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
        self.names.sort_by(|a, b| cmp_ignore_case(a, b));
    }

    /// Remove the first entry matching `name`. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| eq_ignore_case(n, name)) {
            Some(pos) => {
                self.names.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| eq_ignore_case(n, name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// A named vertex with an adjacency list.
pub trait Node {
    /// Side of the graph this node type belongs to.
    const KIND: NodeKind;

    /// The node's identifier, as originally spelled.
    fn name(&self) -> &str;

    /// Counterpart names this node is matched to.
    fn adjacency(&self) -> &Adjacency;

    /// Whether a counterpart named `name` is matched to this node.
    fn is_adjacent(&self, name: &str) -> bool {
        self.adjacency().contains(name)
    }

    /// Order two nodes by case-insensitive name.
    fn compare<N: Node + ?Sized>(&self, other: &N) -> Ordering {
        cmp_ignore_case(self.name(), other.name())
    }

    /// Whether this node answers to `name`.
    fn has_name(&self, name: &str) -> bool {
        eq_ignore_case(self.name(), name)
    }
}

/// Adjacency mutation, reserved for the registry.
pub(crate) trait NodeMut: Node {
    fn adjacency_mut(&mut self) -> &mut Adjacency;

    fn add_adjacent(&mut self, other: &str) {
        self.adjacency_mut().insert(other);
    }

    fn remove_adjacent(&mut self, other: &str) -> bool {
        self.adjacency_mut().remove(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_ignores_case() {
        assert_eq!(cmp_ignore_case("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp_ignore_case("Zoo", "ant"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("GALA", "gala"), Ordering::Equal);
        assert!(eq_ignore_case("Field Trip", "field trip"));
        assert!(!eq_ignore_case("Gala", "Gala2"));
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(cmp_ignore_case("Ann", "anna"), Ordering::Less);
    }

    #[test]
    fn insert_keeps_sorted_order() {
        let mut adj = Adjacency::new();
        adj.insert("mingi");
        adj.insert("Bo");
        adj.insert("cy");
        adj.insert("Ann");
        let names: Vec<&str> = adj.iter().collect();
        assert_eq!(names, ["Ann", "Bo", "cy", "mingi"]);
    }

    #[test]
    fn remove_matches_case_insensitively() {
        let mut adj = Adjacency::new();
        adj.insert("Sonu");
        assert!(adj.contains("SONU"));
        assert!(adj.remove("sonu"));
        assert!(adj.is_empty());
        assert!(!adj.remove("sonu"));
    }

    #[test]
    fn remove_takes_only_first_duplicate() {
        let mut adj = Adjacency::new();
        adj.insert("Ann");
        adj.insert("ann");
        assert_eq!(adj.len(), 2);
        assert!(adj.remove("ANN"));
        assert_eq!(adj.len(), 1);
    }

    #[test]
    fn kinds_are_counterparts() {
        assert_eq!(NodeKind::Event.counterpart(), NodeKind::Volunteer);
        assert_eq!(NodeKind::Volunteer.counterpart(), NodeKind::Event);
        assert_eq!(NodeKind::Volunteer.to_string(), "volunteer");
    }
}
