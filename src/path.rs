//! Tree addressing.
//!
//! A [`Path`] is the ordered sequence of child indices leading from the
//! document root to a node. The root itself has the empty path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index sequence addressing a node from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last index of the path, `None` for the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Parent path, `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, head) = self.0.split_last()?;
        Some(Self(head.to_vec()))
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Extend this path with a relative sequence of indices.
    pub fn join(&self, rest: &[usize]) -> Path {
        let mut indices = self.0.clone();
        indices.extend_from_slice(rest);
        Self(indices)
    }

    /// Path of the next sibling.
    pub fn next(&self) -> Option<Path> {
        let (last, head) = self.0.split_last()?;
        let mut indices = head.to_vec();
        indices.push(last.checked_add(1)?);
        Some(Self(indices))
    }

    /// Path of the previous sibling, `None` for a first child or the root.
    pub fn previous(&self) -> Option<Path> {
        let (last, head) = self.0.split_last()?;
        let mut indices = head.to_vec();
        indices.push(last.checked_sub(1)?);
        Some(Self(indices))
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// True if `self` equals `other` or is one of its ancestors.
    pub fn contains(&self, other: &Path) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Longest shared prefix of two paths.
    pub fn common(&self, other: &Path) -> Path {
        let shared = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count();
        Self(self.0.iter().take(shared).copied().collect())
    }

    /// The indices of `self` below `ancestor`, if `ancestor` contains it.
    pub fn relative_to(&self, ancestor: &Path) -> Option<&[usize]> {
        self.0.strip_prefix(ancestor.0.as_slice())
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}
