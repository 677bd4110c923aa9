use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn steps(self) -> isize {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

/// Circular sequence, stored as a vector with modular indexing.
///
/// Around a vertex of a [`PlaneGraph`] this holds the outgoing darts in clockwise order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RotationList<T>(Vec<T>);

impl<T> Default for RotationList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> RotationList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.0.last()
    }

    pub fn push(&mut self, x: T) {
        self.0.push(x);
    }

    pub fn insert(&mut self, index: usize, x: T) {
        self.0.insert(index, x);
    }

    /// Element at `index` taken modulo the length (negative indices wrap).
    pub fn get_mod(&self, index: isize) -> Option<&T> {
        if self.0.is_empty() {
            return None;
        }
        let len = self.0.len() as isize;
        self.0.get(index.rem_euclid(len) as usize)
    }
}

impl<T: PartialEq> RotationList<T> {
    pub fn contains(&self, x: &T) -> bool {
        self.0.contains(x)
    }

    pub fn index_of(&self, x: &T) -> Option<usize> {
        self.0.iter().position(|y| y == x)
    }

    /// The element `steps` positions after `elem`.
    pub fn rotate_by(&self, elem: &T, steps: isize) -> Option<&T> {
        let index = self.index_of(elem)?;
        self.get_mod(index as isize + steps)
    }

    pub fn rotate_at(&self, elem: &T, dir: RotationDirection) -> Option<&T> {
        self.rotate_by(elem, dir.steps())
    }

    pub fn next_after(&self, elem: &T) -> Option<&T> {
        self.rotate_by(elem, 1)
    }

    pub fn prev_before(&self, elem: &T) -> Option<&T> {
        self.rotate_by(elem, -1)
    }

    /// Removes the first occurrence of `x`; returns whether it was present.
    pub fn remove(&mut self, x: &T) -> bool {
        match self.index_of(x) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }
}

impl<T> From<Vec<T>> for RotationList<T> {
    fn from(v: Vec<T>) -> Self {
        Self(v)
    }
}

impl<T> FromIterator<T> for RotationList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for RotationList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RotationList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
