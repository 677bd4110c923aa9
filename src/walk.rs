use crate::*;

/// Reasons a dart sequence is not a valid walk, circuit or cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("edge list must not be empty")]
    Empty,
    #[error("consecutive edges in a walk must be adjacent")]
    NotContiguous,
    #[error("circuit must be closed")]
    NotClosed,
    #[error("circuit must not contain repeated edges")]
    RepeatedEdge,
    #[error("cycle must not contain repeated vertices")]
    RepeatedVertex,
    #[error("graph must be connected")]
    Disconnected,
    #[error("no geodesic walk from {from} to {to}")]
    Unreachable { from: String, to: String },
}

/// A start vertex followed by a sequence of darts, each starting where the previous ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Walk<V> {
    start: V,
    darts: Vec<EdgeTail<V>>,
}

impl<V: Node> Walk<V> {
    /// The walk of length zero sitting at `start`.
    pub fn trivial(start: V) -> Self {
        Self {
            start,
            darts: Vec::new(),
        }
    }

    pub fn new(darts: Vec<EdgeTail<V>>) -> Result<Self, WalkError> {
        let start = darts.first().ok_or(WalkError::Empty)?.source();
        or_err(
            darts.windows(2).all(|w| w[0].is_continued_by(w[1])),
            WalkError::NotContiguous,
        )?;

        Ok(Self { start, darts })
    }

    pub fn len(&self) -> usize {
        self.darts.len()
    }

    pub fn is_trivial(&self) -> bool {
        self.darts.is_empty()
    }

    pub fn start(&self) -> V {
        self.start
    }

    pub fn end(&self) -> V {
        self.darts.last().map_or(self.start, |e| e.target())
    }

    pub fn darts(&self) -> &[EdgeTail<V>] {
        &self.darts
    }

    pub fn first(&self) -> Option<EdgeTail<V>> {
        self.darts.first().copied()
    }

    pub fn last(&self) -> Option<EdgeTail<V>> {
        self.darts.last().copied()
    }

    /// Visited vertices in order, including both start and end.
    pub fn vertex_list(&self) -> Vec<V> {
        std::iter::once(self.start)
            .chain(self.darts.iter().map(|e| e.target()))
            .collect()
    }

    pub fn vertices(&self) -> BTreeSet<V> {
        self.vertex_list().into_iter().collect()
    }

    pub fn dart_set(&self) -> BTreeSet<EdgeTail<V>> {
        self.darts.iter().copied().collect()
    }

    pub fn edges_undirected(&self) -> BTreeSet<UndirectedEdge<V>> {
        self.darts.iter().map(|e| e.edge()).collect()
    }

    pub fn contains(&self, v: V) -> bool {
        v == self.start || self.darts.iter().any(|e| e.target() == v)
    }

    pub fn intersect_vertices(&self, other: &Self) -> BTreeSet<V> {
        self.vertices()
            .intersection(&other.vertices())
            .copied()
            .collect()
    }

    pub fn intersect_edges(&self, other: &Self) -> BTreeSet<UndirectedEdge<V>> {
        self.edges_undirected()
            .intersection(&other.edges_undirected())
            .copied()
            .collect()
    }

    pub fn shares_edges_with(&self, other: &Self) -> bool {
        let edges = other.edges_undirected();
        self.darts.iter().any(|e| edges.contains(&e.edge()))
    }

    pub fn is_closed(&self) -> bool {
        self.start == self.end()
    }

    pub fn has_repeated_edges(&self) -> bool {
        self.dart_set().len() != self.len()
    }

    pub fn has_repeated_vertices(&self) -> bool {
        let list = self.vertex_list();
        list.iter().collect::<BTreeSet<_>>().len() != list.len()
    }

    pub fn is_trail(&self) -> bool {
        !self.has_repeated_edges()
    }

    pub fn is_path(&self) -> bool {
        !self.has_repeated_vertices()
    }

    pub fn is_circuit(&self) -> bool {
        self.is_closed() && self.is_trail()
    }

    /// A circuit whose only repeated vertex is the start, reached again at the end.
    pub fn is_cycle(&self) -> bool {
        if !self.is_circuit() {
            return false;
        }
        let list = self.vertex_list();
        if list.len() < 2 {
            return true;
        }
        let inner = &list[1..list.len() - 1];
        let distinct: BTreeSet<_> = inner.iter().collect();
        distinct.len() == inner.len() && !distinct.contains(&self.start)
    }

    pub fn to_circuit(&self) -> Result<Circuit<V>, WalkError> {
        if self.is_trivial() {
            Ok(Circuit::trivial(self.start))
        } else {
            Circuit::new(self.darts.clone())
        }
    }

    pub fn to_cycle(&self) -> Result<Cycle<V>, WalkError> {
        Cycle::new(self.darts.clone())
    }
}

impl<V: Node> PartialOrd for Walk<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Node> Ord for Walk<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.darts.cmp(&other.darts))
    }
}

impl<V: Node> Display for Walk<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}", self.start)?;
        for e in &self.darts {
            write!(f, " -> {}", e.target())?;
        }
        write!(f, ")")
    }
}

/// A closed walk without repeated darts.
///
/// The dart sequence is rotated so that its smallest dart comes first, which makes two
/// circuits describing the same face compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Circuit<V>(Walk<V>);

impl<V: Node> Circuit<V> {
    pub fn trivial(start: V) -> Self {
        Self(Walk::trivial(start))
    }

    pub fn new(mut darts: Vec<EdgeTail<V>>) -> Result<Self, WalkError> {
        let min = darts
            .iter()
            .enumerate()
            .min_by_key(|&(_, e)| *e)
            .map(|(i, _)| i)
            .ok_or(WalkError::Empty)?;
        darts.rotate_left(min);

        let walk = Walk::new(darts)?;
        or_err(walk.is_closed(), WalkError::NotClosed)?;
        or_err(!walk.has_repeated_edges(), WalkError::RepeatedEdge)?;

        Ok(Self(walk))
    }

    pub fn as_walk(&self) -> &Walk<V> {
        &self.0
    }

    /// Visited vertices in order, without repeating the start at the end.
    pub fn vertex_list(&self) -> Vec<V> {
        let mut list = self.0.vertex_list();
        if list.len() > 1 {
            list.pop();
        }
        list
    }

    /// Number of distinct vertices.
    pub fn order(&self) -> usize {
        self.0.vertices().len()
    }

    pub fn rotation_list(&self) -> RotationList<EdgeTail<V>> {
        self.0.darts().iter().copied().collect()
    }

    pub fn has_repeated_vertices(&self) -> bool {
        let list = self.vertex_list();
        list.iter().collect::<BTreeSet<_>>().len() != list.len()
    }

    pub fn is_cycle(&self) -> bool {
        !self.has_repeated_vertices()
    }

    pub fn is_loop(&self) -> bool {
        self.len() == 1
    }

    pub fn is_digon(&self) -> bool {
        self.len() == 2 && self.edges_undirected().len() == 2
    }

    pub fn is_triangle(&self) -> bool {
        self.len() == 3 && self.edges_undirected().len() == 3
    }

    pub fn to_cycle(&self) -> Result<Cycle<V>, WalkError> {
        or_err(self.is_cycle(), WalkError::RepeatedVertex)?;
        Ok(Cycle(self.clone()))
    }
}

impl<V> Deref for Circuit<V> {
    type Target = Walk<V>;

    fn deref(&self) -> &Walk<V> {
        &self.0
    }
}

impl<V: Node> PartialOrd for Circuit<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Node> Ord for Circuit<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<V: Node> Display for Circuit<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A circuit without repeated vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle<V>(Circuit<V>);

impl<V: Node> Cycle<V> {
    pub fn new(darts: Vec<EdgeTail<V>>) -> Result<Self, WalkError> {
        Circuit::new(darts)?.to_cycle()
    }

    pub fn as_circuit(&self) -> &Circuit<V> {
        &self.0
    }

    pub fn vertex_list_clockwise(&self) -> Vec<V> {
        let mut list = self.0.vertex_list();
        list.reverse();
        list
    }
}

impl<V> Deref for Cycle<V> {
    type Target = Circuit<V>;

    fn deref(&self) -> &Circuit<V> {
        &self.0
    }
}

impl<V: Node> PartialOrd for Cycle<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Node> Ord for Cycle<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<V: Node> Display for Cycle<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
