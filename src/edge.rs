use crate::*;

/// Which end of an [`UndirectedEdge`] a dart starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An edge with an integer identity and two (possibly equal) ends.
///
/// Equality, ordering and hashing only look at the id; the ends are payload.
#[derive(Debug, Clone, Copy)]
pub struct UndirectedEdge<V> {
    id: usize,
    left: V,
    right: V,
}

impl<V: Node> UndirectedEdge<V> {
    pub fn new(id: usize, left: V, right: V) -> Self {
        Self { id, left, right }
    }

    pub fn id(self) -> usize {
        self.id
    }

    pub fn left(self) -> V {
        self.left
    }

    pub fn right(self) -> V {
        self.right
    }

    pub fn ends(self) -> [V; 2] {
        [self.left, self.right]
    }

    /// The set of end vertices, one element for a loop.
    pub fn vertices(self) -> BTreeSet<V> {
        BTreeSet::from(self.ends())
    }

    pub fn is_loop(self) -> bool {
        self.left == self.right
    }

    pub fn is_parallel_to(self, other: Self) -> bool {
        self.vertices() == other.vertices()
    }

    pub fn is_incident_to(self, v: V) -> bool {
        self.left == v || self.right == v
    }

    pub fn is_adjacent_to(self, other: Self) -> bool {
        self.ends().into_iter().any(|v| other.is_incident_to(v))
    }

    /// The vertex reached by traversing the edge from `v`.
    pub fn other_end(self, v: V) -> Option<V> {
        if v == self.left {
            Some(self.right)
        } else if v == self.right {
            Some(self.left)
        } else {
            None
        }
    }

    /// The unique vertex shared with `other`, if there is exactly one.
    pub fn shared_vertex(self, other: Self) -> Option<V> {
        let shared: Vec<V> = self
            .ends()
            .into_iter()
            .filter(|&v| other.is_incident_to(v))
            .collect();

        match shared[..] {
            [v] => Some(v),
            _ => None,
        }
    }

    pub fn connects_vertices_in(self, vertices: &BTreeSet<V>) -> bool {
        vertices.contains(&self.left) && vertices.contains(&self.right)
    }

    pub fn tail(self, side: Side) -> EdgeTail<V> {
        EdgeTail::new(self, side)
    }

    pub fn left_tail(self) -> EdgeTail<V> {
        self.tail(Side::Left)
    }

    pub fn right_tail(self) -> EdgeTail<V> {
        self.tail(Side::Right)
    }
}

impl<V> PartialEq for UndirectedEdge<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V> Eq for UndirectedEdge<V> {}

impl<V> PartialOrd for UndirectedEdge<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for UndirectedEdge<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<V> Hash for UndirectedEdge<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<V: Display> Display for UndirectedEdge<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[e{}]{{{}, {}}}", self.id, self.left, self.right)
    }
}

/// A dart: one directed traversal of an edge.
///
/// Ordered by edge id first, then by side with `Left < Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeTail<V> {
    edge: UndirectedEdge<V>,
    side: Side,
}

impl<V: Node> EdgeTail<V> {
    pub fn new(edge: UndirectedEdge<V>, side: Side) -> Self {
        Self { edge, side }
    }

    pub fn edge(self) -> UndirectedEdge<V> {
        self.edge
    }

    pub fn side(self) -> Side {
        self.side
    }

    pub fn id(self) -> usize {
        self.edge.id
    }

    pub fn other_side(self) -> Self {
        Self::new(self.edge, self.side.other())
    }

    pub fn source(self) -> V {
        match self.side {
            Side::Left => self.edge.left,
            Side::Right => self.edge.right,
        }
    }

    pub fn target(self) -> V {
        match self.side {
            Side::Left => self.edge.right,
            Side::Right => self.edge.left,
        }
    }

    pub fn is_loop(self) -> bool {
        self.edge.is_loop()
    }

    pub fn is_parallel_to(self, other: Self) -> bool {
        self.edge.is_parallel_to(other.edge)
    }

    /// Whether `other` can follow this dart in a walk.
    pub fn is_continued_by(self, other: Self) -> bool {
        self.target() == other.source()
    }
}

impl<V: Node> Display for EdgeTail<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[e{}]({} -> {})", self.id(), self.source(), self.target())
    }
}
