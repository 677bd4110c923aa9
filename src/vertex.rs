use crate::*;

/// Vertex type of a [`PlaneGraph`].
///
/// Vertices are plain values identified by an integer; two vertices are equal iff
/// their ids are equal.
pub trait Node: Copy + Ord + Hash + Debug + Display {
    fn id(self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(pub usize);

impl Node for Vertex {
    fn id(self) -> usize {
        self.0
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Vertex {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

/// Vertex of a [`MedialGraph`], standing for an edge of the underlying graph.
///
/// Shares its id with the underlying edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MedialVertex(UndirectedEdge<Vertex>);

impl MedialVertex {
    pub fn new(underlying: UndirectedEdge<Vertex>) -> Self {
        Self(underlying)
    }

    pub fn underlying_edge(self) -> UndirectedEdge<Vertex> {
        self.0
    }
}

impl Node for MedialVertex {
    fn id(self) -> usize {
        self.0.id()
    }
}

impl Display for MedialVertex {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0.id())
    }
}
