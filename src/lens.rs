use crate::*;

/// A region of a medial graph enclosed by two geodesic walks from the south pole to
/// the north pole.
///
/// Lenses order by their number of inner faces first, so the first element of a
/// sorted lens set is a minimal lens.
#[derive(Debug, Clone)]
pub struct Lens {
    graph: PlaneGraph<MedialVertex>,
    left: Walk<MedialVertex>,
    right: Walk<MedialVertex>,
    inner_faces: BTreeSet<Circuit<MedialVertex>>,
}

impl Lens {
    pub fn new(
        graph: PlaneGraph<MedialVertex>,
        left: Walk<MedialVertex>,
        right: Walk<MedialVertex>,
    ) -> Result<Self> {
        let mut inner_faces = graph.faces()?;
        if let Some(first) = left.first() {
            let outer = graph.get_face(first)?;
            inner_faces.remove(&outer);
        }

        Ok(Self {
            graph,
            left,
            right,
            inner_faces,
        })
    }

    pub fn graph(&self) -> &PlaneGraph<MedialVertex> {
        &self.graph
    }

    pub fn left_boundary(&self) -> &Walk<MedialVertex> {
        &self.left
    }

    pub fn right_boundary(&self) -> &Walk<MedialVertex> {
        &self.right
    }

    pub fn inner_edges(&self) -> BTreeSet<UndirectedEdge<MedialVertex>> {
        let boundary: BTreeSet<_> = self
            .left
            .edges_undirected()
            .union(&self.right.edges_undirected())
            .copied()
            .collect();
        self.graph
            .edges()
            .into_iter()
            .filter(|e| !boundary.contains(e))
            .collect()
    }

    pub fn inner_edge_tails(&self) -> BTreeSet<EdgeTail<MedialVertex>> {
        let mut darts = self.graph.edge_tails();
        for e in self.left.darts().iter().chain(self.right.darts()) {
            darts.remove(e);
        }
        darts
    }

    pub fn is_boundary_vertex(&self, v: MedialVertex) -> bool {
        self.left.contains(v) || self.right.contains(v)
    }

    pub fn inner_faces(&self) -> &BTreeSet<Circuit<MedialVertex>> {
        &self.inner_faces
    }

    pub fn number_of_inner_faces(&self) -> usize {
        self.inner_faces.len()
    }

    /// Inner faces sharing an edge with either boundary.
    pub fn boundary_faces(&self) -> BTreeSet<Circuit<MedialVertex>> {
        self.inner_faces
            .iter()
            .filter(|f| f.shares_edges_with(&self.left) || f.shares_edges_with(&self.right))
            .cloned()
            .collect()
    }

    pub fn south_pole(&self) -> MedialVertex {
        self.left.start()
    }

    pub fn north_pole(&self) -> MedialVertex {
        self.left.end()
    }

    pub fn poles(&self) -> [MedialVertex; 2] {
        [self.south_pole(), self.north_pole()]
    }

    /// Whether `circuit` touches one of the poles.
    pub fn is_polar(&self, circuit: &Circuit<MedialVertex>) -> bool {
        circuit.contains(self.south_pole()) || circuit.contains(self.north_pole())
    }
}

impl PartialEq for Lens {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

impl Eq for Lens {}

impl PartialOrd for Lens {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Lens {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number_of_inner_faces()
            .cmp(&other.number_of_inner_faces())
            .then_with(|| self.left.cmp(&other.left))
            .then_with(|| self.right.cmp(&other.right))
    }
}

impl Deref for Lens {
    type Target = PlaneGraph<MedialVertex>;

    fn deref(&self) -> &PlaneGraph<MedialVertex> {
        &self.graph
    }
}
