use crate::*;

/// The medial graph of a [`PlaneGraph`].
///
/// Every edge of the underlying graph becomes a medial vertex, and every pair of
/// consecutive edges along a face becomes a medial edge. The faces of the medial graph
/// are colored: black faces stand for underlying vertices, white faces for underlying
/// faces. Traversed clockwise, the left face of a medial dart is black and its right
/// face is white.
#[derive(Debug, Clone)]
pub struct MedialGraph {
    graph: PlaneGraph<MedialVertex>,
    black: HashMap<EdgeTail<MedialVertex>, Vertex>,
    white: HashMap<EdgeTail<MedialVertex>, EdgeTail<Vertex>>,
}

impl MedialGraph {
    pub fn new(underlying: &PlaneGraph<Vertex>) -> Result<Self> {
        let mut next_id = 0;
        let mut incidence: IncidenceMap<MedialVertex> = BTreeMap::new();
        let mut black = HashMap::new();
        let mut white = HashMap::new();

        for face in underlying.faces()? {
            let darts = face.darts();
            let n = darts.len();

            let edges: Vec<_> = (0..n)
                .map(|i| {
                    let left = MedialVertex::new(darts[(i + n - 1) % n].edge());
                    let right = MedialVertex::new(darts[i].edge());
                    let edge = UndirectedEdge::new(next_id + i, left, right);
                    white.insert(edge.left_tail(), darts[0]);
                    black.insert(edge.right_tail(), darts[i].source());
                    edge
                })
                .collect();
            next_id += n;

            for i in 0..n {
                let rotation = incidence
                    .entry(MedialVertex::new(darts[i].edge()))
                    .or_default();
                rotation.push(edges[i].right_tail());
                rotation.push(edges[(i + 1) % n].left_tail());
            }
        }

        Ok(Self {
            graph: PlaneGraph::from_incidence_map(incidence)?,
            black,
            white,
        })
    }

    pub fn graph(&self) -> &PlaneGraph<MedialVertex> {
        &self.graph
    }

    /// The dart that continues `e` straight through its target.
    ///
    /// Medial vertices have degree four, so going straight means skipping one dart in
    /// the rotation.
    pub fn direct_extension(
        &self,
        e: EdgeTail<MedialVertex>,
    ) -> Result<EdgeTail<MedialVertex>, NonIncidence> {
        let focus = e.target();
        self.graph
            .rotation(focus)
            .and_then(|rotation| rotation.rotate_by(&e.other_side(), 2))
            .copied()
            .ok_or_else(|| NonIncidence::new(e.other_side(), focus))
    }

    /// The geodesic circuit through `start`.
    pub fn geodesic_from(&self, start: EdgeTail<MedialVertex>) -> Result<Circuit<MedialVertex>> {
        let limit = self.graph.dart_count();
        let mut darts = vec![start];
        let mut cur = self.direct_extension(start)?;

        while cur != start {
            or_err(darts.len() < limit, WalkError::NotClosed)?;
            darts.push(cur);
            cur = self.direct_extension(cur)?;
        }

        Ok(Circuit::new(darts)?)
    }

    /// Follows the geodesic of `start` until it first reaches `dest`.
    pub fn geodesic_walk_between(
        &self,
        start: EdgeTail<MedialVertex>,
        dest: MedialVertex,
    ) -> Result<Walk<MedialVertex>> {
        if start.source() == dest {
            return Ok(Walk::trivial(dest));
        }

        let mut darts = vec![start];
        let mut cur = self.direct_extension(start)?;
        while cur != start && cur.source() != dest {
            darts.push(cur);
            cur = self.direct_extension(cur)?;
        }

        or_err(
            cur.source() == dest,
            WalkError::Unreachable {
                from: start.to_string(),
                to: dest.to_string(),
            },
        )?;

        Ok(Walk::new(darts)?)
    }

    /// All geodesics; every medial edge lies on exactly one.
    pub fn geodesics(&self) -> Result<BTreeSet<Circuit<MedialVertex>>> {
        let mut geodesics = BTreeSet::new();
        let mut visited = BTreeSet::new();

        for edge in self.graph.edges() {
            if !visited.contains(&edge) {
                let geodesic = self.geodesic_from(edge.left_tail())?;
                visited.extend(geodesic.edges_undirected());
                geodesics.insert(geodesic);
            }
        }

        Ok(geodesics)
    }

    pub fn geo_class_map(
        geodesics: &BTreeSet<Circuit<MedialVertex>>,
    ) -> BTreeMap<UndirectedEdge<MedialVertex>, usize> {
        geodesics
            .iter()
            .enumerate()
            .flat_map(|(class, geodesic)| {
                geodesic
                    .darts()
                    .iter()
                    .map(move |e| (e.edge(), class))
            })
            .collect()
    }

    pub fn vertex_geo_classes(
        &self,
        classes: &BTreeMap<UndirectedEdge<MedialVertex>, usize>,
        v: MedialVertex,
    ) -> BTreeSet<usize> {
        self.graph
            .incident_edge_tails(v)
            .iter()
            .filter_map(|e| classes.get(&e.edge()).copied())
            .collect()
    }

    /// All lenses, smallest first.
    ///
    /// Two vertices can only be the poles of a lens when they lie on the same set of
    /// geodesics.
    pub fn lenses(&self) -> Result<BTreeSet<Lens>> {
        let classes = Self::geo_class_map(&self.geodesics()?);
        let vertex_classes: BTreeMap<_, _> = self
            .graph
            .vertices()
            .map(|v| (v, self.vertex_geo_classes(&classes, v)))
            .collect();

        let mut lenses = BTreeSet::new();
        for (&south, south_classes) in &vertex_classes {
            for (&north, north_classes) in vertex_classes.range(..south) {
                if south_classes == north_classes {
                    lenses.extend(self.lenses_between_poles(south, north)?);
                }
            }
        }

        tracing::trace!("found {} lenses", lenses.len());
        Ok(lenses)
    }

    pub fn lenses_between_poles(
        &self,
        south: MedialVertex,
        north: MedialVertex,
    ) -> Result<Vec<Lens>> {
        let poles = BTreeSet::from([south, north]);
        let Some(south_darts) = self.graph.rotation(south) else {
            return Ok(Vec::new());
        };

        let mut lenses = Vec::new();
        for south_left in south_darts {
            let Some(&south_right) = south_darts.next_after(south_left) else {
                continue;
            };

            let left = self.geodesic_walk_between(*south_left, north)?;
            let right = self.geodesic_walk_between(south_right, north)?;
            if left.intersect_vertices(&right) != poles {
                continue;
            }

            let (Some(north_left), Some(north_right)) = (left.last(), right.last()) else {
                continue;
            };
            if self
                .graph
                .next_edge(north_right, RotationDirection::Clockwise)?
                == north_left.other_side()
            {
                lenses.push(self.lens_from_boundaries(left, right)?);
            }
        }

        Ok(lenses)
    }

    fn lens_from_boundaries(
        &self,
        left: Walk<MedialVertex>,
        right: Walk<MedialVertex>,
    ) -> Result<Lens> {
        let north = right.end();
        let on_boundary = |v: MedialVertex| left.contains(v) || right.contains(v);

        let mut inner_candidates = BTreeSet::new();
        for e in left.darts().iter().filter(|e| e.target() != north) {
            if let Some(v) = self.graph.prev_vertex(e.target(), e.source()) {
                if !on_boundary(v) {
                    inner_candidates.insert(v);
                }
            }
        }
        for e in right.darts().iter().filter(|e| e.target() != north) {
            if let Some(v) = self.graph.next_vertex(e.target(), e.source()) {
                if !on_boundary(v) {
                    inner_candidates.insert(v);
                }
            }
        }

        let mut vertices = left.vertices();
        vertices.extend(right.vertices());
        if let Some(&start) = inner_candidates.first() {
            let inner = self.connected_vertices(start, &vertices);
            vertices.extend(inner);
        }

        let graph = self.graph.vertex_induced_subgraph(&vertices)?;
        Lens::new(graph, left, right)
    }

    /// Vertices reachable from `start` without entering `boundary`.
    fn connected_vertices(
        &self,
        start: MedialVertex,
        boundary: &BTreeSet<MedialVertex>,
    ) -> BTreeSet<MedialVertex> {
        let mut visited = BTreeSet::new();
        let mut queue = BTreeSet::new();
        if !boundary.contains(&start) {
            queue.insert(start);
        }

        while let Some(v) = queue.pop_first() {
            visited.insert(v);
            for w in self.graph.neighbors(v) {
                if !boundary.contains(&w) && !visited.contains(&w) {
                    queue.insert(w);
                }
            }
        }

        visited
    }

    /// Whether `face` is black, i.e. stands for a vertex of the underlying graph.
    pub fn is_unmedial_vertex(&self, face: &Circuit<MedialVertex>) -> bool {
        face.first().is_some_and(|e| self.black.contains_key(&e))
    }

    pub fn to_unmedial_vertex(&self, face: &Circuit<MedialVertex>) -> Option<Vertex> {
        self.black.get(&face.first()?).copied()
    }

    /// A dart of the underlying face that the white `face` stands for.
    pub fn to_unmedial_face(&self, face: &Circuit<MedialVertex>) -> Option<EdgeTail<Vertex>> {
        self.white.get(&face.first()?).copied()
    }
}

impl Deref for MedialGraph {
    type Target = PlaneGraph<MedialVertex>;

    fn deref(&self) -> &PlaneGraph<MedialVertex> {
        &self.graph
    }
}
