use crate::*;

/// Outgoing darts of every vertex, in clockwise order.
pub type IncidenceMap<V> = BTreeMap<V, RotationList<EdgeTail<V>>>;

/// Reasons an incidence description does not define a plane graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGraph {
    #[error("edge {edge} is not incident to vertex {vertex}")]
    NotIncident { edge: String, vertex: String },
    #[error("edge id {0} is used for different vertex sets")]
    InconsistentEnds(usize),
    #[error("edge id {id} occurs {count} times instead of twice")]
    WrongMultiplicity { id: usize, count: usize },
    #[error("edge id {0} must not have more than two ends")]
    TooManyEnds(usize),
    #[error("no loops allowed in adjacency list format: {0}")]
    AdjacencyLoop(String),
    #[error("dart {dart} is stored at vertex {vertex}, which is not its source")]
    WrongSource { dart: String, vertex: String },
    #[error("edge id {0} needs exactly one left and one right dart")]
    WrongSides(usize),
    #[error("vertex {0} is listed more than once")]
    DuplicateVertex(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{element} is not incident to vertex {vertex}")]
pub struct NonIncidence {
    pub element: String,
    pub vertex: String,
}

impl NonIncidence {
    pub fn new(element: impl Display, vertex: impl Display) -> Self {
        Self {
            element: element.to_string(),
            vertex: vertex.to_string(),
        }
    }
}

/// A graph embedded in the plane, given by a rotation system.
///
/// The incidence map is the only state; vertex, edge and face sets are derived from it
/// on demand. Cloning takes an independent snapshot.
#[derive(Debug, Clone)]
pub struct PlaneGraph<V = Vertex> {
    incidence: IncidenceMap<V>,
    next_vertex_id: usize,
    next_edge_id: usize,
}

impl<V: Node> PlaneGraph<V> {
    /// Builds a graph from a ready-made incidence map.
    ///
    /// # Errors
    ///
    /// Fails unless every dart is incident to its key vertex, every edge id is used with a
    /// single set of ends, and every edge id occurs exactly twice.
    pub fn from_incidence_map(incidence: IncidenceMap<V>) -> Result<Self, InvalidGraph> {
        Self::validate(&incidence)?;

        let next_vertex_id = incidence.keys().next_back().map_or(0, |v| v.id() + 1);
        let next_edge_id = incidence
            .values()
            .flatten()
            .map(|e| e.id() + 1)
            .max()
            .unwrap_or(0);

        Ok(Self {
            incidence,
            next_vertex_id,
            next_edge_id,
        })
    }

    /// Builds a graph from clockwise lists of incident edge ids.
    ///
    /// The first vertex listing an id becomes the edge's left end, the second its right
    /// end; an id listed twice by the same vertex is a loop.
    pub fn from_incidence_list<I>(list: I) -> Result<Self, InvalidGraph>
    where
        I: IntoIterator<Item = (V, Vec<usize>)>,
    {
        let list = Self::collect_rows(list)?;

        let mut ends: BTreeMap<usize, (V, Option<V>)> = BTreeMap::new();
        for (&v, ids) in &list {
            for &id in ids {
                match ends.get_mut(&id) {
                    None => {
                        ends.insert(id, (v, None));
                    }
                    Some((_, right @ None)) => *right = Some(v),
                    Some(_) => return Err(InvalidGraph::TooManyEnds(id)),
                }
            }
        }

        let mut rooted_left = BTreeSet::new();
        let mut incidence = IncidenceMap::new();
        for (v, ids) in list {
            let mut rotation = RotationList::new();
            for id in ids {
                let edge = match ends[&id] {
                    (left, Some(right)) => UndirectedEdge::new(id, left, right),
                    (_, None) => return Err(InvalidGraph::WrongMultiplicity { id, count: 1 }),
                };
                let side = if rooted_left.insert(id) {
                    Side::Left
                } else {
                    Side::Right
                };
                rotation.push(edge.tail(side));
            }
            incidence.insert(v, rotation);
        }

        Self::from_incidence_map(incidence)
    }

    /// Builds a simple graph from clockwise neighbor lists.
    ///
    /// Edge ids are assigned from 0 in the order the vertex pairs are first seen.
    pub fn from_adjacency_list<I>(list: I) -> Result<Self, InvalidGraph>
    where
        I: IntoIterator<Item = (V, Vec<V>)>,
    {
        let list = Self::collect_rows(list)?;

        let mut edge_ids: HashMap<(V, V), usize> = HashMap::new();
        let mut incidence_list = Vec::with_capacity(list.len());
        for (v, neighbors) in list {
            let mut ids = Vec::with_capacity(neighbors.len());
            for w in neighbors {
                or_err(v != w, InvalidGraph::AdjacencyLoop(v.to_string()))?;
                let key = (v.min(w), v.max(w));
                let next = edge_ids.len();
                ids.push(*edge_ids.entry(key).or_insert(next));
            }
            incidence_list.push((v, ids));
        }

        Self::from_incidence_list(incidence_list)
    }

    fn collect_rows<T, I>(list: I) -> Result<BTreeMap<V, Vec<T>>, InvalidGraph>
    where
        I: IntoIterator<Item = (V, Vec<T>)>,
    {
        let mut rows = BTreeMap::new();
        for (v, row) in list {
            or_err(
                rows.insert(v, row).is_none(),
                InvalidGraph::DuplicateVertex(v.to_string()),
            )?;
        }
        Ok(rows)
    }

    fn validate(incidence: &IncidenceMap<V>) -> Result<(), InvalidGraph> {
        let mut seen: BTreeMap<usize, (BTreeSet<V>, [usize; 2])> = BTreeMap::new();

        for (&v, rotation) in incidence {
            for &e in rotation {
                let edge = e.edge();
                or_err(
                    edge.is_incident_to(v),
                    InvalidGraph::NotIncident {
                        edge: edge.to_string(),
                        vertex: v.to_string(),
                    },
                )?;
                or_err(
                    e.source() == v,
                    InvalidGraph::WrongSource {
                        dart: e.to_string(),
                        vertex: v.to_string(),
                    },
                )?;

                let (ends, sides) = seen.entry(edge.id()).or_insert((edge.vertices(), [0, 0]));
                or_err(*ends == edge.vertices(), InvalidGraph::InconsistentEnds(edge.id()))?;
                match e.side() {
                    Side::Left => sides[0] += 1,
                    Side::Right => sides[1] += 1,
                }
            }
        }

        for (id, (_, [left, right])) in seen {
            let count = left + right;
            or_err(count == 2, InvalidGraph::WrongMultiplicity { id, count })?;
            or_err(left == 1, InvalidGraph::WrongSides(id))?;
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        Self::validate(&self.incidence).is_ok()
    }

    pub fn incidence_map(&self) -> &IncidenceMap<V> {
        &self.incidence
    }

    pub fn into_incidence_map(self) -> IncidenceMap<V> {
        self.incidence
    }

    /// Reserves an edge id that is not used anywhere in the graph.
    pub fn fresh_edge_id(&mut self) -> usize {
        let id = self.next_edge_id;
        self.next_edge_id += 1;
        id
    }

    pub fn fresh_vertex_id(&mut self) -> usize {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        id
    }

    pub fn order(&self) -> usize {
        self.incidence.len()
    }

    pub fn size(&self) -> usize {
        self.edges().len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.incidence.keys().copied()
    }

    pub fn vertex_set(&self) -> BTreeSet<V> {
        self.vertices().collect()
    }

    pub fn contains_vertex(&self, v: V) -> bool {
        self.incidence.contains_key(&v)
    }

    pub fn edges(&self) -> BTreeSet<UndirectedEdge<V>> {
        self.incidence.values().flatten().map(|e| e.edge()).collect()
    }

    pub fn edge_tails(&self) -> BTreeSet<EdgeTail<V>> {
        self.incidence.values().flatten().copied().collect()
    }

    pub fn dart_count(&self) -> usize {
        self.incidence.values().map(RotationList::len).sum()
    }

    pub fn rotation(&self, v: V) -> Option<&RotationList<EdgeTail<V>>> {
        self.incidence.get(&v)
    }

    /// Outgoing darts of `v` in clockwise order; empty for unknown vertices.
    pub fn incident_edge_tails(&self, v: V) -> &[EdgeTail<V>] {
        self.incidence.get(&v).map_or(&[], RotationList::as_slice)
    }

    pub fn incident_edges(&self, v: V) -> RotationList<UndirectedEdge<V>> {
        self.incident_edge_tails(v).iter().map(|e| e.edge()).collect()
    }

    pub fn neighbors(&self, v: V) -> RotationList<V> {
        self.incident_edge_tails(v).iter().map(|e| e.target()).collect()
    }

    pub fn degree(&self, v: V) -> usize {
        self.incident_edge_tails(v).len()
    }

    pub fn are_neighbors(&self, u: V, v: V) -> bool {
        self.incident_edge_tails(u).iter().any(|e| e.target() == v)
    }

    /// The neighbor of `focus` following `prev` in clockwise order.
    pub fn next_vertex(&self, focus: V, prev: V) -> Option<V> {
        self.neighbors(focus).next_after(&prev).copied()
    }

    pub fn prev_vertex(&self, focus: V, next: V) -> Option<V> {
        self.neighbors(focus).prev_before(&next).copied()
    }

    /// The dart leaving `edge.target()` that is `dir` of the reversed `edge`.
    pub fn next_edge(
        &self,
        edge: EdgeTail<V>,
        dir: RotationDirection,
    ) -> Result<EdgeTail<V>, NonIncidence> {
        let focus = edge.target();
        self.incidence
            .get(&focus)
            .and_then(|rotation| rotation.rotate_at(&edge.other_side(), dir))
            .copied()
            .ok_or_else(|| NonIncidence::new(edge.other_side(), focus))
    }

    /// The face to the right of `start`, traced by always turning clockwise.
    pub fn get_face(&self, start: EdgeTail<V>) -> Result<Circuit<V>> {
        let limit = self.dart_count();
        let mut darts = vec![start];
        let mut cur = self.next_edge(start, RotationDirection::Clockwise)?;

        while cur != start {
            or_err(darts.len() < limit, WalkError::NotClosed)?;
            darts.push(cur);
            cur = self.next_edge(cur, RotationDirection::Clockwise)?;
        }

        Ok(Circuit::new(darts)?)
    }

    /// All faces; every dart lies on exactly one of them.
    ///
    /// A graph without edges has one trivial face per vertex, which only makes sense for a
    /// single vertex.
    pub fn faces(&self) -> Result<BTreeSet<Circuit<V>>> {
        let darts = self.edge_tails();
        if darts.is_empty() {
            or_err(self.order() <= 1, WalkError::Disconnected)?;
            return Ok(self.vertices().map(Circuit::trivial).collect());
        }

        let mut faces = BTreeSet::new();
        let mut visited = BTreeSet::new();
        for e in darts {
            if !visited.contains(&e) {
                let face = self.get_face(e)?;
                visited.extend(face.darts().iter().copied());
                faces.insert(face);
            }
        }

        Ok(faces)
    }

    pub fn number_of_faces(&self) -> Result<usize> {
        Ok(self.faces()?.len())
    }

    pub fn loop_edges(&self) -> impl Iterator<Item = UndirectedEdge<V>> {
        self.edges().into_iter().filter(|e| e.is_loop())
    }

    pub fn has_loop_edges(&self) -> bool {
        self.loop_edges().next().is_some()
    }

    pub fn number_of_loop_edges(&self) -> usize {
        self.loop_edges().count()
    }

    fn connection_map(&self) -> BTreeMap<BTreeSet<V>, usize> {
        let mut map = BTreeMap::new();
        for edge in self.edges() {
            *map.entry(edge.vertices()).or_insert(0) += 1;
        }
        map
    }

    pub fn has_parallel_edges(&self) -> bool {
        self.connection_map().values().any(|&n| n > 1)
    }

    /// Number of edges that would have to go to leave no parallel edges behind.
    pub fn number_of_parallel_edges(&self) -> usize {
        self.connection_map().values().map(|&n| n - 1).sum()
    }

    pub fn is_simple(&self) -> bool {
        !self.has_loop_edges() && !self.has_parallel_edges()
    }

    pub fn vertex_induced_subgraph_map(&self, vertices: &BTreeSet<V>) -> IncidenceMap<V> {
        vertices
            .iter()
            .filter_map(|&v| {
                let rotation = self.incidence.get(&v)?;
                let kept = rotation
                    .iter()
                    .filter(|e| e.edge().connects_vertices_in(vertices))
                    .copied()
                    .collect();
                Some((v, kept))
            })
            .collect()
    }

    pub fn vertex_induced_subgraph(&self, vertices: &BTreeSet<V>) -> Result<Self, InvalidGraph> {
        Self::from_incidence_map(self.vertex_induced_subgraph_map(vertices))
    }

    pub fn is_complete(&self) -> bool {
        self.vertices()
            .all(|v| self.vertices().all(|w| v == w || self.are_neighbors(v, w)))
    }

    pub fn is_k4(&self) -> bool {
        self.order() == 4 && self.is_complete()
    }

    pub fn is_k1(&self) -> bool {
        self.order() == 1 && self.dart_count() == 0
    }

    pub fn is_empty_loop(&self, e: EdgeTail<V>) -> bool {
        self.get_face(e).is_ok_and(|f| f.is_loop())
    }

    pub fn is_empty_digon(&self, e: EdgeTail<V>) -> bool {
        self.get_face(e).is_ok_and(|f| f.is_digon())
    }

    pub fn is_empty_triangle(&self, e: EdgeTail<V>) -> bool {
        self.get_face(e).is_ok_and(|f| f.is_triangle())
    }

    pub fn is_wye(&self, v: V) -> bool {
        self.degree(v) == 3
    }

    pub fn wye_vertices(&self) -> Vec<V> {
        self.vertices().filter(|&v| self.is_wye(v)).collect()
    }

    pub fn delta_faces(&self) -> Result<Vec<Circuit<V>>> {
        Ok(self
            .faces()?
            .into_iter()
            .filter(|f| f.is_triangle())
            .collect())
    }

    /// Removes both darts of `edge`.
    pub fn remove_edge(&mut self, edge: UndirectedEdge<V>) {
        for e in [edge.left_tail(), edge.right_tail()] {
            if let Some(rotation) = self.incidence.get_mut(&e.source()) {
                rotation.remove(&e);
            }
        }
    }

    /// Removes `v` together with all incident edges.
    pub fn remove_vertex(&mut self, v: V) {
        for edge in self.incident_edges(v) {
            self.remove_edge(edge);
        }
        self.incidence.remove(&v);
    }

    pub(crate) fn insert_vertex(&mut self, v: V, rotation: RotationList<EdgeTail<V>>) {
        self.next_vertex_id = self.next_vertex_id.max(v.id() + 1);
        self.incidence.insert(v, rotation);
    }

    /// Inserts `dart` at its source, right before (counter-clockwise) or right after
    /// (clockwise) `reference`. The other dart of the edge is not touched.
    pub(crate) fn splice_dart(
        &mut self,
        dart: EdgeTail<V>,
        reference: EdgeTail<V>,
        dir: RotationDirection,
    ) -> Result<(), NonIncidence> {
        let source = dart.source();
        let rotation = self
            .incidence
            .get_mut(&source)
            .ok_or_else(|| NonIncidence::new(reference, source))?;
        let index = rotation
            .index_of(&reference)
            .ok_or_else(|| NonIncidence::new(reference, source))?;

        match dir {
            RotationDirection::Clockwise => rotation.insert(index + 1, dart),
            RotationDirection::CounterClockwise => rotation.insert(index, dart),
        }
        Ok(())
    }
}

impl PlaneGraph<Vertex> {
    /// A vertex id not present in the graph and not handed out before.
    pub fn fresh_vertex(&mut self) -> Vertex {
        Vertex(self.fresh_vertex_id())
    }
}

impl<V: Node> Display for PlaneGraph<V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let faces = self.faces().map_or(0, |faces| faces.len());
        write!(
            f,
            "Plane graph with {} vertices, {} edges and {} faces.",
            self.order(),
            self.size(),
            faces
        )
    }
}
