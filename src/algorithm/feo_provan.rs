use super::*;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StartVertexStrategy {
    #[default]
    Minimum,
    Maximum,
    Random,
}

impl Display for StartVertexStrategy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            StartVertexStrategy::Minimum => "MINIMUM",
            StartVertexStrategy::Maximum => "MAXIMUM",
            StartVertexStrategy::Random => "RANDOM",
        })
    }
}

impl std::str::FromStr for StartVertexStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "min" | "minimum" => Ok(StartVertexStrategy::Minimum),
            "max" | "maximum" => Ok(StartVertexStrategy::Maximum),
            "random" => Ok(StartVertexStrategy::Random),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// How [`FeoProvan`] picks among the applicable patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransformSelectionStrategy {
    /// Smallest label among the involved edges.
    MinLabel,
    /// Largest label among the involved edges.
    #[default]
    MaxLabel,
    /// Smallest pattern degree, vertex patterns before face patterns.
    MinDegree,
    /// Largest pattern degree, vertex patterns before face patterns.
    MaxDegree,
    /// Vertex patterns before face patterns, then smallest degree.
    VertexFirst,
    /// Face patterns before vertex patterns, then smallest degree.
    FaceFirst,
    Random,
}

impl Display for TransformSelectionStrategy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use TransformSelectionStrategy::*;

        f.write_str(match self {
            MinLabel => "MINLABEL",
            MaxLabel => "MAXLABEL",
            MinDegree => "MINDEGREE",
            MaxDegree => "MAXDEGREE",
            VertexFirst => "VERTEXFIRST",
            FaceFirst => "FACEFIRST",
            Random => "RANDOM",
        })
    }
}

impl std::str::FromStr for TransformSelectionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TransformSelectionStrategy::*;

        match s.to_ascii_lowercase().as_str() {
            "minlabel" => Ok(MinLabel),
            "maxlabel" => Ok(MaxLabel),
            "mindegree" => Ok(MinDegree),
            "maxdegree" => Ok(MaxDegree),
            "vertexfirst" => Ok(VertexFirst),
            "facefirst" => Ok(FaceFirst),
            "random" => Ok(Random),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    Vertex,
    Face,
}

/// A local configuration one of the rules P1 to P6 can be applied to.
///
/// Face patterns are identified by one of their darts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    EmptyLoop(EdgeTail<Vertex>),
    Leaf(Vertex),
    Series(Vertex),
    EmptyDigon(EdgeTail<Vertex>),
    Delta(EdgeTail<Vertex>),
    Wye(Vertex),
}

impl Pattern {
    pub fn degree(self) -> usize {
        match self {
            Pattern::EmptyLoop(_) | Pattern::Leaf(_) => 1,
            Pattern::Series(_) | Pattern::EmptyDigon(_) => 2,
            Pattern::Delta(_) | Pattern::Wye(_) => 3,
        }
    }

    pub fn kind(self) -> PatternKind {
        match self {
            Pattern::Leaf(_) | Pattern::Series(_) | Pattern::Wye(_) => PatternKind::Vertex,
            Pattern::EmptyLoop(_) | Pattern::EmptyDigon(_) | Pattern::Delta(_) => {
                PatternKind::Face
            }
        }
    }
}

/// An applicable pattern with the label range of the edges it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pattern: Pattern,
    pub min_label: u32,
    pub max_label: u32,
}

/// Picks the candidate to apply next; ties go to the earliest candidate.
pub fn select_transformation<R: Rng>(
    candidates: &[Candidate],
    strategy: TransformSelectionStrategy,
    rng: &mut R,
) -> Option<Candidate> {
    use TransformSelectionStrategy::*;

    let iter = candidates.iter();
    let selected = match strategy {
        Random => candidates.choose(rng),
        MinLabel => iter.min_by_key(|c| c.min_label),
        MaxLabel => iter.min_by_key(|c| Reverse(c.max_label)),
        MinDegree => iter.min_by_key(|c| (c.pattern.degree(), c.pattern.kind())),
        MaxDegree => iter.min_by_key(|c| (Reverse(c.pattern.degree()), c.pattern.kind())),
        VertexFirst => iter.min_by_key(|c| (c.pattern.kind(), c.pattern.degree())),
        FaceFirst => iter.min_by_key(|c| (Reverse(c.pattern.kind()), c.pattern.degree())),
    };
    selected.copied()
}

pub type EdgeLabels = BTreeMap<UndirectedEdge<Vertex>, u32>;

/// Labels the edges by breadth-first layers of faces around `start`.
///
/// Edges at a boundary vertex of the current layer get the odd level, the remaining
/// edges of the faces around them the following even level. Vertices seen on those
/// faces form the next boundary.
pub fn compute_edge_labels(graph: &PlaneGraph, start: Vertex) -> Result<EdgeLabels> {
    let mut labels = EdgeLabels::new();
    let mut seen = BTreeSet::from([start]);
    let mut boundary = BTreeSet::from([start]);
    let mut level = 1;

    while !boundary.is_empty() {
        for &v in &boundary {
            for e in graph.incident_edge_tails(v) {
                labels.entry(e.edge()).or_insert(level);
            }
        }

        let mut next = BTreeSet::new();
        for &v in &boundary {
            for &e in graph.incident_edge_tails(v) {
                let face = graph.get_face(e)?;
                for edge in face.edges_undirected() {
                    labels.entry(edge).or_insert(level + 1);
                }
                for w in face.vertices() {
                    if seen.insert(w) {
                        next.insert(w);
                    }
                }
            }
        }

        boundary = next;
        level += 2;
    }

    Ok(labels)
}

fn valid_labels2(labels: &[u32]) -> bool {
    match (labels.iter().min(), labels.iter().max()) {
        (Some(&min), Some(&max)) => max == min || max == min + 1,
        _ => false,
    }
}

/// One edge at the minimum label, two at the minimum plus one.
fn valid_labels3(labels: &[u32]) -> bool {
    match (labels.iter().min(), labels.iter().max()) {
        (Some(&min), Some(&max)) => {
            max == min + 1 && labels.iter().filter(|&&l| l == max).count() == 2
        }
        _ => false,
    }
}

/// The edge-labelling wye-delta-wye reduction of a connected plane graph to K1.
///
/// A breadth-first labelling from a start vertex decides where the six rules apply;
/// the labels of new edges are repaired locally after every step.
pub struct FeoProvan<R = StdRng> {
    graph: PlaneGraph,
    original: PlaneGraph,
    start_strategy: StartVertexStrategy,
    selection: TransformSelectionStrategy,
    start: Vertex,
    labels: EdgeLabels,
    report_new_edges: bool,
    rng: R,
}

impl FeoProvan {
    pub fn new(
        graph: &PlaneGraph,
        start_strategy: StartVertexStrategy,
        selection: TransformSelectionStrategy,
    ) -> Result<Self> {
        Self::with_rng(graph, start_strategy, selection, StdRng::from_entropy())
    }
}

impl<R: Rng> FeoProvan<R> {
    pub fn with_rng(
        graph: &PlaneGraph,
        start_strategy: StartVertexStrategy,
        selection: TransformSelectionStrategy,
        mut rng: R,
    ) -> Result<Self> {
        let start = Self::pick_start(graph, start_strategy, &mut rng)?;
        let labels = compute_edge_labels(graph, start)?;

        Ok(Self {
            graph: graph.clone(),
            original: graph.clone(),
            start_strategy,
            selection,
            start,
            labels,
            report_new_edges: false,
            rng,
        })
    }

    /// Appends the created edges to P3, P5 and P6 transformations.
    pub fn with_report_new_edges(mut self, report: bool) -> Self {
        self.report_new_edges = report;
        self
    }

    pub fn set_report_new_edges(&mut self, report: bool) {
        self.report_new_edges = report;
    }

    pub fn edge_labels(&self) -> &EdgeLabels {
        &self.labels
    }

    pub fn start_vertex(&self) -> Vertex {
        self.start
    }

    fn pick_start(
        graph: &PlaneGraph,
        strategy: StartVertexStrategy,
        rng: &mut R,
    ) -> Result<Vertex> {
        let vertices = graph.incidence_map().keys();
        let start = match strategy {
            StartVertexStrategy::Minimum => vertices.min().copied(),
            StartVertexStrategy::Maximum => vertices.max().copied(),
            StartVertexStrategy::Random => {
                let vertices: Vec<Vertex> = vertices.copied().collect();
                vertices.choose(rng).copied()
            }
        };
        start.ok_or(Error::EmptyGraph)
    }

    fn label(&self, edge: UndirectedEdge<Vertex>) -> Result<u32> {
        self.labels
            .get(&edge)
            .copied()
            .ok_or_else(|| Error::LabelInvariant(format!("unlabelled edge {edge}")))
    }

    fn labels_of(
        &self,
        edges: impl IntoIterator<Item = UndirectedEdge<Vertex>>,
    ) -> Result<Vec<u32>> {
        edges.into_iter().map(|e| self.label(e)).collect()
    }

    fn satisfies_p1(&self, e: EdgeTail<Vertex>) -> bool {
        self.graph.is_empty_loop(e)
    }

    fn satisfies_p2(&self, v: Vertex) -> bool {
        v != self.start && self.graph.degree(v) == 1
    }

    fn satisfies_p3(&self, v: Vertex) -> Result<bool> {
        if v == self.start || !self.graph.can_reduce_series(v) {
            return Ok(false);
        }
        Ok(valid_labels2(&self.labels_of(self.graph.incident_edges(v))?))
    }

    fn satisfies_p4(&self, e: EdgeTail<Vertex>) -> Result<bool> {
        if !self.graph.is_empty_digon(e) {
            return Ok(false);
        }
        let face = self.graph.get_face(e)?;
        Ok(valid_labels2(&self.labels_of(face.edges_undirected())?))
    }

    fn satisfies_p5(&self, e: EdgeTail<Vertex>) -> Result<bool> {
        let face = self.graph.get_face(e)?;
        if !self.graph.can_reduce_delta_wye(&face) {
            return Ok(false);
        }
        Ok(valid_labels3(&self.labels_of(face.edges_undirected())?))
    }

    fn satisfies_p6(&self, v: Vertex) -> Result<bool> {
        if v == self.start || !self.graph.can_reduce_wye_delta(v) {
            return Ok(false);
        }
        Ok(valid_labels3(&self.labels_of(self.graph.incident_edges(v))?))
    }

    fn candidate(&self, pattern: Pattern) -> Result<Candidate> {
        let labels = match pattern {
            Pattern::Leaf(v) | Pattern::Series(v) | Pattern::Wye(v) => {
                self.labels_of(self.graph.incident_edges(v))?
            }
            Pattern::EmptyLoop(e) | Pattern::EmptyDigon(e) | Pattern::Delta(e) => {
                let face = self.graph.get_face(e)?;
                self.labels_of(face.darts().iter().map(|d| d.edge()))?
            }
        };

        Ok(Candidate {
            pattern,
            min_label: labels.iter().min().copied().unwrap_or_default(),
            max_label: labels.iter().max().copied().unwrap_or_default(),
        })
    }

    /// Every applicable pattern: vertex patterns first, then face patterns.
    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();

        for v in self.graph.vertices() {
            let pattern = if self.satisfies_p2(v) {
                Pattern::Leaf(v)
            } else if self.satisfies_p3(v)? {
                Pattern::Series(v)
            } else if self.satisfies_p6(v)? {
                Pattern::Wye(v)
            } else {
                continue;
            };
            candidates.push(self.candidate(pattern)?);
        }

        for face in self.graph.faces()? {
            let Some(e) = face.first() else {
                continue;
            };
            let pattern = if self.satisfies_p1(e) {
                Pattern::EmptyLoop(e)
            } else if self.satisfies_p4(e)? {
                Pattern::EmptyDigon(e)
            } else if self.satisfies_p5(e)? {
                Pattern::Delta(e)
            } else {
                continue;
            };
            candidates.push(self.candidate(pattern)?);
        }

        tracing::trace!("{} applicable patterns", candidates.len());
        Ok(candidates)
    }

    fn perform(&mut self, pattern: Pattern) -> Result<Transformation> {
        match pattern {
            Pattern::EmptyLoop(e) => self.perform_p1(e),
            Pattern::Leaf(v) => self.perform_p2(v),
            Pattern::Series(v) => self.perform_p3(v),
            Pattern::EmptyDigon(e) => self.perform_p4(e),
            Pattern::Delta(e) => self.perform_p5(e),
            Pattern::Wye(v) => self.perform_p6(v),
        }
    }

    fn perform_p1(&mut self, e: EdgeTail<Vertex>) -> Result<Transformation> {
        let edge = e.edge();
        self.graph.remove_edge(edge);
        self.labels.remove(&edge);
        Ok(Transformation::LoopRemoval(edge))
    }

    fn perform_p2(&mut self, v: Vertex) -> Result<Transformation> {
        let pendant = self.graph.incident_edges(v);
        self.graph.remove_vertex(v);
        for edge in &pendant {
            self.labels.remove(edge);
        }
        Ok(Transformation::LeafRemoval(v))
    }

    fn perform_p3(&mut self, v: Vertex) -> Result<Transformation> {
        let old: Vec<_> = self.graph.incident_edges(v).into_iter().collect();
        let min = self.labels_of(old.iter().copied())?.into_iter().min();

        let edge = self.graph.reduce_series(v)?;
        for e in &old {
            self.labels.remove(e);
        }
        self.labels.insert(edge, min.unwrap_or_default());

        Ok(Transformation::Series {
            vertex: v,
            new_edge: self.report_new_edges.then_some(edge),
        })
    }

    fn perform_p4(&mut self, e: EdgeTail<Vertex>) -> Result<Transformation> {
        let face = self.graph.get_face(e)?;
        let labels = self.labels_of(face.darts().iter().map(|d| d.edge()))?;
        let max = labels.iter().max().copied();

        // The parallel edge with the larger label goes.
        let edge = face
            .darts()
            .iter()
            .zip(&labels)
            .find(|&(_, &l)| Some(l) == max)
            .map(|(d, _)| d.edge())
            .ok_or_else(|| Error::LabelInvariant(face.to_string()))?;

        self.graph.remove_edge(edge);
        self.labels.remove(&edge);
        Ok(Transformation::ParallelRemoval(edge))
    }

    fn perform_p5(&mut self, e: EdgeTail<Vertex>) -> Result<Transformation> {
        let face = self.graph.get_face(e)?;
        let old: Vec<_> = face.darts().iter().map(|d| d.edge()).collect();
        let labels = self.labels_of(old.iter().copied())?;
        let max = labels
            .iter()
            .max()
            .copied()
            .ok_or_else(|| Error::LabelInvariant(face.to_string()))?;

        // The two legs with the larger label meet at the top of the triangle.
        let legs: Vec<_> = old
            .iter()
            .zip(&labels)
            .filter(|&(_, &l)| l == max)
            .map(|(&edge, _)| edge)
            .collect();
        let top = match legs[..] {
            [a, b, ..] => a.shared_vertex(b),
            _ => None,
        }
        .ok_or_else(|| Error::LabelInvariant(face.to_string()))?;

        let center = self.graph.fresh_vertex();
        self.graph.reduce_delta_wye(face.clone(), center)?;
        for edge in &old {
            self.labels.remove(edge);
        }

        let new_edges: Vec<_> = self.graph.incident_edges(center).into_iter().collect();
        for &edge in &new_edges {
            let label = if edge.is_incident_to(top) { max } else { max - 1 };
            self.labels.insert(edge, label);
        }

        Ok(Transformation::DeltaWye {
            face,
            new_edges: self.report_new_edges.then_some(new_edges),
        })
    }

    fn perform_p6(&mut self, v: Vertex) -> Result<Transformation> {
        let old: Vec<_> = self.graph.incident_edges(v).into_iter().collect();
        let labels = self.labels_of(old.iter().copied())?;
        let min = labels.iter().min().copied();

        // The unique edge with the smaller label points to the top.
        let top = old
            .iter()
            .zip(&labels)
            .find(|&(_, &l)| Some(l) == min)
            .and_then(|(edge, _)| edge.other_end(v))
            .ok_or_else(|| Error::LabelInvariant(v.to_string()))?;
        let min = min.unwrap_or_default();

        let new_edges = self.graph.reduce_wye_delta(v)?;
        for edge in &old {
            self.labels.remove(edge);
        }
        for &edge in &new_edges {
            let label = if edge.is_incident_to(top) { min } else { min + 1 };
            self.labels.insert(edge, label);
        }

        Ok(Transformation::WyeDelta {
            vertex: v,
            new_edges: self.report_new_edges.then_some(new_edges),
        })
    }
}

impl<R: Rng> ReductionAlgorithm for FeoProvan<R> {
    fn graph(&self) -> &PlaneGraph {
        &self.graph
    }

    fn has_next_step(&self) -> bool {
        !self.graph.is_k1()
    }

    fn next_step(&mut self) -> Result<Transformation> {
        or_err(self.has_next_step(), Error::Terminal("K1"))?;

        let candidates = self.candidates()?;
        let Some(selected) = select_transformation(&candidates, self.selection, &mut self.rng)
        else {
            tracing::error!("no transformation possible, dumping edge labels");
            for (edge, label) in &self.labels {
                tracing::error!("  {edge}: {label}");
            }
            return Err(Error::NoRuleApplicable);
        };

        self.perform(selected.pattern)
    }

    fn progress(&self) -> u32 {
        progress(self.original.size(), self.graph.size(), 0)
    }

    fn reset(&mut self) -> Result<()> {
        self.graph = self.original.clone();
        self.start = Self::pick_start(&self.graph, self.start_strategy, &mut self.rng)?;
        self.labels = compute_edge_labels(&self.graph, self.start)?;
        Ok(())
    }

    fn normalized_length(&self, sequence: &[Transformation]) -> usize {
        sequence
            .iter()
            .filter(|t| t.is_delta_wye() || t.is_wye_delta())
            .count()
    }
}

impl<R> Display for FeoProvan<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Wye-Delta-Wye algorithm based on Feo and Provan 1993,")?;
        writeln!(
            f,
            "running on graph with {} vertices and {} edges.",
            self.graph.order(),
            self.graph.size()
        )?;
        writeln!(f, "Transformation selection strategy: {}", self.selection)?;
        writeln!(f, "Start vertex selection strategy: {}", self.start_strategy)?;
        write!(f, "Start vertex: {}", self.start)
    }
}
