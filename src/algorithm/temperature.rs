use super::*;

/// How [`TemperatureReduction`] weighs transformations that remove wyes or deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TemperatureStrategy {
    /// Any positive transformation.
    Random,
    /// Positive transformations with the largest reduction value.
    #[default]
    Short,
    /// Positive transformations with the smallest reduction value.
    Long,
}

impl Display for TemperatureStrategy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            TemperatureStrategy::Random => "RANDOM",
            TemperatureStrategy::Short => "SHORT",
            TemperatureStrategy::Long => "LONG",
        })
    }
}

impl std::str::FromStr for TemperatureStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(TemperatureStrategy::Random),
            "short" => Ok(TemperatureStrategy::Short),
            "long" => Ok(TemperatureStrategy::Long),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// A transformation [`TemperatureReduction`] can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemperatureMove {
    Omega(Vertex),
    Eta(Circuit<Vertex>),
}

/// A move rated by the wyes or deltas it removes besides its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub step: TemperatureMove,
    pub value: usize,
    pub temperature: u32,
}

/// The moves `strategy` chooses between.
///
/// Positive moves are filtered by their value; without any, the coldest neutral moves
/// are kept.
pub fn best_moves(moves: Vec<ScoredMove>, strategy: TemperatureStrategy) -> Vec<ScoredMove> {
    let (positive, neutral): (Vec<_>, Vec<_>) = moves.into_iter().partition(|m| m.value > 0);

    if !positive.is_empty() {
        let key = match strategy {
            TemperatureStrategy::Random => return positive,
            TemperatureStrategy::Short => positive.iter().map(|m| m.value).max(),
            TemperatureStrategy::Long => positive.iter().map(|m| m.value).min(),
        };
        return positive
            .into_iter()
            .filter(|m| Some(m.value) == key)
            .collect();
    }

    let coldest = neutral.iter().map(|m| m.temperature).min();
    neutral
        .into_iter()
        .filter(|m| Some(m.temperature) == coldest)
        .collect()
}

/// Picks uniformly among the [`best_moves`].
pub fn select_move<R: Rng>(
    moves: Vec<ScoredMove>,
    strategy: TemperatureStrategy,
    rng: &mut R,
) -> Option<ScoredMove> {
    best_moves(moves, strategy).choose(rng).cloned()
}

/// A randomized wye-delta-wye reduction of a 3-connected plane graph to K4.
///
/// Omega and eta transformations are rated by how many empty triangles (resp. wyes)
/// they touch. Without a positive rating the coldest transformation is taken, where
/// every transformation heats up the elements it creates.
pub struct TemperatureReduction<R = StdRng> {
    graph: PlaneGraph,
    original: PlaneGraph,
    strategy: TemperatureStrategy,
    vertex_heat: HashMap<Vertex, u32>,
    edge_heat: HashMap<UndirectedEdge<Vertex>, u32>,
    rng: R,
}

impl TemperatureReduction {
    pub fn new(graph: &PlaneGraph, strategy: TemperatureStrategy) -> Self {
        Self::with_rng(graph, strategy, StdRng::from_entropy())
    }
}

impl<R: Rng> TemperatureReduction<R> {
    pub fn with_rng(graph: &PlaneGraph, strategy: TemperatureStrategy, rng: R) -> Self {
        Self {
            graph: graph.clone(),
            original: graph.clone(),
            strategy,
            vertex_heat: HashMap::new(),
            edge_heat: HashMap::new(),
            rng,
        }
    }

    pub fn strategy(&self) -> TemperatureStrategy {
        self.strategy
    }

    pub fn vertex_temperature(&self, v: Vertex) -> u32 {
        self.vertex_heat.get(&v).copied().unwrap_or(0)
    }

    pub fn edge_temperature(&self, e: UndirectedEdge<Vertex>) -> u32 {
        self.edge_heat.get(&e).copied().unwrap_or(0)
    }

    /// The temperature of the hottest edge around `face`.
    pub fn face_temperature(&self, face: &Circuit<Vertex>) -> u32 {
        face.edges_undirected()
            .iter()
            .filter_map(|e| self.edge_heat.get(e).copied())
            .max()
            .unwrap_or(0)
    }

    /// Every applicable omega and eta with its value and temperature.
    pub fn scored_moves(&self) -> Result<Vec<ScoredMove>> {
        let mut moves = Vec::new();

        for v in self.graph.vertices() {
            if self.graph.can_reduce_wye_delta(v) {
                let value = self
                    .graph
                    .incident_edge_tails(v)
                    .iter()
                    .filter(|&&e| self.graph.is_empty_triangle(e))
                    .count();
                moves.push(ScoredMove {
                    step: TemperatureMove::Omega(v),
                    value,
                    temperature: self.vertex_temperature(v),
                });
            }
        }

        for face in self.graph.faces()? {
            if self.graph.can_reduce_delta_wye(&face) {
                let value = face
                    .vertices()
                    .into_iter()
                    .filter(|&v| self.graph.is_wye(v))
                    .count();
                let temperature = self.face_temperature(&face);
                moves.push(ScoredMove {
                    step: TemperatureMove::Eta(face),
                    value,
                    temperature,
                });
            }
        }

        Ok(moves)
    }
}

impl<R: Rng> ReductionAlgorithm for TemperatureReduction<R> {
    fn graph(&self) -> &PlaneGraph {
        &self.graph
    }

    fn has_next_step(&self) -> bool {
        !self.graph.is_k4()
    }

    fn next_step(&mut self) -> Result<Transformation> {
        or_err(self.has_next_step(), Error::Terminal("K4"))?;

        let moves = self.scored_moves()?;
        tracing::trace!("{} candidate transformations", moves.len());
        let chosen =
            select_move(moves, self.strategy, &mut self.rng).ok_or(Error::NoRuleApplicable)?;

        match chosen.step {
            TemperatureMove::Omega(v) => {
                let edges = self.graph.reduce_omega(v)?;
                for edge in edges {
                    self.edge_heat.insert(edge, chosen.temperature + 1);
                }
                Ok(Transformation::Omega(v))
            }
            TemperatureMove::Eta(face) => {
                let center = self.graph.fresh_vertex();
                self.graph.reduce_eta(face.clone(), center)?;
                self.vertex_heat.insert(center, chosen.temperature + 1);
                Ok(Transformation::Eta(face))
            }
        }
    }

    fn progress(&self) -> u32 {
        progress(self.original.size(), self.graph.size(), 6)
    }

    fn reset(&mut self) -> Result<()> {
        self.graph = self.original.clone();
        self.vertex_heat.clear();
        self.edge_heat.clear();
        Ok(())
    }

    fn normalized_length(&self, sequence: &[Transformation]) -> usize {
        sequence.len() + 1
    }
}

impl<R> Display for TemperatureReduction<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Randomized Wye-Delta-Wye algorithm,")?;
        writeln!(
            f,
            "running on graph with {} vertices and {} edges.",
            self.graph.order(),
            self.graph.size()
        )?;
        write!(f, "Selection Strategy: {}.", self.strategy)
    }
}
