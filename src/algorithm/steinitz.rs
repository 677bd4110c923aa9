use super::*;

/// How [`SteinitzGruenbaum`] picks a triangle among the boundary triangles of the
/// minimal lenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LensTriangleSelectionStrategy {
    /// Uniformly among all boundary triangles.
    #[default]
    Random,
    /// Among the triangles contained in the fewest minimal lenses.
    MinLenses,
    /// Among the triangles contained in the most minimal lenses.
    MaxLenses,
    /// Among triangles touching a lens pole, if there are any.
    PreferPole,
    /// Among triangles not touching a lens pole, if there are any.
    PreferNonpole,
}

impl Display for LensTriangleSelectionStrategy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use LensTriangleSelectionStrategy::*;

        f.write_str(match self {
            Random => "RANDOM",
            MinLenses => "MINLENSES",
            MaxLenses => "MAXLENSES",
            PreferPole => "PREFER_POLE",
            PreferNonpole => "PREFER_NONPOLE",
        })
    }
}

impl std::str::FromStr for LensTriangleSelectionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use LensTriangleSelectionStrategy::*;

        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Random),
            "min" | "minlenses" => Ok(MinLenses),
            "max" | "maxlenses" => Ok(MaxLenses),
            "pole" | "prefer_pole" => Ok(PreferPole),
            "nonpole" | "prefer_nonpole" => Ok(PreferNonpole),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// The boundary triangles of `lenses` that `strategy` chooses between.
///
/// The pole strategies list a triangle once per lens it bounds, so triangles shared by
/// several lenses weigh more in the random pick.
pub fn boundary_triangle_candidates(
    lenses: &[Lens],
    strategy: LensTriangleSelectionStrategy,
) -> Vec<Circuit<MedialVertex>> {
    use LensTriangleSelectionStrategy::*;

    let boundary: Vec<BTreeSet<Circuit<MedialVertex>>> =
        lenses.iter().map(Lens::boundary_faces).collect();
    let triangles: BTreeSet<&Circuit<MedialVertex>> = boundary
        .iter()
        .flatten()
        .filter(|f| f.is_triangle())
        .collect();

    let candidates: Vec<&Circuit<MedialVertex>> = match strategy {
        Random => triangles.into_iter().collect(),
        MinLenses | MaxLenses => {
            let mut by_count: BTreeMap<usize, Vec<&Circuit<MedialVertex>>> = BTreeMap::new();
            for t in triangles {
                let count = boundary.iter().filter(|faces| faces.contains(t)).count();
                by_count.entry(count).or_default().push(t);
            }
            let group = if strategy == MinLenses {
                by_count.into_values().next()
            } else {
                by_count.into_values().next_back()
            };
            group.unwrap_or_default()
        }
        PreferPole | PreferNonpole => {
            let mut polar = Vec::new();
            let mut nonpolar = Vec::new();
            for (lens, faces) in lenses.iter().zip(&boundary) {
                for f in faces.iter().filter(|f| f.is_triangle()) {
                    if lens.is_polar(f) {
                        polar.push(f);
                    } else {
                        nonpolar.push(f);
                    }
                }
            }
            if (strategy == PreferPole && !polar.is_empty()) || nonpolar.is_empty() {
                polar
            } else {
                nonpolar
            }
        }
    };

    candidates.into_iter().cloned().collect()
}

/// Picks one boundary triangle of the given lenses.
pub fn select_boundary_triangle<R: Rng>(
    lenses: &[Lens],
    strategy: LensTriangleSelectionStrategy,
    rng: &mut R,
) -> Result<Circuit<MedialVertex>> {
    let candidates = boundary_triangle_candidates(lenses, strategy);
    choose(rng, &candidates).cloned()
}

/// The lens-minimizing wye-delta-wye reduction of a 3-connected plane graph to K4.
///
/// Every step builds the medial graph, finds the lenses with the fewest inner faces
/// and reduces a triangle on the boundary of one of them: an omega at a black
/// triangle, an eta at a white one.
pub struct SteinitzGruenbaum<R = StdRng> {
    graph: PlaneGraph,
    original: PlaneGraph,
    strategy: LensTriangleSelectionStrategy,
    rng: R,
}

impl SteinitzGruenbaum {
    pub fn new(graph: &PlaneGraph, strategy: LensTriangleSelectionStrategy) -> Self {
        Self::with_rng(graph, strategy, StdRng::from_entropy())
    }
}

impl<R: Rng> SteinitzGruenbaum<R> {
    pub fn with_rng(graph: &PlaneGraph, strategy: LensTriangleSelectionStrategy, rng: R) -> Self {
        Self {
            graph: graph.clone(),
            original: graph.clone(),
            strategy,
            rng,
        }
    }

    pub fn strategy(&self) -> LensTriangleSelectionStrategy {
        self.strategy
    }
}

impl<R: Rng> ReductionAlgorithm for SteinitzGruenbaum<R> {
    fn graph(&self) -> &PlaneGraph {
        &self.graph
    }

    fn has_next_step(&self) -> bool {
        !self.graph.is_k4()
    }

    fn next_step(&mut self) -> Result<Transformation> {
        or_err(self.has_next_step(), Error::Terminal("K4"))?;

        let medial = MedialGraph::new(&self.graph)?;
        let lenses = medial.lenses()?;
        let min = lenses
            .first()
            .ok_or(Error::NoRuleApplicable)?
            .number_of_inner_faces();
        let minimal: Vec<Lens> = lenses
            .into_iter()
            .take_while(|l| l.number_of_inner_faces() == min)
            .collect();
        tracing::trace!("{} minimal lenses with {min} inner faces", minimal.len());

        let triangle = select_boundary_triangle(&minimal, self.strategy, &mut self.rng)?;

        match medial.to_unmedial_vertex(&triangle) {
            Some(v) => {
                self.graph.reduce_omega(v)?;
                Ok(Transformation::Omega(v))
            }
            None => {
                let dart = medial
                    .to_unmedial_face(&triangle)
                    .ok_or(Error::NoRuleApplicable)?;
                let face = self.graph.get_face(dart)?;
                let center = self.graph.fresh_vertex();
                self.graph.reduce_eta(face.clone(), center)?;
                Ok(Transformation::Eta(face))
            }
        }
    }

    fn progress(&self) -> u32 {
        progress(self.original.size(), self.graph.size(), 6)
    }

    fn reset(&mut self) -> Result<()> {
        self.graph = self.original.clone();
        Ok(())
    }

    fn normalized_length(&self, sequence: &[Transformation]) -> usize {
        sequence.len() + 1
    }
}

impl<R> Display for SteinitzGruenbaum<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(
            f,
            "Wye-Delta-Wye algorithm based on Steinitz 1922 and Grünbaum 1967,"
        )?;
        writeln!(
            f,
            "running on graph with {} vertices and {} edges.",
            self.graph.order(),
            self.graph.size()
        )?;
        write!(f, "Lens triangle selection strategy: {}.", self.strategy)
    }
}
