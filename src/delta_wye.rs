use crate::*;

// Reduce Delta-Wye

/// Replaces an empty triangular face by a new vertex joined to its corners.
///
/// See [`PlaneGraph::reduce_delta_wye`] and [`PlaneGraph::reduce_eta`] for details.
pub struct ReduceDeltaWye<V> {
    pub delta: Circuit<V>,
    pub center: V,
    /// Run series reductions at the former corners afterwards.
    pub series: bool,
}

impl<V: Node> ReduceDeltaWye<V> {
    pub fn new(delta: Circuit<V>, center: V) -> Self {
        Self {
            delta,
            center,
            series: false,
        }
    }

    /// Delta-wye followed by up to three series reductions.
    ///
    /// On a simple graph this may produce a multigraph: an eta transformation on any
    /// face of K4 leaves two vertices joined by three parallel edges.
    pub fn eta(delta: Circuit<V>, center: V) -> Self {
        Self {
            delta,
            center,
            series: true,
        }
    }

    /// Checks that `delta` is an empty triangular face of `graph`.
    pub fn check_delta(
        graph: &PlaneGraph<V>,
        delta: &Circuit<V>,
    ) -> Result<Cycle<V>, DeltaWyeError> {
        use DeltaWyeError::*;

        or_err(delta.order() == 3, NotTriangle(delta.to_string()))?;
        let cycle = delta
            .to_cycle()
            .map_err(|_| NotTriangle(delta.to_string()))?;

        let first = delta.first().ok_or_else(|| NotTriangle(delta.to_string()))?;
        or_err(
            graph
                .get_face(first)
                .is_ok_and(|face| face == *delta && face.is_triangle()),
            NotFace(delta.to_string()),
        )?;

        Ok(cycle)
    }
}

/// Precondition Error for [`ReduceDeltaWye`].
#[derive(Debug, Error)]
pub enum DeltaWyeError {
    #[error("circuit {0} is not a triangle")]
    NotTriangle(String),
    #[error("circuit {0} is not an empty face")]
    NotFace(String),
    #[error("center vertex {0} must be new")]
    CenterExists(String),
    #[error(transparent)]
    Star(#[from] StarError),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl<V: Node> Operator<V> for ReduceDeltaWye<V> {
    type Output = V;
    type Error = DeltaWyeError;
    type Check = Cycle<V>;

    fn check(&self, graph: &PlaneGraph<V>) -> Result<Self::Check, Self::Error> {
        or_err(
            !graph.contains_vertex(self.center),
            DeltaWyeError::CenterExists(self.center.to_string()),
        )?;
        Self::check_delta(graph, &self.delta)
    }

    fn apply(
        self,
        graph: &mut PlaneGraph<V>,
    ) -> Result<Self::Output, OperatorErr<Self, Self::Error>> {
        //
        //        a                a
        //       / \               |
        //      /   \      =>      c
        //     /     \            / \
        //    b ----- d          b   d
        //

        let cycle = try_check!(self, graph);
        let corners = cycle.vertex_list();
        let edges = cycle.edges_undirected();

        try_apply!(
            self,
            graph
                .add_star_vertex_in_cycle(cycle, self.center)
                .map_err(OperatorErr::into_err)
        );
        for edge in edges {
            graph.remove_edge(edge);
        }

        if self.series {
            for x in corners {
                if graph.can_reduce_series(x) {
                    try_apply!(
                        self,
                        graph.reduce_series(x).map_err(OperatorErr::into_err)
                    );
                }
            }
        }

        Ok(self.center)
    }
}

impl<V: Node> PlaneGraph<V> {
    /// Whether `delta` is an empty triangular face.
    pub fn can_reduce_delta_wye(&self, delta: &Circuit<V>) -> bool {
        ReduceDeltaWye::check_delta(self, delta).is_ok()
    }
}
