use crate::*;

// Reduce Wye-Delta

/// Replaces a vertex of degree three by a triangle on its neighbors.
///
/// See [`PlaneGraph::reduce_wye_delta`] and [`PlaneGraph::reduce_omega`] for details.
pub struct ReduceWyeDelta<V> {
    pub wye: V,
    /// Skip triangle edges whose ends are already neighbors.
    pub suppress_parallel: bool,
}

impl<V: Node> ReduceWyeDelta<V> {
    pub fn new(wye: V) -> Self {
        Self {
            wye,
            suppress_parallel: false,
        }
    }

    /// Wye-delta followed by up to three parallel reductions.
    pub fn omega(wye: V) -> Self {
        Self {
            wye,
            suppress_parallel: true,
        }
    }
}

/// Precondition Error for [`ReduceWyeDelta`].
#[derive(Debug, Error)]
pub enum WyeDeltaError {
    #[error("wye-delta needs degree 3 at vertex {vertex}, found {degree}")]
    Degree { vertex: String, degree: usize },
    #[error("vertex {0} does not have three distinct neighbors")]
    Neighbors(String),
    #[error("edges at vertex {0} contain a loop")]
    Loop(String),
    #[error(transparent)]
    CloseTriangle(#[from] CloseTriangleError),
}

impl<V: Node> Operator<V> for ReduceWyeDelta<V> {
    type Output = Vec<UndirectedEdge<V>>;
    type Error = WyeDeltaError;
    type Check = [EdgeTail<V>; 3];

    fn check(&self, graph: &PlaneGraph<V>) -> Result<Self::Check, Self::Error> {
        use WyeDeltaError::*;

        let [e2, e1, e0] = match graph.incident_edge_tails(self.wye) {
            &[a, b, c] => [a, b, c],
            other => {
                return Err(Degree {
                    vertex: self.wye.to_string(),
                    degree: other.len(),
                })
            }
        };

        let neighbors: BTreeSet<V> = [e0, e1, e2].iter().map(|e| e.target()).collect();
        or_err(neighbors.len() == 3, Neighbors(self.wye.to_string()))?;
        or_err(
            [e0, e1, e2].iter().all(|e| !e.is_loop()),
            Loop(self.wye.to_string()),
        )?;

        Ok([e0, e1, e2])
    }

    fn apply(
        self,
        graph: &mut PlaneGraph<V>,
    ) -> Result<Self::Output, OperatorErr<Self, Self::Error>> {
        //
        //      a                a
        //      ^               / \
        //      w       =>     /   \
        //     / \            /     \
        //    v   v          c ----- b
        //   c     b
        //

        let [e0, e1, e2] = try_check!(self, graph);

        let mut edges = Vec::with_capacity(3);
        for (left, right) in [(e0, e1), (e1, e2), (e2, e0)] {
            if self.suppress_parallel && graph.are_neighbors(left.target(), right.target()) {
                continue;
            }
            let edge = try_apply!(
                self,
                graph.close_triangle(left, right).map_err(OperatorErr::into_err)
            );
            edges.push(edge);
        }
        graph.remove_vertex(self.wye);

        Ok(edges)
    }
}

impl<V: Node> PlaneGraph<V> {
    pub fn can_reduce_wye_delta(&self, v: V) -> bool {
        self.check_reduce_wye_delta(v).is_ok()
    }
}
