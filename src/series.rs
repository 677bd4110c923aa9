use crate::*;

// Reduce Series

/// Contracts the two edges at a vertex of degree two into one.
///
/// See [`PlaneGraph::reduce_series`] for details.
pub struct ReduceSeries<V> {
    pub vertex: V,
}

impl<V: Node> ReduceSeries<V> {
    pub fn new(vertex: V) -> Self {
        Self { vertex }
    }
}

/// Precondition Error for [`ReduceSeries`].
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series reduction needs degree 2 at vertex {vertex}, found {degree}")]
    Degree { vertex: String, degree: usize },
    #[error("edges at vertex {0} are parallel")]
    Parallel(String),
    #[error("edges at vertex {0} contain a loop")]
    Loop(String),
    #[error(transparent)]
    CloseTriangle(#[from] CloseTriangleError),
}

impl<V: Node> Operator<V> for ReduceSeries<V> {
    type Output = UndirectedEdge<V>;
    type Error = SeriesError;
    type Check = [EdgeTail<V>; 2];

    fn check(&self, graph: &PlaneGraph<V>) -> Result<Self::Check, Self::Error> {
        use SeriesError::*;

        let (first, last) = match graph.incident_edge_tails(self.vertex) {
            &[first, last] => (first, last),
            other => {
                return Err(Degree {
                    vertex: self.vertex.to_string(),
                    degree: other.len(),
                })
            }
        };

        or_err(!first.is_parallel_to(last), Parallel(self.vertex.to_string()))?;
        or_err(!first.is_loop() && !last.is_loop(), Loop(self.vertex.to_string()))?;

        Ok([first, last])
    }

    fn apply(
        self,
        graph: &mut PlaneGraph<V>,
    ) -> Result<Self::Output, OperatorErr<Self, Self::Error>> {
        //
        //   a <-- v --> b     =>     a ----> b
        //

        let [first, last] = try_check!(self, graph);

        let edge = try_apply!(
            self,
            graph.close_triangle(first, last).map_err(OperatorErr::into_err)
        );
        graph.remove_vertex(self.vertex);

        Ok(edge)
    }
}

impl<V: Node> PlaneGraph<V> {
    pub fn can_reduce_series(&self, v: V) -> bool {
        self.check_reduce_series(v).is_ok()
    }
}
