use crate::*;

// Add Star Vertex

/// Places a new vertex inside a cycle and connects it to every cycle vertex.
///
/// See [`PlaneGraph::add_star_vertex_in_cycle`] for details.
pub struct AddStarVertex<V> {
    pub cycle: Cycle<V>,
    pub center: V,
}

impl<V: Node> AddStarVertex<V> {
    pub fn new(cycle: Cycle<V>, center: V) -> Self {
        Self { cycle, center }
    }
}

/// Precondition Error for [`AddStarVertex`].
#[derive(Debug, Error)]
pub enum StarError {
    #[error("center vertex {0} must be new")]
    CenterExists(String),
    #[error("cycle must contain at least three edges")]
    TooShort,
    #[error(transparent)]
    NonIncidence(#[from] NonIncidence),
}

impl<V: Node> Operator<V> for AddStarVertex<V> {
    type Output = V;
    type Error = StarError;
    type Check = ();

    fn check(&self, graph: &PlaneGraph<V>) -> Result<Self::Check, Self::Error> {
        use StarError::*;

        or_err(
            !graph.contains_vertex(self.center),
            CenterExists(self.center.to_string()),
        )?;
        or_err(self.cycle.len() >= 3, TooShort)?;

        for &e in self.cycle.darts() {
            or_err(
                graph.incident_edge_tails(e.source()).contains(&e),
                crate::NonIncidence::new(e, e.source()),
            )?;
        }

        Ok(())
    }

    fn apply(
        self,
        graph: &mut PlaneGraph<V>,
    ) -> Result<Self::Output, OperatorErr<Self, Self::Error>> {
        //
        //   a ----> b          a ----> b
        //   ^       |          ^ \   / |
        //   |       |    =>    |   c   |
        //   |       v          | /   \ v
        //   d <---- e          d <---- e
        //

        try_check!(self, graph);

        let mut inner = RotationList::new();
        let mut outer = BTreeMap::new();
        for v in self.cycle.vertex_list_clockwise() {
            let edge = UndirectedEdge::new(graph.fresh_edge_id(), self.center, v);
            inner.push(edge.left_tail());
            outer.insert(v, edge.right_tail());
        }
        graph.insert_vertex(self.center, inner);

        let darts = self.cycle.darts().to_vec();
        for e in darts {
            if let Some(&spoke) = outer.get(&e.source()) {
                try_apply!(
                    self,
                    graph.splice_dart(spoke, e, RotationDirection::CounterClockwise)
                );
            }
        }

        Ok(self.center)
    }
}
