use crate::*;

// Close Triangle

/// Adds an edge between the targets of two darts leaving the same vertex.
///
/// See [`PlaneGraph::close_triangle`] for details.
pub struct CloseTriangle<V> {
    pub left_leg: EdgeTail<V>,
    pub right_leg: EdgeTail<V>,
}

impl<V: Node> CloseTriangle<V> {
    pub fn new(left_leg: EdgeTail<V>, right_leg: EdgeTail<V>) -> Self {
        Self {
            left_leg,
            right_leg,
        }
    }
}

/// Precondition Error for [`CloseTriangle`].
#[derive(Debug, Error)]
pub enum CloseTriangleError {
    #[error("legs do not share source vertex")]
    SourceMismatch,
    #[error("loop edges are not allowed here")]
    LoopLeg,
    #[error("legs are not in correct rotation order")]
    RotationOrder,
    #[error(transparent)]
    NonIncidence(#[from] NonIncidence),
}

impl<V: Node> Operator<V> for CloseTriangle<V> {
    type Output = UndirectedEdge<V>;
    type Error = CloseTriangleError;
    type Check = ();

    fn check(&self, graph: &PlaneGraph<V>) -> Result<Self::Check, Self::Error> {
        use CloseTriangleError::*;

        or_err(
            self.left_leg.source() == self.right_leg.source(),
            SourceMismatch,
        )?;
        or_err(!self.left_leg.is_loop() && !self.right_leg.is_loop(), LoopLeg)?;

        let next = graph.next_edge(self.right_leg.other_side(), RotationDirection::Clockwise)?;
        or_err(next == self.left_leg, RotationOrder)
    }

    fn apply(
        self,
        graph: &mut PlaneGraph<V>,
    ) -> Result<Self::Output, OperatorErr<Self, Self::Error>> {
        //
        //        o
        //  left / \ right
        //      v   v
        //     l     r
        //

        //        o
        //       / \
        //      v   v
        //     l --> r
        //       new

        try_check!(self, graph);

        let l = self.left_leg.target();
        let r = self.right_leg.target();
        let edge = UndirectedEdge::new(graph.fresh_edge_id(), l, r);

        try_apply!(
            self,
            graph.splice_dart(
                edge.left_tail(),
                self.left_leg.other_side(),
                RotationDirection::Clockwise,
            )
        );
        try_apply!(
            self,
            graph.splice_dart(
                edge.right_tail(),
                self.right_leg.other_side(),
                RotationDirection::CounterClockwise,
            )
        );

        Ok(edge)
    }
}
