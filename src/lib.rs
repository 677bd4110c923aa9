//! Combinatorial plane graphs and their reduction by series-parallel and
//! delta-wye transformations.
//!
//! A [`PlaneGraph`] stores, for every vertex, its outgoing darts in clockwise order.
//! Graph surgery is done through checked [`Operator`]s; the three reduction
//! algorithms in [`algorithm`] drive those operators until the graph is trivial.

use paste::paste;
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    ops::Deref,
};
use thiserror::Error;

macro_rules! try_check {
    ($this:ident, $graph:ident) => {
        match $this.check($graph) {
            Ok(x) => x,
            Err(e) => return Err(OperatorErr::new($this, e)),
        }
    };
}

macro_rules! try_apply {
    ($this:ident, $res:expr) => {
        match $res {
            Ok(x) => x,
            Err(e) => return Err(OperatorErr::new($this, From::from(e))),
        }
    };
}

mod vertex;
pub use vertex::*;

mod edge;
pub use edge::*;

mod rotation;
pub use rotation::*;

mod walk;
pub use walk::*;

mod graph;
pub use graph::*;

mod close_triangle;
pub use close_triangle::*;

mod star;
pub use star::*;

mod series;
pub use series::*;

mod wye_delta;
pub use wye_delta::*;

mod delta_wye;
pub use delta_wye::*;

mod medial;
pub use medial::*;

mod lens;
pub use lens::*;

pub mod algorithm;

mod io;
pub use io::*;

pub mod data;

mod stats;
pub use stats::*;

mod dot;
pub use dot::*;

#[cfg(test)]
mod tests;

struct DisplayFn<F: Fn(&mut Formatter) -> fmt::Result>(F);
impl<F: Fn(&mut Formatter) -> fmt::Result> Display for DisplayFn<F> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0(f)
    }
}

fn or_err<T>(cond: bool, err: T) -> Result<(), T> {
    if cond {
        Ok(())
    } else {
        Err(err)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid graph representation: {0}")]
    InvalidGraph(#[from] InvalidGraph),
    #[error("invalid walk: {0}")]
    InvalidWalk(#[from] WalkError),
    #[error(transparent)]
    NonIncidence(#[from] NonIncidence),
    #[error(transparent)]
    CloseTriangle(#[from] CloseTriangleError),
    #[error(transparent)]
    Star(#[from] StarError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    WyeDelta(#[from] WyeDeltaError),
    #[error(transparent)]
    DeltaWye(#[from] DeltaWyeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("graph has no vertices")]
    EmptyGraph,
    #[error("{0} is not reducible")]
    Terminal(&'static str),
    #[error("edge labels violate the layering invariant at {0}")]
    LabelInvariant(String),
    #[error("no rule applicable")]
    NoRuleApplicable,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A rejected operator together with the precondition it failed.
pub struct OperatorErr<T, E> {
    pub op: T,
    pub err: E,
}

impl<T, E> OperatorErr<T, E> {
    pub fn new(op: T, err: E) -> Self {
        Self { op, err }
    }

    pub fn into_err(self) -> E {
        self.err
    }
}

impl<T, E: std::error::Error> std::error::Error for OperatorErr<T, E> {}
impl<T, E: Debug> Debug for OperatorErr<T, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.err.fmt(f)
    }
}
impl<T, E: Display> Display for OperatorErr<T, E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.err.fmt(f)
    }
}

impl<T, E: Into<Error>> From<OperatorErr<T, E>> for Error {
    fn from(e: OperatorErr<T, E>) -> Self {
        e.err.into()
    }
}

/// A checked modification of a [`PlaneGraph`].
///
/// `check` validates the preconditions without touching the graph; `apply` runs the
/// check and then performs the modification. When the check fails the graph is left
/// untouched and the operator is handed back inside [`OperatorErr`].
pub trait Operator<V: Node>: Sized {
    type Output;
    type Error: std::error::Error;
    type Check;

    fn check(&self, graph: &PlaneGraph<V>) -> Result<Self::Check, Self::Error>;

    fn apply(
        self,
        graph: &mut PlaneGraph<V>,
    ) -> Result<Self::Output, OperatorErr<Self, Self::Error>>;
}

macro_rules! operators {
    ($(
        $(#[$doc:meta])*
        $name:ident => $Op:ident::$ctor:ident($($arg:ident: $ty:ty),*);
    )*) => { paste! {
        impl<V: Node> PlaneGraph<V> {
            $(
                $(#[$doc])*
                pub fn $name(
                    &mut self,
                    $($arg: $ty),*
                ) -> Result<
                    <$Op<V> as Operator<V>>::Output,
                    OperatorErr<$Op<V>, <$Op<V> as Operator<V>>::Error>,
                > {
                    $Op::$ctor($($arg),*).apply(self)
                }

                #[doc = "Checks the preconditions of [`PlaneGraph::" $name "`] without modifying the graph."]
                pub fn [<check_ $name>](
                    &self,
                    $($arg: $ty),*
                ) -> Result<<$Op<V> as Operator<V>>::Check, <$Op<V> as Operator<V>>::Error> {
                    $Op::$ctor($($arg),*).check(self)
                }
            )*
        }
    } };
}

operators! {
    /// Connects the targets of two clockwise-adjacent darts by a new edge.
    ///
    /// See [`CloseTriangle`] for details.
    close_triangle => CloseTriangle::new(left_leg: EdgeTail<V>, right_leg: EdgeTail<V>);

    /// Inserts `center` inside `cycle` and joins it to every cycle vertex.
    add_star_vertex_in_cycle => AddStarVertex::new(cycle: Cycle<V>, center: V);

    /// Replaces a degree-2 vertex and its two edges by a single edge.
    reduce_series => ReduceSeries::new(vertex: V);

    /// Replaces a degree-3 vertex by a triangle on its neighbors.
    reduce_wye_delta => ReduceWyeDelta::new(wye: V);

    /// Wye-delta that leaves out triangle edges parallel to existing ones.
    reduce_omega => ReduceWyeDelta::omega(wye: V);

    /// Replaces an empty triangular face by a star around `center`.
    reduce_delta_wye => ReduceDeltaWye::new(delta: Circuit<V>, center: V);

    /// Delta-wye followed by series reductions at the former triangle corners.
    reduce_eta => ReduceDeltaWye::eta(delta: Circuit<V>, center: V);
}
