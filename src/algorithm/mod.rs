//! Reduction algorithms driving a [`PlaneGraph`] to a terminal shape.

use crate::*;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::sync::atomic::{self, AtomicBool};

mod steinitz;
pub use steinitz::*;

mod feo_provan;
pub use feo_provan::*;

mod temperature;
pub use temperature::*;

/// One applied step of a reduction, as reported by [`ReductionAlgorithm::next_step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    /// Wye-delta with parallel suppression at a vertex.
    Omega(Vertex),
    /// Delta-wye with series cleanup at a face.
    Eta(Circuit<Vertex>),
    /// P1: removal of an empty loop.
    LoopRemoval(UndirectedEdge<Vertex>),
    /// P2: removal of a vertex of degree one.
    LeafRemoval(Vertex),
    /// P3: series reduction.
    Series {
        vertex: Vertex,
        new_edge: Option<UndirectedEdge<Vertex>>,
    },
    /// P4: removal of one edge of an empty digon.
    ParallelRemoval(UndirectedEdge<Vertex>),
    /// P5
    DeltaWye {
        face: Circuit<Vertex>,
        new_edges: Option<Vec<UndirectedEdge<Vertex>>>,
    },
    /// P6
    WyeDelta {
        vertex: Vertex,
        new_edges: Option<Vec<UndirectedEdge<Vertex>>>,
    },
}

impl Transformation {
    pub fn is_delta_wye(&self) -> bool {
        matches!(self, Transformation::Eta(_) | Transformation::DeltaWye { .. })
    }

    pub fn is_wye_delta(&self) -> bool {
        matches!(self, Transformation::Omega(_) | Transformation::WyeDelta { .. })
    }
}

fn write_edges(f: &mut Formatter, edges: &[UndirectedEdge<Vertex>]) -> fmt::Result {
    write!(f, "[")?;
    for (i, e) in edges.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{e}")?;
    }
    write!(f, "]")
}

impl Display for Transformation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use Transformation::*;

        match self {
            Omega(v) => write!(f, "Omega at {v}"),
            Eta(face) => write!(f, "Eta at {face}"),
            LoopRemoval(e) => write!(f, "P1 at {e}"),
            LeafRemoval(v) => write!(f, "P2 at {v}"),
            Series { vertex, new_edge } => {
                write!(f, "P3 at {vertex}")?;
                match new_edge {
                    Some(e) => write!(f, " with new edge: {e}"),
                    None => Ok(()),
                }
            }
            ParallelRemoval(e) => write!(f, "P4 at {e}"),
            DeltaWye { face, new_edges } => {
                write!(f, "P5 at {face}")?;
                match new_edges {
                    Some(edges) => {
                        write!(f, " with new edges: ")?;
                        write_edges(f, edges)
                    }
                    None => Ok(()),
                }
            }
            WyeDelta { vertex, new_edges } => {
                write!(f, "P6 at {vertex}")?;
                match new_edges {
                    Some(edges) => {
                        write!(f, " with new edges: ")?;
                        write_edges(f, edges)
                    }
                    None => Ok(()),
                }
            }
        }
    }
}

/// A stepwise reduction of a private copy of a plane graph.
///
/// Implementors keep the graph they were built from, so [`reset`](Self::reset) can
/// start over.
pub trait ReductionAlgorithm: Display {
    /// The current state of the graph being reduced.
    fn graph(&self) -> &PlaneGraph;

    /// Whether the graph has not reached its terminal shape yet.
    fn has_next_step(&self) -> bool;

    /// Selects and applies one transformation.
    ///
    /// # Errors
    ///
    /// [`Error::Terminal`] when called on a terminal graph, [`Error::NoRuleApplicable`]
    /// when the input violates the algorithm's connectivity precondition.
    fn next_step(&mut self) -> Result<Transformation>;

    /// Percentage of the way from the original edge count to the terminal one.
    fn progress(&self) -> u32;

    /// Restores the original graph and any derived state.
    fn reset(&mut self) -> Result<()>;

    /// Number of degree-three transformations in `sequence`, counting the final
    /// K4 to K1 step where the algorithm stops at K4.
    fn normalized_length(&self, sequence: &[Transformation]) -> usize;

    /// Steps until the graph is terminal.
    fn run(&mut self) -> Result<Vec<Transformation>> {
        let mut sequence = Vec::new();
        while self.has_next_step() {
            let step = self.next_step()?;
            tracing::debug!("{step}");
            sequence.push(step);
        }
        Ok(sequence)
    }

    /// Like [`run`](Self::run), but checks `cancel` before every step and returns the
    /// steps done so far once it is set.
    fn run_until_cancelled(&mut self, cancel: &AtomicBool) -> Result<Vec<Transformation>> {
        let mut sequence = Vec::new();
        while self.has_next_step() {
            if cancel.load(atomic::Ordering::Relaxed) {
                tracing::debug!("cancelled after {} steps", sequence.len());
                break;
            }
            let step = self.next_step()?;
            tracing::debug!("{step}");
            sequence.push(step);
        }
        Ok(sequence)
    }

    fn delta_wye_count(&self, sequence: &[Transformation]) -> usize {
        sequence.iter().filter(|t| t.is_delta_wye()).count()
    }

    fn wye_delta_count(&self, sequence: &[Transformation]) -> usize {
        sequence.iter().filter(|t| t.is_wye_delta()).count()
    }
}

/// Linear interpolation of the edge count from `original` down to `target`.
fn progress(original: usize, current: usize, target: usize) -> u32 {
    if original <= target || current == target {
        return 100;
    }
    let done = 100.0 - 100.0 * (current as f64 - target as f64) / (original - target) as f64;
    done as u32
}

fn choose<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Result<&'a T> {
    items.choose(rng).ok_or(Error::NoRuleApplicable)
}

/// A strategy name that none of the strategy enums accepts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown strategy `{0}`")]
pub struct UnknownStrategy(pub String);
