use crate::*;

/// Counts describing a plane graph and its medial graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStatistics {
    pub order: usize,
    pub size: usize,
    pub faces: usize,
    pub loops: usize,
    pub parallels: usize,
    pub medial_loops: usize,
    pub medial_parallels: usize,
}

impl GraphStatistics {
    pub fn new(graph: &PlaneGraph) -> Result<Self> {
        let medial = MedialGraph::new(graph)?;

        Ok(Self {
            order: graph.order(),
            size: graph.size(),
            faces: graph.number_of_faces()?,
            loops: graph.number_of_loop_edges(),
            parallels: graph.number_of_parallel_edges(),
            medial_loops: medial.number_of_loop_edges(),
            medial_parallels: medial.number_of_parallel_edges(),
        })
    }
}

fn write_count(f: &mut Formatter, count: usize, singular: &str, plural: &str) -> fmt::Result {
    writeln!(f, "{count} {}", if count == 1 { singular } else { plural })
}

impl Display for GraphStatistics {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write_count(f, self.order, "Vertex", "Vertices")?;
        write_count(f, self.size, "Edge", "Edges")?;
        write_count(f, self.faces, "Face", "Faces")?;
        writeln!(f)?;
        write_count(f, self.loops, "Loop", "Loops")?;
        write_count(f, self.parallels, "Parallel edge", "Parallel edges")?;
        writeln!(f)?;
        write_count(f, self.medial_loops, "Medial loop", "Medial loops")?;
        write_count(
            f,
            self.medial_parallels,
            "Medial parallel edge",
            "Medial parallel edges",
        )
    }
}
