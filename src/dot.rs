use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneGraphDotOptions {
    /// Label every edge with its id.
    pub edge_ids: bool,
    /// Label both ends of every edge with its index in the clockwise rotation.
    pub rotation: bool,
}

impl PlaneGraphDotOptions {
    pub fn none() -> Self {
        Self {
            edge_ids: false,
            rotation: false,
        }
    }

    pub fn all() -> Self {
        Self {
            edge_ids: true,
            rotation: true,
        }
    }
}

pub fn write_dot<V: Node>(
    graph: &PlaneGraph<V>,
    f: &mut Formatter,
    opt: PlaneGraphDotOptions,
) -> fmt::Result {
    writeln!(f, "graph PlaneGraph {{")?;
    writeln!(f, "node [shape = circle]")?;

    for v in graph.vertices() {
        writeln!(f, "vertex_{} [label=\"{}\"]", v.id(), v)?;
    }

    let rotation_index = |e: EdgeTail<V>| {
        graph
            .incident_edge_tails(e.source())
            .iter()
            .position(|&d| d == e)
    };

    for edge in graph.edges() {
        let mut attrs = Vec::new();
        if opt.edge_ids {
            attrs.push(format!("label=\"e{}\"", edge.id()));
        }
        if opt.rotation {
            if let Some(i) = rotation_index(edge.left_tail()) {
                attrs.push(format!("taillabel=\"{i}\""));
            }
            if let Some(i) = rotation_index(edge.right_tail()) {
                attrs.push(format!("headlabel=\"{i}\""));
            }
        }

        write!(
            f,
            "vertex_{} -- vertex_{}",
            edge.left().id(),
            edge.right().id()
        )?;
        if !attrs.is_empty() {
            write!(f, " [{}]", attrs.join(", "))?;
        }
        writeln!(f)?;
    }

    writeln!(f, "}}")
}

impl<V: Node> PlaneGraph<V> {
    /// The graph in Graphviz DOT format.
    pub fn dot(&self, opt: PlaneGraphDotOptions) -> impl Display + '_ {
        DisplayFn(move |f: &mut Formatter<'_>| write_dot(self, f, opt))
    }
}
