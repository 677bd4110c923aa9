use crate::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: `{token}` is not a non-negative integer")]
    Integer { line: usize, token: String },
    #[error("could not read graph data from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Splits `text` into rows of whitespace-separated integers, skipping blank lines.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<usize>>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.split_whitespace()
                .map(|token| {
                    token.parse().map_err(|_| ParseError::Integer {
                        line: i + 1,
                        token: token.to_owned(),
                    })
                })
                .collect()
        })
        .collect()
}

fn split_row(row: &[usize]) -> Option<(usize, &[usize])> {
    row.split_first().map(|(&head, tail)| (head, tail))
}

impl PlaneGraph<Vertex> {
    /// Builds a graph from rows `v w1 w2 ...` listing the neighbors of `v` clockwise.
    pub fn from_adjacency_rows<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self, InvalidGraph> {
        Self::from_adjacency_list(rows.iter().filter_map(|row| {
            let (v, neighbors) = split_row(row.as_ref())?;
            Some((Vertex(v), neighbors.iter().copied().map(Vertex).collect::<Vec<_>>()))
        }))
    }

    /// Builds a graph from rows `v e1 e2 ...` listing the edge ids at `v` clockwise.
    pub fn from_incidence_rows<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self, InvalidGraph> {
        Self::from_incidence_list(rows.iter().filter_map(|row| {
            let (v, edges) = split_row(row.as_ref())?;
            Some((Vertex(v), edges.to_vec()))
        }))
    }
}

pub fn parse_adjacency_list(text: &str) -> Result<PlaneGraph> {
    Ok(PlaneGraph::from_adjacency_rows(&parse_rows(text)?)?)
}

pub fn parse_incidence_list(text: &str) -> Result<PlaneGraph> {
    Ok(PlaneGraph::from_incidence_rows(&parse_rows(text)?)?)
}

fn read(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_owned(),
        source,
    })
}

pub fn read_adjacency_list(path: impl AsRef<Path>) -> Result<PlaneGraph> {
    parse_adjacency_list(&read(path.as_ref())?)
}

pub fn read_incidence_list(path: impl AsRef<Path>) -> Result<PlaneGraph> {
    parse_incidence_list(&read(path.as_ref())?)
}
