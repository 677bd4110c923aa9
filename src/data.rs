//! Built-in plane graphs.
//!
//! Every row starts with a vertex, followed by its neighbors (adjacency format) or its
//! edge ids (incidence format) in clockwise order.

pub const K4: &[&[usize]] = &[&[1, 3, 4, 2], &[2, 1, 4, 3], &[3, 2, 4, 1], &[4, 3, 2, 1]];

pub const K4_INCIDENCE: &[&[usize]] = &[&[1, 1, 2, 3], &[2, 3, 4, 5], &[3, 5, 6, 1], &[4, 6, 4, 2]];

/// One vertex with a single loop.
pub const LOOP_INCIDENCE: &[&[usize]] = &[&[0, 0, 0]];

/// One vertex with two nested loops.
pub const DOUBLELOOP_INCIDENCE: &[&[usize]] = &[&[0, 0, 0, 1, 1]];

pub const CUBE: &[&[usize]] = &[
    &[0, 3, 1, 4],
    &[1, 0, 2, 7],
    &[2, 3, 6, 1],
    &[3, 5, 2, 0],
    &[4, 5, 0, 7],
    &[5, 6, 3, 4],
    &[6, 5, 7, 2],
    &[7, 4, 1, 6],
];

pub const OCTAHEDRON: &[&[usize]] = &[
    &[0, 1, 3, 4, 2],
    &[1, 2, 5, 3, 0],
    &[2, 0, 4, 5, 1],
    &[3, 0, 1, 5, 4],
    &[4, 0, 3, 5, 2],
    &[5, 1, 2, 4, 3],
];

pub const ICOSAHEDRON: &[&[usize]] = &[
    &[0, 8, 7, 11, 5, 1],
    &[1, 0, 5, 6, 2, 8],
    &[2, 8, 1, 6, 3, 9],
    &[3, 2, 6, 4, 10, 9],
    &[4, 6, 5, 11, 10, 3],
    &[5, 0, 11, 4, 6, 1],
    &[6, 5, 4, 3, 2, 1],
    &[7, 0, 8, 9, 10, 11],
    &[8, 1, 2, 9, 7, 0],
    &[9, 8, 2, 3, 10, 7],
    &[10, 4, 11, 7, 9, 3],
    &[11, 0, 7, 10, 4, 5],
];

pub const DODECAHEDRON: &[&[usize]] = &[
    &[0, 1, 19, 10],
    &[1, 8, 2, 0],
    &[2, 1, 6, 3],
    &[3, 2, 4, 19],
    &[4, 5, 17, 3],
    &[5, 15, 4, 6],
    &[6, 7, 5, 2],
    &[7, 8, 14, 6],
    &[8, 9, 7, 1],
    &[9, 10, 13, 8],
    &[10, 0, 11, 9],
    &[11, 18, 12, 10],
    &[12, 16, 13, 11],
    &[13, 9, 12, 14],
    &[14, 13, 15, 7],
    &[15, 14, 16, 5],
    &[16, 17, 15, 12],
    &[17, 4, 16, 18],
    &[18, 19, 17, 11],
    &[19, 0, 3, 18],
];

/// Adjacency rows of the wheel with `n` vertices: a rim `0..n-1` and the hub `n-1`.
///
/// Returns `None` for fewer than 4 vertices.
pub fn wheel(n: usize) -> Option<Vec<Vec<usize>>> {
    if n < 4 {
        return None;
    }

    let m = n - 1;
    let mut rows: Vec<Vec<usize>> = (0..m)
        .map(|x| vec![x, m, (x + m - 1) % m, (x + 1) % m])
        .collect();
    rows.push(std::iter::once(m).chain(0..m).collect());
    Some(rows)
}

/// Adjacency rows of the cylinder grid with `n` columns and `m` rows.
///
/// Columns wrap around, rows do not. Vertices are numbered from 1, row by row.
/// Returns `None` for fewer than 3 columns or 2 rows.
pub fn cylinder(n: usize, m: usize) -> Option<Vec<Vec<usize>>> {
    if n < 3 || m < 2 {
        return None;
    }

    let id = |x: usize, y: usize| 1 + x + y * n;
    let right = |x: usize, y: usize| id((x + 1) % n, y);
    let left = |x: usize, y: usize| id((x + n - 1) % n, y);
    let up = |x: usize, y: usize| id(x, y - 1);
    let down = |x: usize, y: usize| id(x, y + 1);

    let mut rows = Vec::with_capacity(n * m);
    for x in 0..n {
        rows.push(vec![id(x, 0), right(x, 0), down(x, 0), left(x, 0)]);
    }
    for x in 0..n {
        for y in 1..m - 1 {
            rows.push(vec![id(x, y), right(x, y), down(x, y), left(x, y), up(x, y)]);
        }
    }
    for x in 0..n {
        let y = m - 1;
        rows.push(vec![id(x, y), right(x, y), left(x, y), up(x, y)]);
    }
    Some(rows)
}
