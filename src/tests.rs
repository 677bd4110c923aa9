use crate::{algorithm::*, *};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::atomic::AtomicBool;

fn adjacency<R: AsRef<[usize]>>(rows: &[R]) -> PlaneGraph {
    PlaneGraph::from_adjacency_rows(rows).unwrap()
}

fn incidence<R: AsRef<[usize]>>(rows: &[R]) -> PlaneGraph {
    PlaneGraph::from_incidence_rows(rows).unwrap()
}

fn v(id: usize) -> Vertex {
    Vertex(id)
}

fn e(id: usize, l: usize, r: usize) -> UndirectedEdge<Vertex> {
    UndirectedEdge::new(id, v(l), v(r))
}

fn dl(id: usize, l: usize, r: usize) -> EdgeTail<Vertex> {
    e(id, l, r).left_tail()
}

fn dr(id: usize, l: usize, r: usize) -> EdgeTail<Vertex> {
    e(id, l, r).right_tail()
}

fn k2() -> PlaneGraph {
    adjacency(&[[1usize, 2], [2, 1]])
}

fn k3() -> PlaneGraph {
    adjacency(&[[1usize, 2, 3], [2, 1, 3], [3, 1, 2]])
}

fn p4() -> PlaneGraph {
    adjacency::<&[usize]>(&[&[0, 1], &[1, 0, 2], &[2, 1, 3], &[3, 2]])
}

fn k4() -> PlaneGraph {
    adjacency(data::K4)
}

fn cube() -> PlaneGraph {
    adjacency(data::CUBE)
}

fn first_face(graph: &PlaneGraph) -> Circuit<Vertex> {
    graph.faces().unwrap().into_iter().next().unwrap()
}

fn euler_characteristic<V: Node>(graph: &PlaneGraph<V>) -> isize {
    graph.order() as isize - graph.size() as isize + graph.number_of_faces().unwrap() as isize
}

#[test]
fn edge_primitives() {
    assert_eq!(e(800, 22, 4).other_end(v(22)), Some(v(4)));
    assert_eq!(e(2, 4, 4).other_end(v(1)), None);

    assert_eq!(e(20, 3, 2).vertices().len(), 2);
    assert_eq!(e(20, 4, 4).vertices().len(), 1);

    assert!(e(1, 2, 3).is_incident_to(v(3)));
    assert!(e(1, 2, 2).is_incident_to(v(2)));
    assert!(!e(1, 2, 2).is_incident_to(v(1)));

    assert!(e(1, 2, 3).is_adjacent_to(e(2, 3, 4)));
    assert!(e(1, 2, 3).is_adjacent_to(e(2, 3, 3)));
    assert!(!e(1, 2, 2).is_adjacent_to(e(2, 3, 4)));

    assert!(e(1, 2, 3).is_parallel_to(e(2, 3, 2)));
    assert!(!e(1, 2, 3).is_parallel_to(e(2, 2, 4)));

    assert_eq!(e(1, 22, 3).shared_vertex(e(99, 1, 22)), Some(v(22)));
    assert_eq!(e(1, 22, 1).shared_vertex(e(99, 1, 22)), None);
    assert_eq!(e(1, 22, 3).shared_vertex(e(99, 4, 4)), None);

    // identity is the id alone
    assert_eq!(e(4, 1, 2), e(4, 99, 99));
    assert_ne!(e(4, 1, 2), e(5, 1, 2));
    assert!(e(4, 200, 200) < e(20, 1, 1));

    assert_eq!(e(99, 2, 3).to_string(), "[e99]{2, 3}");
}

#[test]
fn edge_tail_primitives() {
    assert!(dl(2, 3, 4).is_continued_by(dl(1, 4, 2)));
    assert!(dl(2, 4, 4).is_continued_by(dl(1, 4, 2)));
    assert!(!dl(2, 3, 4).is_continued_by(dl(1, 3, 4)));
    assert!(dl(2, 3, 4).is_continued_by(dr(1, 3, 4)));
    assert!(!dl(2, 3, 4).is_continued_by(dl(1, 8, 9)));

    assert_eq!(dr(1, 2, 3).other_side(), dl(1, 2, 3));
    assert_eq!(dl(1, 2, 3).edge(), e(1, 2, 3));
    assert_eq!(dl(1, 2, 3), dl(1, 777, 999));
    assert!(dl(1, 2, 3) < dr(1, 2, 3));

    assert_eq!(dl(1, 3, 4).to_string(), "[e1](3 -> 4)");
    assert_eq!(dr(1, 8, 9).to_string(), "[e1](9 -> 8)");
}

#[test]
fn rotation_list() {
    let list: RotationList<u32> = vec![1, 2, 3].into();

    assert_eq!(list.next_after(&3), Some(&1));
    assert_eq!(list.prev_before(&1), Some(&3));
    assert_eq!(list.rotate_by(&2, 2), Some(&1));
    assert_eq!(list.rotate_at(&2, RotationDirection::CounterClockwise), Some(&1));
    assert_eq!(list.get_mod(-1), Some(&3));
    assert_eq!(list.next_after(&7), None);
    assert_eq!(RotationList::<u32>::new().get_mod(0), None);
}

#[test]
fn walks() {
    let back_and_forth =
        Walk::new(vec![dl(0, 0, 1), dl(1, 1, 2), dr(1, 1, 2), dl(1, 1, 2)]).unwrap();
    let p4 = Walk::new(vec![dl(0, 0, 1), dl(1, 1, 2), dl(2, 2, 3), dl(3, 3, 4)]).unwrap();
    let c3 = Walk::new(vec![dl(0, 0, 1), dl(1, 1, 2), dl(2, 2, 0)]).unwrap();

    assert!(c3.is_closed());
    assert!(!p4.is_closed());

    assert!(back_and_forth.has_repeated_edges());
    assert!(!c3.has_repeated_edges());

    assert!(back_and_forth.has_repeated_vertices());
    assert!(c3.has_repeated_vertices());
    assert!(!p4.has_repeated_vertices());
    assert!(p4.is_path());
    assert!(c3.is_cycle());
    assert!(!back_and_forth.is_trail());

    assert_eq!(c3.vertex_list(), vec![v(0), v(1), v(2), v(0)]);
    assert_eq!(back_and_forth.to_string(), "(0 -> 1 -> 2 -> 1 -> 2)");
    assert_eq!(c3.to_string(), "(0 -> 1 -> 2 -> 0)");
    assert_eq!(Walk::trivial(v(5)).to_string(), "(5)");

    assert_eq!(
        Walk::new(vec![dl(0, 0, 1), dl(1, 2, 3)]),
        Err(WalkError::NotContiguous)
    );
    assert_eq!(Walk::<Vertex>::new(vec![]), Err(WalkError::Empty));
    assert_eq!(p4.to_circuit(), Err(WalkError::NotClosed));
}

#[test]
fn circuits() {
    let c3 = Circuit::new(vec![dl(0, 0, 1), dl(1, 1, 2), dl(2, 2, 0)]).unwrap();
    let c3a = Circuit::new(vec![dl(2, 2, 0), dl(0, 0, 1), dl(1, 1, 2)]).unwrap();
    let c4 = Circuit::new(vec![dl(0, 0, 1), dl(1, 1, 2), dl(2, 2, 3), dl(3, 3, 0)]).unwrap();
    let digon = Circuit::new(vec![dl(0, 0, 1), dr(0, 0, 1)]).unwrap();

    assert_eq!(c3, c3a);
    assert!(c3 < c4);
    assert_eq!(c3.darts(), &[dl(0, 0, 1), dl(1, 1, 2), dl(2, 2, 0)]);

    assert_eq!(c3.vertex_list(), vec![v(0), v(1), v(2)]);
    assert_eq!(digon.vertex_list(), vec![v(0), v(1)]);
    assert!(!c3.has_repeated_vertices());
    assert!(c3.is_triangle());
    assert!(!digon.is_digon());

    let cycle = c4.to_cycle().unwrap();
    assert_eq!(cycle.vertex_list_clockwise(), vec![v(3), v(2), v(1), v(0)]);

    let triangle = c3.to_cycle().unwrap();
    assert!(triangle < cycle);
    assert_eq!(
        BTreeSet::from([cycle.clone(), triangle.clone()]).first(),
        Some(&triangle)
    );
    assert_eq!(c3.to_string(), "(0 -> 1 -> 2 -> 0)");
    assert_eq!(cycle.to_string(), "(0 -> 1 -> 2 -> 3 -> 0)");

    assert_eq!(
        Circuit::new(vec![dl(0, 0, 1), dr(0, 0, 1), dl(0, 0, 1), dr(0, 0, 1)]),
        Err(WalkError::RepeatedEdge)
    );
}

#[test]
fn create_cube() {
    let cube = cube();

    assert_eq!(cube.order(), 8);
    assert_eq!(cube.size(), 12);
    assert_eq!(cube.number_of_faces().unwrap(), 6);
    assert!(cube.is_simple());
    assert!(cube.is_valid());
    assert_eq!(
        cube.to_string(),
        "Plane graph with 8 vertices, 12 edges and 6 faces."
    );
}

#[test]
fn vertex_induced_subgraph() {
    let c4 = cube()
        .vertex_induced_subgraph(&(0..4).map(Vertex).collect())
        .unwrap();

    assert_eq!(c4.order(), 4);
    assert_eq!(c4.size(), 4);
    assert_eq!(c4.number_of_faces().unwrap(), 2);
    assert!(c4.is_simple());
}

#[test]
fn faces_and_neighbors() {
    assert_eq!(k3().number_of_faces().unwrap(), 2);
    assert_eq!(k2().number_of_faces().unwrap(), 1);

    let cube = cube();
    assert!(cube.are_neighbors(v(3), v(5)));
    assert!(!cube.are_neighbors(v(1), v(5)));
    assert_eq!(cube.degree(v(0)), 3);
    assert_eq!(
        cube.neighbors(v(0)).iter().copied().collect::<Vec<_>>(),
        vec![v(3), v(1), v(4)]
    );
    assert_eq!(cube.next_vertex(v(0), v(4)), Some(v(3)));
    assert_eq!(cube.prev_vertex(v(0), v(3)), Some(v(4)));

    // every dart lies on exactly one face
    let darts: usize = cube.faces().unwrap().iter().map(|f| f.len()).sum();
    assert_eq!(darts, cube.dart_count());
}

#[test]
fn k4_both_formats() {
    for k4 in [k4(), incidence(data::K4_INCIDENCE)] {
        assert!(k4.is_k4());
        assert!(k4.is_simple());
        assert_eq!(k4.order(), 4);
        assert_eq!(k4.size(), 6);
        assert_eq!(k4.number_of_faces().unwrap(), 4);
        assert_eq!(k4.delta_faces().unwrap().len(), 4);
        assert_eq!(k4.wye_vertices().len(), 4);
    }
}

#[test]
fn loop_graph() {
    let graph = incidence(data::LOOP_INCIDENCE);

    assert_eq!(graph.order(), 1);
    assert_eq!(graph.size(), 1);
    assert_eq!(graph.number_of_faces().unwrap(), 2);
    assert!(graph.has_loop_edges());
    assert!(!graph.has_parallel_edges());
    assert!(graph.delta_faces().unwrap().is_empty());
    assert!(graph.wye_vertices().is_empty());
    assert!(graph
        .incident_edge_tails(v(0))
        .iter()
        .all(|&e| graph.is_empty_loop(e)));
}

#[test]
fn double_loop_graph() {
    let graph = incidence(data::DOUBLELOOP_INCIDENCE);

    assert_eq!(graph.order(), 1);
    assert_eq!(graph.size(), 2);
    assert_eq!(graph.number_of_faces().unwrap(), 3);
    assert!(graph.has_loop_edges());
    assert!(graph.has_parallel_edges());
    assert_eq!(graph.number_of_loop_edges(), 2);
    assert_eq!(graph.number_of_parallel_edges(), 1);
    assert!(!graph.is_simple());
}

#[test]
fn invalid_graphs() {
    assert!(matches!(
        PlaneGraph::<Vertex>::from_incidence_rows(&[[0usize, 0]]),
        Err(InvalidGraph::WrongMultiplicity { id: 0, count: 1 })
    ));
    assert!(matches!(
        PlaneGraph::<Vertex>::from_incidence_rows(&[[0usize, 5], [1, 5], [2, 5]]),
        Err(InvalidGraph::TooManyEnds(5))
    ));
    assert!(matches!(
        PlaneGraph::<Vertex>::from_adjacency_rows(&[[0usize, 0]]),
        Err(InvalidGraph::AdjacencyLoop(_))
    ));

    let mut map = k4().into_incidence_map();
    map.get_mut(&v(1)).unwrap().push(dl(0, 2, 3));
    assert!(PlaneGraph::from_incidence_map(map).is_err());
}

#[test]
fn darts_must_match_their_vertex() {
    let edge = e(0, 1, 2);
    let swapped = IncidenceMap::from([
        (v(1), RotationList::from(vec![edge.right_tail()])),
        (v(2), RotationList::from(vec![edge.left_tail()])),
    ]);
    assert!(matches!(
        PlaneGraph::from_incidence_map(swapped),
        Err(InvalidGraph::WrongSource { .. })
    ));

    let lp = e(0, 1, 1);
    let two_left = IncidenceMap::from([(v(1), RotationList::from(vec![lp.left_tail(); 2]))]);
    assert!(matches!(
        PlaneGraph::from_incidence_map(two_left),
        Err(InvalidGraph::WrongSides(0))
    ));

    let rotation = RotationList::from(vec![lp.left_tail(), lp.right_tail()]);
    let graph = PlaneGraph::from_incidence_map(IncidenceMap::from([(v(1), rotation)])).unwrap();
    assert!(graph.is_valid());
    assert_eq!(graph.number_of_faces().unwrap(), 2);
}

#[test]
fn duplicate_rows() {
    assert!(matches!(
        PlaneGraph::<Vertex>::from_incidence_rows(&[[1usize, 0], [2, 0], [1, 0]]),
        Err(InvalidGraph::DuplicateVertex(_))
    ));
    assert!(matches!(
        PlaneGraph::<Vertex>::from_adjacency_rows(&[[1usize, 2], [2, 1], [2, 1]]),
        Err(InvalidGraph::DuplicateVertex(_))
    ));
    assert!(matches!(
        parse_adjacency_list("1 2\n2 1\n1 2\n"),
        Err(Error::InvalidGraph(InvalidGraph::DuplicateVertex(_)))
    ));
}

#[test]
fn parse_text_formats() {
    let graph = parse_adjacency_list("1 2\n\n2 1\n").unwrap();
    assert_eq!(graph.order(), 2);
    assert_eq!(graph.size(), 1);

    let graph = parse_incidence_list("1 1 2 3\n2 3 4 5\n3 5 6 1\n4 6 4 2").unwrap();
    assert!(graph.is_k4());

    assert!(matches!(
        parse_adjacency_list("1 2\n2 x"),
        Err(Error::Parse(ParseError::Integer { line: 2, .. }))
    ));
    assert!(matches!(
        read_adjacency_list("/nonexistent/graph.txt"),
        Err(Error::Parse(ParseError::Io { .. }))
    ));
}

#[test]
fn reduce_series() {
    let mut p4 = p4();
    assert_eq!(p4.size(), 3);
    assert!(!p4.are_neighbors(v(0), v(2)));

    let edge = p4.reduce_series(v(1)).unwrap();

    assert_eq!(p4.size(), 2);
    assert_eq!(p4.order(), 3);
    assert!(p4.are_neighbors(v(0), v(2)));
    assert_eq!(edge.vertices(), BTreeSet::from([v(0), v(2)]));
}

#[test]
fn reduce_wye_delta() {
    let mut k4 = k4();
    k4.reduce_wye_delta(v(4)).unwrap();

    assert!(!k4.is_k4());
    assert_eq!(k4.order(), 3);
    assert_eq!(k4.size(), 6);
    assert!(k4.is_valid());
}

#[test]
fn reduce_omega() {
    let mut k4 = k4();
    let edges = k4.reduce_omega(v(4)).unwrap();

    assert!(edges.is_empty());
    assert!(!k4.is_k4());
    assert_eq!(k4.order(), 3);
    assert_eq!(k4.size(), 3);
}

#[test]
fn reduce_delta_wye() {
    let mut k4 = k4();
    let face = first_face(&k4);
    let center = k4.fresh_vertex();
    k4.reduce_delta_wye(face, center).unwrap();

    assert!(!k4.is_k4());
    assert_eq!(k4.order(), 5);
    assert_eq!(k4.size(), 6);
    assert_eq!(k4.number_of_faces().unwrap(), 3);
    assert!(k4.is_wye(center));
}

#[test]
fn reduce_eta() {
    let mut k4 = k4();
    let face = first_face(&k4);
    let center = k4.fresh_vertex();
    k4.reduce_eta(face, center).unwrap();

    assert!(!k4.is_k4());
    assert_eq!(k4.order(), 2);
    assert_eq!(k4.size(), 3);
    assert_eq!(k4.number_of_faces().unwrap(), 3);
    assert_eq!(k4.number_of_parallel_edges(), 2);
}

#[test]
fn manually_reduce_k4_to_k1() {
    let mut graph = k4();
    assert!(graph.is_wye(v(3)));

    graph.reduce_omega(v(3)).unwrap();
    graph.reduce_series(v(4)).unwrap();
    let parallel = *graph.edges().first().unwrap();
    graph.remove_edge(parallel);
    graph.remove_vertex(v(2));

    assert!(graph.is_k1());
    assert_eq!(graph.order(), 1);
    assert_eq!(graph.size(), 0);
    assert_eq!(graph.number_of_faces().unwrap(), 1);
}

#[test]
fn rejected_operators() {
    let mut k4 = k4();
    let darts = k4.incident_edge_tails(v(1)).to_vec();

    assert!(matches!(
        k4.reduce_series(v(1)),
        Err(OperatorErr {
            err: SeriesError::Degree { degree: 3, .. },
            ..
        })
    ));
    assert!(matches!(
        k4.check_close_triangle(darts[0], darts[1]),
        Err(CloseTriangleError::RotationOrder)
    ));
    assert!(matches!(
        k4.check_close_triangle(darts[0], k4.incident_edge_tails(v(2))[0]),
        Err(CloseTriangleError::SourceMismatch)
    ));
    assert!(k4.check_close_triangle(darts[1], darts[0]).is_ok());

    let face = first_face(&k4);
    assert!(matches!(
        k4.reduce_delta_wye(face.clone(), v(1)),
        Err(OperatorErr {
            err: DeltaWyeError::CenterExists(_),
            ..
        })
    ));

    let square = first_face(&cube());
    assert!(matches!(
        cube().check_reduce_delta_wye(square, v(100)),
        Err(DeltaWyeError::NotTriangle(_))
    ));

    // a rejected operator leaves the graph alone and hands itself back
    let err = k4.reduce_wye_delta(v(9)).unwrap_err();
    assert_eq!(err.op.wye, v(9));
    assert!(k4.is_k4());
    assert_eq!(k4.size(), 6);
}

#[test]
fn close_triangle_keeps_faces_consistent() {
    let mut c4 = cube()
        .vertex_induced_subgraph(&(0..4).map(Vertex).collect())
        .unwrap();
    let darts = c4.incident_edge_tails(v(0)).to_vec();
    let (left, right) = if c4.check_close_triangle(darts[1], darts[0]).is_ok() {
        (darts[1], darts[0])
    } else {
        (darts[0], darts[1])
    };

    c4.close_triangle(left, right).unwrap();

    assert_eq!(c4.size(), 5);
    assert_eq!(c4.number_of_faces().unwrap(), 3);
    assert_eq!(c4.delta_faces().unwrap().len(), 2);
}

#[test]
fn add_star_vertex() {
    let mut k3 = k3();
    let face = first_face(&k3);
    let center = k3.fresh_vertex();

    k3.add_star_vertex_in_cycle(face.to_cycle().unwrap(), center)
        .unwrap();

    assert!(k3.is_k4());
    assert_eq!(k3.number_of_faces().unwrap(), 4);
    assert_eq!(k3.delta_faces().unwrap().len(), 4);
}

#[test]
fn medial_loop_graph() {
    let medial = MedialGraph::new(&incidence(data::LOOP_INCIDENCE)).unwrap();

    assert_eq!(medial.order(), 1);
    assert_eq!(medial.size(), 2);
    assert_eq!(medial.number_of_faces().unwrap(), 3);
}

#[test]
fn medial_k2_k3() {
    let medial = MedialGraph::new(&k2()).unwrap();
    assert_eq!(medial.order(), 1);
    assert_eq!(medial.size(), 2);
    assert_eq!(medial.number_of_faces().unwrap(), 3);

    let medial = MedialGraph::new(&k3()).unwrap();
    assert_eq!(medial.order(), 3);
    assert_eq!(medial.size(), 6);
    assert_eq!(medial.number_of_faces().unwrap(), 5);
}

#[test]
fn medial_k4() {
    let k4 = k4();
    let medial = MedialGraph::new(&k4).unwrap();

    assert_eq!(medial.order(), 6);
    assert_eq!(medial.size(), 12);
    assert_eq!(medial.number_of_faces().unwrap(), 8);
    assert!(medial.vertices().all(|x| medial.degree(x) == 4));

    assert_eq!(medial.geodesics().unwrap().len(), 3);

    let faces = medial.faces().unwrap();
    let black: BTreeSet<Vertex> = faces
        .iter()
        .filter_map(|f| medial.to_unmedial_vertex(f))
        .collect();
    assert_eq!(black, k4.vertex_set());

    let white: Vec<_> = faces
        .iter()
        .filter(|f| !medial.is_unmedial_vertex(f))
        .collect();
    assert_eq!(white.len(), 4);
    for f in white {
        let dart = medial.to_unmedial_face(f).unwrap();
        assert!(k4.is_empty_triangle(dart));
    }
}

#[test]
fn lenses_of_k4() {
    let medial = MedialGraph::new(&k4()).unwrap();
    let lenses = medial.lenses().unwrap();

    assert_eq!(lenses.len(), 12);
    for lens in &lenses {
        assert_eq!(lens.number_of_inner_faces(), 2);
        assert!(lens.south_pole() > lens.north_pole());
        assert!(lens.is_boundary_vertex(lens.south_pole()));
        assert_eq!(lens.left_boundary().end(), lens.right_boundary().end());
        assert!(lens
            .boundary_faces()
            .iter()
            .all(|f| f.is_triangle() && lens.is_polar(f)));
    }
}

#[test]
fn geodesic_walks() {
    let medial = MedialGraph::new(&k4()).unwrap();
    let start = *medial.edge_tails().first().unwrap();
    let geodesic = medial.geodesic_from(start).unwrap();

    assert_eq!(geodesic.len(), 4);
    assert_eq!(medial.direct_extension(geodesic.darts()[0]).unwrap(), geodesic.darts()[1]);

    let to = geodesic.darts()[2].source();
    let walk = medial.geodesic_walk_between(geodesic.darts()[0], to).unwrap();
    assert_eq!(walk.len(), 2);
    assert_eq!(walk.end(), to);
}

#[test]
fn statistics() {
    let stats = GraphStatistics::new(&k4()).unwrap();
    assert_eq!(
        stats,
        GraphStatistics {
            order: 4,
            size: 6,
            faces: 4,
            loops: 0,
            parallels: 0,
            medial_loops: 0,
            medial_parallels: 0,
        }
    );

    let stats = GraphStatistics::new(&incidence(data::LOOP_INCIDENCE)).unwrap();
    assert_eq!(
        stats.to_string(),
        "1 Vertex\n1 Edge\n2 Faces\n\n1 Loop\n0 Parallel edges\n\n2 Medial loops\n1 Medial parallel edge\n"
    );
}

#[test]
fn dot_output() {
    let k2 = k2();

    assert_eq!(
        k2.dot(PlaneGraphDotOptions::none()).to_string(),
        "graph PlaneGraph {\n\
         node [shape = circle]\n\
         vertex_1 [label=\"1\"]\n\
         vertex_2 [label=\"2\"]\n\
         vertex_1 -- vertex_2\n\
         }\n"
    );
    assert!(k2
        .dot(PlaneGraphDotOptions::all())
        .to_string()
        .contains("vertex_1 -- vertex_2 [label=\"e0\", taillabel=\"0\", headlabel=\"0\"]"));
}

#[test]
fn generators() {
    let wheel = adjacency(&data::wheel(6).unwrap());
    assert_eq!(wheel.order(), 6);
    assert_eq!(wheel.size(), 10);
    assert_eq!(wheel.number_of_faces().unwrap(), 6);
    assert_eq!(wheel.degree(v(5)), 5);

    let cylinder = adjacency(&data::cylinder(3, 3).unwrap());
    assert_eq!(cylinder.order(), 9);
    assert_eq!(cylinder.size(), 15);
    assert_eq!(cylinder.number_of_faces().unwrap(), 8);

    assert_eq!(data::wheel(0), None);
    assert_eq!(data::wheel(3), None);
    assert_eq!(data::cylinder(0, 0), None);
    assert_eq!(data::cylinder(2, 3), None);
    assert_eq!(data::cylinder(3, 1), None);

    for rows in [data::OCTAHEDRON, data::ICOSAHEDRON, data::DODECAHEDRON] {
        let graph = adjacency(rows);
        assert!(graph.is_simple());
        assert_eq!(euler_characteristic(&graph), 2);
    }
}

#[test]
fn transformation_display() {
    let face = Circuit::new(vec![dl(0, 1, 2), dl(1, 2, 3), dl(2, 3, 1)]).unwrap();

    assert_eq!(Transformation::Omega(v(3)).to_string(), "Omega at 3");
    assert_eq!(
        Transformation::Eta(face.clone()).to_string(),
        "Eta at (1 -> 2 -> 3 -> 1)"
    );
    assert_eq!(
        Transformation::LoopRemoval(e(0, 0, 0)).to_string(),
        "P1 at [e0]{0, 0}"
    );
    assert_eq!(
        Transformation::Series {
            vertex: v(4),
            new_edge: Some(e(7, 1, 2)),
        }
        .to_string(),
        "P3 at 4 with new edge: [e7]{1, 2}"
    );
    assert_eq!(
        Transformation::DeltaWye {
            face,
            new_edges: Some(vec![e(5, 9, 1), e(6, 9, 2)]),
        }
        .to_string(),
        "P5 at (1 -> 2 -> 3 -> 1) with new edges: [[e5]{9, 1}, [e6]{9, 2}]"
    );
    assert_eq!(
        Transformation::WyeDelta {
            vertex: v(4),
            new_edges: None,
        }
        .to_string(),
        "P6 at 4"
    );
}

#[test]
fn strategy_names() {
    use LensTriangleSelectionStrategy as Lts;

    assert_eq!("min".parse(), Ok(Lts::MinLenses));
    assert_eq!("PREFER_POLE".parse(), Ok(Lts::PreferPole));
    assert_eq!("nonpole".parse(), Ok(Lts::PreferNonpole));
    assert_eq!(
        "bogus".parse::<Lts>(),
        Err(UnknownStrategy("bogus".to_owned()))
    );

    assert_eq!("max".parse(), Ok(StartVertexStrategy::Maximum));
    assert_eq!("facefirst".parse(), Ok(TransformSelectionStrategy::FaceFirst));
    assert_eq!("LONG".parse(), Ok(TemperatureStrategy::Long));

    assert_eq!(TransformSelectionStrategy::default(), TransformSelectionStrategy::MaxLabel);
    assert_eq!(TemperatureStrategy::default(), TemperatureStrategy::Short);
    assert_eq!(Lts::PreferNonpole.to_string(), "PREFER_NONPOLE");
}

#[test]
fn transformation_selection() {
    use TransformSelectionStrategy::*;

    let leaf = Candidate {
        pattern: Pattern::Leaf(v(1)),
        min_label: 1,
        max_label: 1,
    };
    let delta = Candidate {
        pattern: Pattern::Delta(dl(0, 1, 2)),
        min_label: 2,
        max_label: 3,
    };
    let wye = Candidate {
        pattern: Pattern::Wye(v(2)),
        min_label: 1,
        max_label: 3,
    };
    let candidates = [leaf, delta, wye];
    let mut rng = StdRng::seed_from_u64(0);
    let mut select = |s| select_transformation(&candidates, s, &mut rng).unwrap().pattern;

    assert_eq!(select(MinLabel), leaf.pattern);
    assert_eq!(select(MaxLabel), delta.pattern);
    assert_eq!(select(MinDegree), leaf.pattern);
    assert_eq!(select(MaxDegree), wye.pattern);
    assert_eq!(select(VertexFirst), leaf.pattern);
    assert_eq!(select(FaceFirst), delta.pattern);
    let random = select(Random);
    assert!(candidates.iter().any(|c| c.pattern == random));

    assert_eq!(select_transformation(&[], MaxLabel, &mut StdRng::seed_from_u64(0)), None);
}

#[test]
fn boundary_triangle_selection() {
    use LensTriangleSelectionStrategy::*;

    let prism = adjacency(&data::cylinder(3, 2).unwrap());
    let medial = MedialGraph::new(&prism).unwrap();
    let minimal: Vec<Lens> = medial
        .lenses()
        .unwrap()
        .into_iter()
        .filter(|l| l.number_of_inner_faces() == 2)
        .collect();
    assert_eq!(minimal.len(), 6);

    // each wye bounds one minimal lens, each end triangle three
    let fewest = boundary_triangle_candidates(&minimal, MinLenses);
    assert_eq!(fewest.len(), 6);
    assert_eq!(
        fewest
            .iter()
            .filter_map(|t| medial.to_unmedial_vertex(t))
            .collect::<BTreeSet<_>>(),
        prism.vertices().collect::<BTreeSet<_>>()
    );

    let most = boundary_triangle_candidates(&minimal, MaxLenses);
    assert_eq!(most.len(), 2);
    for t in &most {
        assert_eq!(medial.to_unmedial_vertex(t), None);
        let dart = medial.to_unmedial_face(t).unwrap();
        assert!(prism.get_face(dart).unwrap().is_triangle());
    }

    assert_eq!(boundary_triangle_candidates(&minimal, Random).len(), 8);

    let mut rng = StdRng::seed_from_u64(3);
    let picked = select_boundary_triangle(&minimal, MaxLenses, &mut rng).unwrap();
    assert!(most.contains(&picked));
    assert!(select_boundary_triangle(&[], Random, &mut rng).is_err());
}

#[test]
fn pole_preference_falls_back() {
    use LensTriangleSelectionStrategy::*;

    let lenses = MedialGraph::new(&cube()).unwrap().lenses().unwrap();
    let with_inner_faces = |n: usize| -> Vec<Lens> {
        lenses
            .iter()
            .filter(|l| l.number_of_inner_faces() == n)
            .cloned()
            .collect()
    };
    // on the cube, the 3-face lenses only have polar boundary triangles and the
    // 4-face lenses only non-polar ones
    let polar_only = with_inner_faces(3);
    let nonpolar_only = with_inner_faces(4);
    assert_eq!(polar_only.len(), 12);
    assert_eq!(nonpolar_only.len(), 12);

    let mixed: Vec<Lens> = polar_only.iter().chain(&nonpolar_only).cloned().collect();
    let pole = boundary_triangle_candidates(&mixed, PreferPole);
    let nonpole = boundary_triangle_candidates(&mixed, PreferNonpole);
    assert_eq!(pole.len(), 24);
    assert_eq!(nonpole.len(), 24);
    assert!(pole
        .iter()
        .all(|t| polar_only.iter().any(|l| l.boundary_faces().contains(t) && l.is_polar(t))));
    assert!(nonpole
        .iter()
        .all(|t| nonpolar_only.iter().any(|l| l.boundary_faces().contains(t) && !l.is_polar(t))));

    assert_eq!(
        boundary_triangle_candidates(&polar_only, PreferNonpole),
        boundary_triangle_candidates(&polar_only, PreferPole)
    );
    assert_eq!(
        boundary_triangle_candidates(&nonpolar_only, PreferPole),
        boundary_triangle_candidates(&nonpolar_only, PreferNonpole)
    );
    assert!(boundary_triangle_candidates(&[], PreferPole).is_empty());
}

#[test]
fn temperature_move_selection() {
    use TemperatureMove::*;
    use TemperatureStrategy::*;

    let scored = |step, value, temperature| ScoredMove {
        step,
        value,
        temperature,
    };
    let steps = |moves: Vec<ScoredMove>| moves.into_iter().map(|m| m.step).collect::<Vec<_>>();

    let neutral = vec![
        scored(Omega(v(1)), 0, 2),
        scored(Omega(v(2)), 0, 1),
        scored(Omega(v(3)), 0, 1),
    ];
    for strategy in [Random, Short, Long] {
        assert_eq!(
            steps(best_moves(neutral.clone(), strategy)),
            [Omega(v(2)), Omega(v(3))]
        );
    }

    let mut mixed = neutral;
    mixed.extend([
        scored(Omega(v(4)), 2, 9),
        scored(Omega(v(5)), 1, 0),
        scored(Omega(v(6)), 2, 0),
    ]);
    assert_eq!(steps(best_moves(mixed.clone(), Short)), [Omega(v(4)), Omega(v(6))]);
    assert_eq!(steps(best_moves(mixed.clone(), Long)), [Omega(v(5))]);
    assert_eq!(
        steps(best_moves(mixed.clone(), Random)),
        [Omega(v(4)), Omega(v(5)), Omega(v(6))]
    );

    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        select_move(mixed, Long, &mut rng).map(|m| m.step),
        Some(Omega(v(5)))
    );
    assert!(best_moves(Vec::new(), Short).is_empty());
    assert_eq!(select_move(Vec::new(), Short, &mut rng), None);
}

#[test]
fn temperature_move_values() {
    let prism = adjacency(&data::cylinder(3, 2).unwrap());
    let algorithm = TemperatureReduction::with_rng(
        &prism,
        TemperatureStrategy::Short,
        StdRng::seed_from_u64(0),
    );
    let moves = algorithm.scored_moves().unwrap();

    assert_eq!(moves.len(), 8);
    for m in &moves {
        assert_eq!(m.temperature, 0);
        match &m.step {
            TemperatureMove::Omega(_) => assert_eq!(m.value, 1),
            TemperatureMove::Eta(face) => {
                assert!(face.is_triangle());
                assert_eq!(m.value, 3);
            }
        }
    }

    let short = best_moves(moves.clone(), TemperatureStrategy::Short);
    assert_eq!(short.len(), 2);
    assert!(short.iter().all(|m| matches!(m.step, TemperatureMove::Eta(_))));

    let long = best_moves(moves, TemperatureStrategy::Long);
    assert_eq!(long.len(), 6);
    assert!(long.iter().all(|m| matches!(m.step, TemperatureMove::Omega(_))));
}

#[test]
fn edge_labels() {
    let labels = compute_edge_labels(&k4(), v(1)).unwrap();

    assert_eq!(labels.len(), 6);
    assert_eq!(labels.values().filter(|&&l| l == 1).count(), 3);
    assert_eq!(labels.values().filter(|&&l| l == 2).count(), 3);
    for (edge, &label) in &labels {
        assert_eq!(label == 1, edge.is_incident_to(v(1)));
    }
}

#[test]
fn steinitz_on_k4() {
    let mut algorithm = SteinitzGruenbaum::with_rng(
        &k4(),
        LensTriangleSelectionStrategy::Random,
        StdRng::seed_from_u64(1),
    );

    assert!(!algorithm.has_next_step());
    assert!(matches!(algorithm.next_step(), Err(Error::Terminal("K4"))));

    let sequence = algorithm.run().unwrap();
    assert!(sequence.is_empty());
    assert_eq!(algorithm.normalized_length(&sequence), 1);
    assert_eq!(algorithm.progress(), 100);
}

#[test]
fn steinitz_on_wheel() {
    let mut algorithm = SteinitzGruenbaum::with_rng(
        &adjacency(&data::wheel(5).unwrap()),
        LensTriangleSelectionStrategy::MinLenses,
        StdRng::seed_from_u64(7),
    );
    assert_eq!(algorithm.progress(), 0);

    let sequence = algorithm.run().unwrap();

    // an omega and an eta both reach K4 in one step
    assert_eq!(sequence.len(), 1);
    assert!(sequence[0].is_wye_delta() || sequence[0].is_delta_wye());
    assert!(algorithm.graph().is_k4());
    assert_eq!(algorithm.progress(), 100);
    assert_eq!(
        algorithm.to_string(),
        "Wye-Delta-Wye algorithm based on Steinitz 1922 and Grünbaum 1967,\n\
         running on graph with 4 vertices and 6 edges.\n\
         Lens triangle selection strategy: MINLENSES."
    );
}

#[test]
fn feo_provan_on_k4() {
    let mut algorithm = FeoProvan::with_rng(
        &k4(),
        StartVertexStrategy::Minimum,
        TransformSelectionStrategy::MaxLabel,
        StdRng::seed_from_u64(0),
    )
    .unwrap()
    .with_report_new_edges(true);
    assert_eq!(algorithm.start_vertex(), v(1));

    let sequence = algorithm.run().unwrap();

    assert!(algorithm.graph().is_k1());
    assert_eq!(algorithm.graph().vertex_set(), BTreeSet::from([v(1)]));
    assert_eq!(sequence.len(), 7);
    assert_eq!(algorithm.normalized_length(&sequence), 1);
    assert_eq!(algorithm.wye_delta_count(&sequence), 1);
    assert_eq!(algorithm.delta_wye_count(&sequence), 0);
    assert!(matches!(
        &sequence[0],
        Transformation::WyeDelta {
            new_edges: Some(edges),
            ..
        } if edges.len() == 3
    ));
    assert!(matches!(algorithm.next_step(), Err(Error::Terminal("K1"))));
}

#[test]
fn feo_provan_needs_a_vertex() {
    let empty = PlaneGraph::<Vertex>::from_incidence_map(IncidenceMap::new()).unwrap();

    assert!(matches!(
        FeoProvan::new(
            &empty,
            StartVertexStrategy::Minimum,
            TransformSelectionStrategy::MaxLabel,
        ),
        Err(Error::EmptyGraph)
    ));
}

#[test]
fn temperature_on_platonic_solids() {
    for rows in [data::CUBE, data::OCTAHEDRON, data::ICOSAHEDRON, data::DODECAHEDRON] {
        for strategy in [
            TemperatureStrategy::Random,
            TemperatureStrategy::Short,
            TemperatureStrategy::Long,
        ] {
            let mut algorithm = TemperatureReduction::with_rng(
                &adjacency(rows),
                strategy,
                StdRng::seed_from_u64(3),
            );
            let sequence = algorithm.run().unwrap();

            assert!(algorithm.graph().is_k4());
            assert!(!sequence.is_empty());
            assert_eq!(algorithm.normalized_length(&sequence), sequence.len() + 1);
        }
    }
}

#[test]
fn temperature_heats_created_elements() {
    let mut kinds = BTreeSet::new();

    for rows in [data::CUBE, data::OCTAHEDRON, data::DODECAHEDRON] {
        let mut algorithm = TemperatureReduction::with_rng(
            &adjacency(rows),
            TemperatureStrategy::Random,
            StdRng::seed_from_u64(5),
        );

        while algorithm.has_next_step() {
            let before = algorithm.graph().clone();
            let vertex_temperatures: BTreeMap<Vertex, u32> = before
                .vertices()
                .map(|x| (x, algorithm.vertex_temperature(x)))
                .collect();
            let face_temperatures: BTreeMap<Circuit<Vertex>, u32> = before
                .faces()
                .unwrap()
                .into_iter()
                .map(|f| {
                    let t = algorithm.face_temperature(&f);
                    (f, t)
                })
                .collect();

            let step = algorithm.next_step().unwrap();
            let after = algorithm.graph();
            match &step {
                Transformation::Omega(x) => {
                    let heat = vertex_temperatures[x] + 1;
                    for edge in after.edges().difference(&before.edges()) {
                        assert_eq!(algorithm.edge_temperature(*edge), heat);
                    }
                }
                Transformation::Eta(face) => {
                    let heat = face_temperatures[face] + 1;
                    let created: Vec<Vertex> =
                        after.vertices().filter(|&x| !before.contains_vertex(x)).collect();
                    assert_eq!(created.len(), 1);
                    assert_eq!(algorithm.vertex_temperature(created[0]), heat);
                }
                other => panic!("unexpected transformation {other}"),
            }
            kinds.insert(step.is_wye_delta());
        }
    }

    // the cube starts with an omega, the octahedron with an eta
    assert_eq!(kinds.len(), 2);
}

#[test]
fn steinitz_strategies_reach_k4() {
    use LensTriangleSelectionStrategy::*;

    let prism = adjacency(&data::cylinder(3, 2).unwrap());
    for graph in [prism.clone(), cube(), adjacency(data::OCTAHEDRON)] {
        for strategy in [Random, MinLenses, MaxLenses, PreferPole, PreferNonpole] {
            let mut algorithm =
                SteinitzGruenbaum::with_rng(&graph, strategy, StdRng::seed_from_u64(2));
            let sequence = algorithm.run().unwrap();

            assert!(!sequence.is_empty());
            assert!(algorithm.graph().is_k4());
        }
    }

    // an eta at either end triangle leaves K4
    let mut algorithm = SteinitzGruenbaum::with_rng(&prism, MaxLenses, StdRng::seed_from_u64(0));
    let sequence = algorithm.run().unwrap();
    assert_eq!(sequence.len(), 1);
    assert!(matches!(&sequence[0], Transformation::Eta(face) if face.is_triangle()));
}

#[test]
fn reset_restores_the_input() {
    let cube = cube();
    let mut algorithms: Vec<Box<dyn ReductionAlgorithm>> = vec![
        Box::new(SteinitzGruenbaum::with_rng(
            &cube,
            LensTriangleSelectionStrategy::PreferPole,
            StdRng::seed_from_u64(11),
        )),
        Box::new(
            FeoProvan::with_rng(
                &cube,
                StartVertexStrategy::Random,
                TransformSelectionStrategy::Random,
                StdRng::seed_from_u64(11),
            )
            .unwrap(),
        ),
        Box::new(TemperatureReduction::with_rng(
            &cube,
            TemperatureStrategy::Long,
            StdRng::seed_from_u64(11),
        )),
    ];

    for algorithm in &mut algorithms {
        for _ in 0..3 {
            algorithm.reset().unwrap();
            assert_eq!(algorithm.graph().size(), 12);
            algorithm.run().unwrap();
            assert!(!algorithm.has_next_step());
        }
    }
}

#[test]
fn cancelled_run_stops_early() {
    let cancel = AtomicBool::new(true);
    let mut algorithm = TemperatureReduction::with_rng(
        &cube(),
        TemperatureStrategy::Short,
        StdRng::seed_from_u64(0),
    );

    let sequence = algorithm.run_until_cancelled(&cancel).unwrap();

    assert!(sequence.is_empty());
    assert_eq!(algorithm.graph().order(), 8);
}

proptest! {
    #[test]
    fn wheels_satisfy_euler(n in 4usize..40) {
        let graph = adjacency(&data::wheel(n).unwrap());
        let degrees: usize = graph.vertices().map(|x| graph.degree(x)).sum();

        prop_assert_eq!(graph.order(), n);
        prop_assert_eq!(graph.size(), 2 * n - 2);
        prop_assert_eq!(degrees, 2 * graph.size());
        prop_assert_eq!(euler_characteristic(&graph), 2);
    }

    #[test]
    fn cylinders_satisfy_euler(n in 3usize..10, m in 2usize..8) {
        let graph = adjacency(&data::cylinder(n, m).unwrap());
        let degrees: usize = graph.vertices().map(|x| graph.degree(x)).sum();

        prop_assert!(graph.is_simple());
        prop_assert_eq!(graph.order(), n * m);
        prop_assert_eq!(degrees, 2 * graph.size());
        prop_assert_eq!(euler_characteristic(&graph), 2);
        prop_assert_eq!(euler_characteristic(MedialGraph::new(&graph).unwrap().graph()), 2);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn algorithms_terminate_on_wheels(n in 4usize..10, seed in any::<u64>()) {
        let graph = adjacency(&data::wheel(n).unwrap());

        let mut steinitz = SteinitzGruenbaum::with_rng(
            &graph,
            LensTriangleSelectionStrategy::Random,
            StdRng::seed_from_u64(seed),
        );
        steinitz.run().unwrap();
        prop_assert!(steinitz.graph().is_k4());

        let mut feo_provan = FeoProvan::with_rng(
            &graph,
            StartVertexStrategy::Random,
            TransformSelectionStrategy::Random,
            StdRng::seed_from_u64(seed),
        )
        .unwrap();
        feo_provan.run().unwrap();
        prop_assert!(feo_provan.graph().is_k1());

        let mut temperature = TemperatureReduction::with_rng(
            &graph,
            TemperatureStrategy::Random,
            StdRng::seed_from_u64(seed),
        );
        temperature.run().unwrap();
        prop_assert!(temperature.graph().is_k4());
    }

    #[test]
    fn feo_provan_terminates_on_cylinders(
        n in 3usize..6,
        m in 2usize..5,
        seed in any::<u64>(),
    ) {
        let graph = adjacency(&data::cylinder(n, m).unwrap());
        let mut algorithm = FeoProvan::with_rng(
            &graph,
            StartVertexStrategy::Random,
            TransformSelectionStrategy::Random,
            StdRng::seed_from_u64(seed),
        )
        .unwrap();

        let sequence = algorithm.run().unwrap();

        prop_assert!(algorithm.graph().is_k1());
        prop_assert!(algorithm.normalized_length(&sequence) <= sequence.len());
    }
}
