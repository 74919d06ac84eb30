use crowd_core::{Direction, Graph, GraphBuilder};

/// Marriage ties between the Florentine families; 16 vertices, vertex 1 is
/// the Medici. Each undirected tie becomes a pair of directed edges.
pub const FLORENTINE_TIES: [(usize, usize); 20] = [
    (0, 1),
    (2, 3),
    (2, 4),
    (2, 5),
    (1, 5),
    (1, 6),
    (1, 7),
    (1, 8),
    (1, 9),
    (9, 10),
    (3, 4),
    (3, 11),
    (4, 6),
    (4, 11),
    (6, 7),
    (7, 12),
    (8, 12),
    (8, 13),
    (11, 12),
    (12, 14),
];

pub const MEDICI: usize = 1;

#[must_use]
pub fn florentine() -> Graph {
    let mut builder = GraphBuilder::new(16, Direction::Directed);
    builder.with_name("florentine");
    for (left, right) in FLORENTINE_TIES {
        builder.add_edge(left, right).add_edge(right, left);
    }
    builder.build().expect("florentine graph must build")
}
