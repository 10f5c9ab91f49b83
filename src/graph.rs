//! Connectivity of a carved grid

use petgraph::algo::{astar, connected_components};
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

use crate::grid::{Direction, Grid, Location};

/// Passage graph of a maze
///
/// Nodes are the cells that are in the maze, weighted with their location.
/// Edges are the interior passages between them. Boundary openings (the
/// entrance and the exit) are not edges.
pub struct MazeGraph {
    graph: Graph<Location, Direction, Undirected>,
    /// Node index of each cell, `None` for cells outside the maze
    ///
    /// Indexed as `nodes[y][x]`.
    nodes: Vec<Vec<Option<NodeIndex>>>,
}

impl MazeGraph {
    /// Build the passage graph of `grid`.
    ///
    /// Only east and north passages are followed, because every passage
    /// shows up from both of its cells.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut graph = Graph::new_undirected();
        let mut nodes: Vec<Vec<Option<NodeIndex>>> = (0..grid.height())
            .map(|_| (0..grid.width()).map(|_| None).collect())
            .collect();

        for (location, cell) in grid.iter() {
            if !cell.in_maze {
                continue;
            }
            let node_a = Self::get_or_create_node(location, &mut nodes, &mut graph);
            for direction in [Direction::East, Direction::North] {
                if !grid.has_passage(location, direction) {
                    continue;
                }
                let Some(other) = location.step(direction) else {
                    continue;
                };
                let node_b = Self::get_or_create_node(other, &mut nodes, &mut graph);
                graph.add_edge(node_a, node_b, direction);
            }
        }

        Self { graph, nodes }
    }

    fn get_or_create_node(
        location: Location,
        nodes: &mut [Vec<Option<NodeIndex>>],
        graph: &mut Graph<Location, Direction, Undirected>,
    ) -> NodeIndex {
        if let Some(node) = nodes[location.y][location.x] {
            node
        } else {
            let node = graph.add_node(location);
            nodes[location.y][location.x] = Some(node);
            node
        }
    }

    fn node(&self, location: Location) -> Option<NodeIndex> {
        *self.nodes.get(location.y)?.get(location.x)?
    }

    /// Number of cells reached by the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of interior passages.
    pub fn passage_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Are all maze cells joined into one piece?
    pub fn is_connected(&self) -> bool {
        connected_components(&self.graph) <= 1
    }

    /// Is this a perfect maze, with exactly one path between any two cells?
    pub fn is_perfect(&self) -> bool {
        self.is_connected() && self.passage_count() + 1 == self.node_count().max(1)
    }

    /// Path of cells from `from` to `to`, both included.
    ///
    /// Returns `None` if either cell is outside the maze or there is no
    /// connection between them.
    pub fn path(&self, from: Location, to: Location) -> Option<Vec<Location>> {
        let start = self.node(from)?;
        let goal = self.node(to)?;
        let (_, nodes) = astar(
            &self.graph,
            start,
            |n| n == goal,
            |_| 1usize,
            |n| self.graph[n].distance(to),
        )?;
        Some(nodes.into_iter().map(|n| self.graph[n]).collect())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use crate::graph::MazeGraph;
    use crate::grid::{Direction, Grid, Location};
    use crate::session::MazeSession;

    #[test]
    fn graph_of_hand_carved_corridor() {
        let mut grid = Grid::new(3, 2).unwrap();
        let start = Location::new(0, 0);
        grid.mark_start(start);
        grid.carve_passage(start, Location::new(1, 0), Direction::East);
        grid.carve_passage(Location::new(1, 0), Location::new(1, 1), Direction::North);

        let graph = MazeGraph::from_grid(&grid);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.passage_count(), 2);
        assert!(graph.is_perfect());
        assert_eq!(
            graph.path(start, Location::new(1, 1)),
            Some(vec![start, Location::new(1, 0), Location::new(1, 1)])
        );
        assert_eq!(graph.path(start, Location::new(2, 1)), None);
        assert_eq!(graph.path(start, Location::new(9, 9)), None);
    }

    #[test]
    fn loop_is_not_perfect() {
        let mut grid = Grid::new(2, 2).unwrap();
        let a = Location::new(0, 0);
        let b = Location::new(1, 0);
        let c = Location::new(1, 1);
        let d = Location::new(0, 1);
        grid.mark_start(a);
        grid.carve_passage(a, b, Direction::East);
        grid.carve_passage(b, c, Direction::North);
        grid.carve_passage(c, d, Direction::West);
        grid.carve_passage(d, a, Direction::South);

        let graph = MazeGraph::from_grid(&grid);
        assert!(graph.is_connected());
        assert_eq!(graph.passage_count(), 4);
        assert!(!graph.is_perfect());
    }

    #[test]
    fn disconnected_fragments_are_detected() {
        let mut grid = Grid::new(4, 1).unwrap();
        grid.mark_start(Location::new(0, 0));
        grid.carve_passage(Location::new(2, 0), Location::new(3, 0), Direction::East);
        // Cell (2, 0) was never added to the maze, so it is not a node and
        // (3, 0) stands alone.
        let graph = MazeGraph::from_grid(&grid);
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.is_connected());
    }

    #[test]
    fn generated_mazes_are_perfect_trees() {
        fn prop(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 16 + 2, h as usize % 16 + 2);
            let mut session = MazeSession::init(w, h, Some(seed)).unwrap();
            session.run_to_completion();
            let graph = MazeGraph::from_grid(session.grid());
            TestResult::from_bool(
                graph.node_count() == w * h
                    && graph.is_perfect()
                    && session.solution().is_some(),
            )
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
