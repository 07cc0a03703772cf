#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first route search over the tile grid.
//!
//! The search expands the grid in layers of equal distance from the start,
//! trying neighbours in [`Direction::ALL`] order, so the first route reaching
//! the goal is both minimal and deterministic. Walkability is decided by the
//! caller through a predicate; coordinates outside the grid are never walkable.

use asciilvania_core::{Direction, Vector};

/// Arena entry recording how a coordinate was first reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    coordinate: Vector,
    predecessor: Option<usize>,
}

/// Reusable breadth-first route planner.
///
/// Scratch buffers survive between calls so repeated searches on the same
/// grid do not reallocate.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    nodes: Vec<Node>,
    frontier: Vec<usize>,
    next_frontier: Vec<usize>,
    visited: Vec<bool>,
}

impl Pathfinder {
    /// Creates a planner with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a shortest 4-connected route from `start` to `goal`.
    ///
    /// The returned path excludes `start` and ends with `goal`; it is empty
    /// when both coordinates coincide. `None` is returned when `start` lies
    /// outside the `width` by `height` grid or no walkable route exists.
    pub fn find_path<F>(
        &mut self,
        width: u32,
        height: u32,
        start: Vector,
        goal: Vector,
        mut is_walkable: F,
    ) -> Option<Vec<Vector>>
    where
        F: FnMut(Vector) -> bool,
    {
        let start_index = index(width, height, start)?;
        if start == goal {
            return Some(Vec::new());
        }
        let _ = index(width, height, goal)?;

        self.prepare(width, height);
        self.visited[start_index] = true;
        self.nodes.push(Node {
            coordinate: start,
            predecessor: None,
        });
        self.frontier.push(0);

        while !self.frontier.is_empty() {
            for position in 0..self.frontier.len() {
                let parent = self.frontier[position];
                let origin = self.nodes[parent].coordinate;

                for direction in Direction::ALL {
                    let candidate = origin + direction.vector();
                    let Some(cell) = index(width, height, candidate) else {
                        continue;
                    };
                    if self.visited[cell] || !is_walkable(candidate) {
                        continue;
                    }

                    self.visited[cell] = true;
                    self.nodes.push(Node {
                        coordinate: candidate,
                        predecessor: Some(parent),
                    });
                    let node = self.nodes.len() - 1;

                    if candidate == goal {
                        return Some(self.reconstruct(node));
                    }
                    self.next_frontier.push(node);
                }
            }

            std::mem::swap(&mut self.frontier, &mut self.next_frontier);
            self.next_frontier.clear();
        }

        None
    }

    fn prepare(&mut self, width: u32, height: u32) {
        let cell_count = (width as usize).saturating_mul(height as usize);
        self.visited.clear();
        self.visited.resize(cell_count, false);
        self.nodes.clear();
        self.frontier.clear();
        self.next_frontier.clear();
    }

    fn reconstruct(&self, goal_node: usize) -> Vec<Vector> {
        let mut path = Vec::new();
        let mut cursor = Some(goal_node);

        while let Some(current) = cursor {
            let node = self.nodes[current];
            if node.predecessor.is_none() {
                break;
            }
            path.push(node.coordinate);
            cursor = node.predecessor;
        }

        path.reverse();
        path
    }
}

fn index(width: u32, height: u32, coordinate: Vector) -> Option<usize> {
    let column = u32::try_from(coordinate.x).ok()?;
    let row = u32::try_from(coordinate.y).ok()?;
    if column >= width || row >= height {
        return None;
    }

    let width = usize::try_from(width).ok()?;
    let row = usize::try_from(row).ok()?;
    let column = usize::try_from(column).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
