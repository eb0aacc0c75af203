use crate::board::{Board, Slide};
use crate::heuristic::{GoalMap, Heuristic};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a solve: either an optimal path or a frontier exhausted
/// without reaching the goal (also returned when the node budget is hit).
pub enum Outcome {
    Solved(Solution),
    Unsolved { nodes_expanded: usize },
}

/// An optimal solution: the board sequence from initial to goal inclusive,
/// the slide taken at each step, and how many nodes the search expanded.
pub struct Solution {
    pub path: Vec<Board>,
    pub slides: Vec<Slide>,
    pub nodes_expanded: usize,
}

impl Solution {
    pub fn moves(&self) -> usize {
        self.path.len() - 1
    }
}

/// A search node in the arena. `parent` is an arena handle (None for the
/// start node), used only for path reconstruction. Nodes are write-once.
struct Node {
    board: Board,
    parent: Option<usize>,
    slide: Option<Slide>,
    g: u32,
    h: u32,
}

/// Open-list entry. The heap is a max-heap, so the ordering is reversed:
/// lowest f first, ties broken by lower h (prefer nodes estimated closer
/// to the goal on f-plateaus).
#[derive(PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    h: u32,
    handle: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.handle.cmp(&self.handle))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over board configurations. Each solve owns its frontier, best-g
/// table, and closed set, so independent solvers can run in parallel.
pub struct Solver<H: Heuristic> {
    heuristic: H,
    max_nodes: usize,
}

impl<H: Heuristic> Solver<H> {
    pub fn new(heuristic: H, max_nodes: usize) -> Self {
        Solver {
            heuristic,
            max_nodes,
        }
    }

    /// Search for a minimum-slide path from `initial` to `goal`.
    ///
    /// Errors only on malformed input (mismatched dimensions or tile sets);
    /// an unreachable goal is a normal `Unsolved` outcome, not an error.
    /// The returned path length minus one is the optimal move count.
    pub fn solve(&self, initial: &Board, goal: &Board) -> Result<Outcome, String> {
        initial.validate_against(goal)?;
        let goal_map = GoalMap::new(goal);

        if initial == goal {
            return Ok(Outcome::Solved(Solution {
                path: vec![initial.clone()],
                slides: Vec::new(),
                nodes_expanded: 0,
            }));
        }

        let start_h = self.heuristic.evaluate(initial, &goal_map);
        let mut arena = vec![Node {
            board: initial.clone(),
            parent: None,
            slide: None,
            g: 0,
            h: start_h,
        }];

        let mut open = BinaryHeap::new();
        open.push(OpenEntry {
            f: start_h,
            h: start_h,
            handle: 0,
        });

        let mut best_g: FxHashMap<Board, u32> = FxHashMap::default();
        best_g.insert(initial.clone(), 0);
        let mut closed: FxHashSet<Board> = FxHashSet::default();
        let mut expanded = 0usize;

        while let Some(entry) = open.pop() {
            // A board can sit in the heap several times with decreasing
            // g-costs; stale entries are discarded here rather than
            // removed eagerly.
            if closed.contains(&arena[entry.handle].board) {
                continue;
            }

            let board = arena[entry.handle].board.clone();
            let g = arena[entry.handle].g;
            closed.insert(board.clone());
            expanded += 1;

            if board == *goal {
                return Ok(Outcome::Solved(reconstruct(
                    &arena,
                    entry.handle,
                    expanded,
                )));
            }

            if expanded >= self.max_nodes {
                return Ok(Outcome::Unsolved {
                    nodes_expanded: expanded,
                });
            }

            for (succ, slide) in successors(&board) {
                if closed.contains(&succ) {
                    continue;
                }
                let succ_g = g + 1;
                if succ_g < best_g.get(&succ).copied().unwrap_or(u32::MAX) {
                    best_g.insert(succ.clone(), succ_g);
                    let succ_h = self.heuristic.evaluate(&succ, &goal_map);
                    let handle = arena.len();
                    arena.push(Node {
                        board: succ,
                        parent: Some(entry.handle),
                        slide: Some(slide),
                        g: succ_g,
                        h: succ_h,
                    });
                    let node = &arena[handle];
                    open.push(OpenEntry {
                        f: node.g + node.h,
                        h: node.h,
                        handle,
                    });
                }
            }
        }

        Ok(Outcome::Unsolved {
            nodes_expanded: expanded,
        })
    }
}

/// Generate every legal successor of a board: for each blank, each adjacent
/// tile may slide into it. Successors that repeat a board already produced
/// by another blank within the same expansion are dropped.
fn successors(board: &Board) -> Vec<(Board, Slide)> {
    let mut out: Vec<(Board, Slide)> = Vec::new();
    for blank in board.blanks() {
        for slide in board.slides_at(blank) {
            let succ = board.apply(blank, slide);
            if out.iter().all(|(b, _)| *b != succ) {
                out.push((succ, slide));
            }
        }
    }
    out
}

/// Walk parent handles from the goal node back to the start and reverse.
fn reconstruct(arena: &[Node], goal_handle: usize, nodes_expanded: usize) -> Solution {
    let mut path = Vec::new();
    let mut slides = Vec::new();
    let mut handle = goal_handle;
    loop {
        let node = &arena[handle];
        path.push(node.board.clone());
        if let Some(slide) = node.slide {
            slides.push(slide);
        }
        match node.parent {
            Some(parent) => handle = parent,
            None => break,
        }
    }
    path.reverse();
    slides.reverse();
    Solution {
        path,
        slides,
        nodes_expanded,
    }
}
