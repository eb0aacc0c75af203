mod board;
mod boards;
mod heuristic;
mod scramble;
mod solvability;
mod solver;

use board::Board;
use boards::Boards;
use clap::{Parser, ValueEnum};
use heuristic::{Heuristic, Manhattan, Null};
use solvability::is_solvable_standard;
use solver::{Outcome, Solution, Solver};
use std::process;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    Manhattan,
    Null,
}

// Built-in demo instances, solved when no boards file is given. All use the
// standard goal of their size; the last one is deliberately unsolvable.
const DEMOS: [(&str, &str); 4] = [
    ("easy (1 slide)", "1 2 3 4\n5 6 7 8\n9 10 11 .\n13 14 15 12"),
    ("verified solvable", "1 2 3 4\n5 6 7 8\n9 10 . 11\n13 14 15 12"),
    ("harder", "5 1 2 3\n. 6 7 4\n9 10 11 8\n13 14 15 12"),
    ("unsolvable 3x3", "2 1 3\n4 5 6\n7 8 ."),
];

fn print_solution(solution: &Solution) {
    println!("\nStarting position:\n{}", solution.path[0]);
    let total = solution.moves();
    for (count, (board, slide)) in solution.path[1..].iter().zip(&solution.slides).enumerate() {
        println!(
            "Slide tile {} {} ({}/{}):\n{}",
            slide.tile,
            slide.direction,
            count + 1,
            total,
            board
        );
    }
}

struct BoardStats {
    solved: bool,
    moves: usize,
    nodes_expanded: usize,
    elapsed_ms: u128,
}

struct SolveOpts<'a> {
    label: &'a str,
    max_nodes: usize,
    print_solution: bool,
}

fn print_stats_row(label: &str, solved: char, moves: usize, nodes: usize, elapsed_ms: u128) {
    println!(
        "board: {:<20}  solved: {}  moves: {:<5}  nodes: {:<12}  elapsed: {} ms",
        label, solved, moves, nodes, elapsed_ms
    );
}

fn solve_board_helper<H: Heuristic>(
    initial: &Board,
    goal: &Board,
    opts: &SolveOpts,
    heuristic: H,
) -> BoardStats {
    // The parity pre-check only applies to the classic case: square grid,
    // single blank, standard goal. Anything else goes straight to search.
    let classic = initial.rows() == initial.cols()
        && initial.blanks().len() == 1
        && goal.is_standard();
    if classic && !is_solvable_standard(initial) {
        print_stats_row(opts.label, 'X', 0, 0, 0);
        return BoardStats {
            solved: false,
            moves: 0,
            nodes_expanded: 0,
            elapsed_ms: 0,
        };
    }

    let solver = Solver::new(heuristic, opts.max_nodes);
    let start = Instant::now();
    let outcome = match solver.solve(initial, goal) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };
    let elapsed_ms = start.elapsed().as_millis();

    let (solved_char, moves, nodes_expanded, solved) = match &outcome {
        Outcome::Solved(solution) => ('Y', solution.moves(), solution.nodes_expanded, true),
        Outcome::Unsolved { nodes_expanded } => ('N', 0, *nodes_expanded, false),
    };
    print_stats_row(opts.label, solved_char, moves, nodes_expanded, elapsed_ms);

    if opts.print_solution {
        if let Outcome::Solved(solution) = &outcome {
            print_solution(solution);
        }
    }

    BoardStats {
        solved,
        moves,
        nodes_expanded,
        elapsed_ms,
    }
}

fn solve_board(
    initial: &Board,
    goal: &Board,
    opts: &SolveOpts,
    heuristic_type: HeuristicType,
) -> BoardStats {
    match heuristic_type {
        HeuristicType::Manhattan => solve_board_helper(initial, goal, opts, Manhattan::new()),
        HeuristicType::Null => solve_board_helper(initial, goal, opts, Null::new()),
    }
}

fn parse_board_or_exit(text: &str) -> Board {
    match Board::from_text(text) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

#[derive(Parser)]
#[command(name = "loyd")]
#[command(about = "An optimal sliding-tile puzzle solver", long_about = None)]
struct Args {
    /// Path to a boards file; omit to solve the built-in demo boards
    #[arg(value_name = "FILE")]
    boards_file: Option<String>,

    /// Board number to solve (1-indexed), or start of range
    #[arg(value_name = "BOARD", default_value = "1")]
    board_start: usize,

    /// Optional end of board range (inclusive, 1-indexed)
    #[arg(value_name = "BOARD_END")]
    board_end: Option<usize>,

    /// File whose first board is the goal (default: the standard goal)
    #[arg(short, long)]
    goal_file: Option<String>,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Maximum number of nodes to expand before giving up
    #[arg(short = 'n', long, default_value = "5000000")]
    max_nodes: usize,

    /// Heuristic to use for solving
    #[arg(short = 'H', long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicType,

    /// Solve a random board scrambled with this many slides
    #[arg(short = 'k', long, value_name = "SLIDES", conflicts_with = "boards_file")]
    scramble: Option<usize>,

    /// Grid size for --scramble
    #[arg(short, long, default_value = "4")]
    size: u8,

    /// RNG seed for --scramble (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn load_goal(args: &Args) -> Option<Board> {
    let path = args.goal_file.as_ref()?;
    let boards = match Boards::from_file(path) {
        Ok(boards) => boards,
        Err(err) => {
            eprintln!("Error loading goal: {}", err);
            process::exit(1);
        }
    };
    match boards.get(0) {
        Some(goal) => Some(goal.clone()),
        None => {
            eprintln!("Error: goal file contains no boards");
            process::exit(1);
        }
    }
}

fn run_scramble(args: &Args, steps: usize) {
    if args.size < 2 {
        eprintln!("Error: scramble size must be at least 2");
        process::exit(1);
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    let goal = load_goal(args).unwrap_or_else(|| Board::standard(args.size, args.size));
    let initial = scramble::scramble(&goal, steps, seed);
    println!("Scrambled with {} slides (seed {}):\n{}", steps, seed, initial);

    let opts = SolveOpts {
        label: "scramble",
        max_nodes: args.max_nodes,
        print_solution: args.print_solution,
    };
    solve_board(&initial, &goal, &opts, args.heuristic);
}

fn run_demos(args: &Args) {
    if args.print_solution {
        eprintln!("Error: solution printing only supported when solving a single board");
        process::exit(1);
    }

    let mut total_solved = 0;
    for (name, text) in DEMOS {
        let initial = parse_board_or_exit(text);
        let goal = load_goal(args)
            .unwrap_or_else(|| Board::standard(initial.rows() as u8, initial.cols() as u8));
        let opts = SolveOpts {
            label: name,
            max_nodes: args.max_nodes,
            print_solution: false,
        };
        let stats = solve_board(&initial, &goal, &opts, args.heuristic);
        if stats.solved {
            total_solved += 1;
        }
    }
    println!("---");
    println!("solved: {:>3}/{:<3}", total_solved, DEMOS.len());
}

fn run_file(args: &Args, path: &str) {
    let boards = match Boards::from_file(path) {
        Ok(boards) => boards,
        Err(err) => {
            eprintln!("Error loading boards: {}", err);
            process::exit(1);
        }
    };

    let board_end = args.board_end.unwrap_or(args.board_start);

    if args.board_start == 0 {
        eprintln!("Error: board numbers must be at least 1");
        process::exit(1);
    }
    if board_end < args.board_start {
        eprintln!("Error: board end must be >= board start");
        process::exit(1);
    }
    let num_boards = board_end - args.board_start + 1;
    if board_end > boards.len() {
        eprintln!(
            "Error: board {} not found (file contains {} boards)",
            board_end,
            boards.len()
        );
        process::exit(1);
    }
    if args.print_solution && num_boards > 1 {
        eprintln!("Error: solution printing only supported when solving a single board");
        process::exit(1);
    }

    let goal_override = load_goal(args);

    let mut total_solved = 0;
    let mut total_moves = 0;
    let mut total_nodes = 0;
    let mut total_time_ms = 0;

    for board_num in args.board_start..=board_end {
        let initial = boards.get(board_num - 1).unwrap();
        let goal = goal_override
            .clone()
            .unwrap_or_else(|| Board::standard(initial.rows() as u8, initial.cols() as u8));
        let label = board_num.to_string();
        let opts = SolveOpts {
            label: &label,
            max_nodes: args.max_nodes,
            print_solution: args.print_solution,
        };
        let stats = solve_board(initial, &goal, &opts, args.heuristic);

        if stats.solved {
            total_solved += 1;
        }
        total_moves += stats.moves;
        total_nodes += stats.nodes_expanded;
        total_time_ms += stats.elapsed_ms;
    }

    if num_boards > 1 {
        println!("---");
        println!(
            "solved: {:>3}/{:<3}        moves: {:<5}  nodes: {:<12}  elapsed: {} ms",
            total_solved, num_boards, total_moves, total_nodes, total_time_ms
        );
    }
}

fn main() {
    let args = Args::parse();

    if let Some(steps) = args.scramble {
        run_scramble(&args, steps);
    } else if let Some(path) = args.boards_file.clone() {
        run_file(&args, &path);
    } else {
        run_demos(&args);
    }
}
