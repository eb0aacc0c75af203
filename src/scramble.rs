use crate::board::{Board, Slide};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Scramble a board by applying `steps` uniformly random legal slides.
/// The immediate inverse of the previous slide is never chosen, so each
/// step makes progress away from the start. Seeded for reproducibility.
///
/// Every board produced this way is reachable from `start` by
/// construction, so scrambling the goal yields solvable instances.
pub fn scramble(start: &Board, steps: usize, seed: u64) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = start.clone();
    let mut last: Option<Slide> = None;

    for _ in 0..steps {
        let mut candidates: Vec<((u8, u8), Slide)> = Vec::new();
        for blank in board.blanks() {
            for slide in board.slides_at(blank) {
                let undoes_last = last.is_some_and(|prev| {
                    slide.tile == prev.tile && slide.direction == prev.direction.opposite()
                });
                if !undoes_last {
                    candidates.push((blank, slide));
                }
            }
        }
        let Some(&(blank, slide)) = candidates.choose(&mut rng) else {
            break;
        };
        board = board.apply(blank, slide);
        last = Some(slide);
    }

    board
}
