//! Grid movement model.
//!
//! A courier spends its per-tick budget (the transport speed, in cells) on
//! the X axis first and only then on the Y axis.  Each axis step is bounded
//! by `min(remaining budget, axis delta)`, so a move never overshoots:
//!
//! ```text
//! bicycle (speed 2) at (1,1) → target (5,5)
//!   X: |Δx| = 4 ≥ 2   → (3,1), budget 0, Y untouched
//!
//! car (speed 3) at (1,1) → target (2,5)
//!   X: |Δx| = 1 < 3   → (2,1), budget 2
//!   Y: |Δy| = 4 ≥ 2   → (2,3)
//! ```

use dl_core::{CoreResult, Location};

/// Location reached after one tick of travel from `from` toward `target`.
///
/// Returns `from` unchanged when already at `target`.  The result is always
/// a valid grid cell because every intermediate coordinate lies between two
/// valid ones.
pub fn step_towards(from: Location, target: Location, speed: u32) -> CoreResult<Location> {
    if from == target {
        return Ok(from);
    }

    let mut budget = i32::try_from(speed).unwrap_or(i32::MAX);
    let (mut x, mut y) = (from.x(), from.y());

    let (nx, spent) = advance_axis(x, target.x(), budget);
    x = nx;
    budget -= spent;

    if budget > 0 && (x, y) != (target.x(), target.y()) {
        let (ny, _) = advance_axis(y, target.y(), budget);
        y = ny;
    }

    Location::new(x, y)
}

/// Move one coordinate toward `target` by at most `budget` cells.
/// Returns the new coordinate and the number of cells spent.
#[inline]
fn advance_axis(current: i32, target: i32, budget: i32) -> (i32, i32) {
    let delta = target - current;
    let step = delta.abs().min(budget);
    (current + step * delta.signum(), step)
}

/// Continuous ticks-to-arrival estimate used to rank candidates.
///
/// This is a fractional score, not a tick count.  Comparing two candidates
/// by it never needs rounding, and ties stay ties.
#[inline]
pub fn steps_estimate(from: Location, target: Location, speed: u32) -> f64 {
    f64::from(from.distance_to(target)) / f64::from(speed)
}
