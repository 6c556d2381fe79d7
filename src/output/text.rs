//! Human-readable console output
//!
//! Two kinds of line are printed on stdout, one per walker and one for the
//! group. They are observational only; nothing reads them back.

use crate::group::WalkerId;

/// Line printed by a walker once its walk ends
pub fn walker_line(id: WalkerId, steps_taken: u64) -> String {
    format!("Rank {}: Walker finished in {} steps.", id, steps_taken)
}

/// Line printed by the coordinator once every walker has reported
pub fn group_line(walkers: usize) -> String {
    format!("Controller: All {} walkers have finished.", walkers)
}

pub fn print_walker_finished(id: WalkerId, steps_taken: u64) {
    println!("{}", walker_line(id, steps_taken));
}

pub fn print_group_finished(walkers: usize) {
    println!("{}", group_line(walkers));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walker_line() {
        assert_eq!(
            walker_line(WalkerId::new(3), 42),
            "Rank 3: Walker finished in 42 steps."
        );
    }

    #[test]
    fn test_group_line() {
        assert_eq!(group_line(4), "Controller: All 4 walkers have finished.");
    }
}
