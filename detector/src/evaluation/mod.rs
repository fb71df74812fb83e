pub mod matching;
pub mod stats;

pub use matching::{compute_tp_fp, MatchCounts};
pub use stats::RunStatistics;
