pub mod stats_calculator;

pub use stats_calculator::StatsCalculator;
