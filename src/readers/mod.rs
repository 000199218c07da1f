pub mod observation_reader;

pub use observation_reader::{open_location, ObservationReader};
