pub mod calculation;
pub mod observation;
pub mod station;

pub use calculation::{CalculationKind, ExportKind, Metric, RowFilter};
pub use observation::{
    CombinedTable, FileAggregate, ObservationRow, StationSelector, TaggedObservation,
};
pub use station::{join_station_names, NamedStationStat, StationStat};
