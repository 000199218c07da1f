pub mod query_coordinator;

pub use query_coordinator::QueryCoordinator;
