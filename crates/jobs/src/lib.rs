pub mod cache_sweep;
pub mod query_simulator;
pub mod runner;

pub use cache_sweep::CacheSweepJob;
pub use query_simulator::QuerySimulatorJob;
pub use runner::JobRunner;
