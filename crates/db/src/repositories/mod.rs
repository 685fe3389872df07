pub mod observation_repo;
pub mod stats_repo;

pub use observation_repo::ObservationRepo;
pub use stats_repo::StatsRepo;
