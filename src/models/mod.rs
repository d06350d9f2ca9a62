pub mod compliance;
pub mod crew;
pub mod hours;
pub mod job;
pub mod job_log;
pub mod legacy_job;
pub mod profile;
pub mod role;
pub mod session;
pub mod stats;
pub mod trade;
