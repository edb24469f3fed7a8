pub mod application;
pub mod assessment;
pub mod candidate;
pub mod cv;
pub mod embedding;
pub mod feedback;
pub mod interview;
pub mod job_role;
