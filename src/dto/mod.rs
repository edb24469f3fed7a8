pub mod application_dto;
pub mod assessment_dto;
pub mod candidate_dto;
pub mod faq_dto;
pub mod feedback_dto;
pub mod interview_dto;
pub mod job_dto;
pub mod match_dto;
