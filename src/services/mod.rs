pub mod application_service;
pub mod assessment_service;
pub mod candidate_service;
pub mod cv_service;
pub mod embed_service;
pub mod extract_service;
pub mod faq_service;
pub mod feedback_service;
pub mod interview_service;
pub mod job_service;
pub mod match_service;
pub mod vector_service;

pub use application_service::ApplicationService;
pub use assessment_service::AssessmentService;
pub use candidate_service::CandidateService;
pub use cv_service::CvService;
pub use embed_service::EmbedService;
pub use extract_service::ExtractService;
pub use faq_service::FaqService;
pub use feedback_service::FeedbackService;
pub use interview_service::InterviewService;
pub use job_service::JobService;
pub use match_service::MatchService;
pub use vector_service::VectorService;
