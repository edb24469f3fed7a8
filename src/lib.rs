pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod matching;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, assessment_service::AssessmentService,
    candidate_service::CandidateService, cv_service::CvService, embed_service::EmbedService,
    extract_service::ExtractService, faq_service::FaqService,
    feedback_service::FeedbackService, interview_service::InterviewService,
    job_service::JobService, match_service::MatchService, vector_service::VectorService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub cv_service: CvService,
    pub application_service: ApplicationService,
    pub assessment_service: AssessmentService,
    pub interview_service: InterviewService,
    pub feedback_service: FeedbackService,
    pub faq_service: FaqService,
    pub extract_service: ExtractService,
    pub embed_service: EmbedService,
    pub vector_service: VectorService,
    pub match_service: MatchService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let job_service = JobService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let cv_service = CvService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let assessment_service = AssessmentService::new(pool.clone());
        let interview_service = InterviewService::new(pool.clone());
        let feedback_service = FeedbackService::new(pool.clone());
        let extract_service = ExtractService::new(
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
            http_client.clone(),
        );
        let embed_service = EmbedService::new(
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
            config.embedding_model.clone(),
            http_client,
        );
        let vector_service = VectorService::new(pool.clone());
        let match_service = MatchService::new(embed_service.clone(), vector_service.clone());
        let faq_service = FaqService::new(embed_service.clone(), vector_service.clone());

        Self {
            pool,
            job_service,
            candidate_service,
            cv_service,
            application_service,
            assessment_service,
            interview_service,
            feedback_service,
            faq_service,
            extract_service,
            embed_service,
            vector_service,
            match_service,
        }
    }
}
