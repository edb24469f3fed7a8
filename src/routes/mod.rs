pub mod applications;
pub mod assessments;
pub mod candidates;
pub mod cvs;
pub mod faq;
pub mod feedback;
pub mod health;
pub mod interviews;
pub mod jobs;
pub mod matching;
