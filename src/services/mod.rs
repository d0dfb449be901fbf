pub mod answer_generator;
pub mod llm_service;
pub mod warn_writer;

pub use answer_generator::AnswerGenerator;
pub use llm_service::LlmService;
pub use warn_writer::WarnWriter;
