pub mod answer_flow;
pub mod question_ctx;

pub use answer_flow::{AnswerFlow, FlowResult};
pub use question_ctx::QuestionCtx;
