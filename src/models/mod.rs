pub mod answer;
pub mod loaders;
pub mod marker;
pub mod paper;
pub mod question;

pub use answer::{AnswerSheet, AnsweredQuestion, AnsweredTask, DocumentContext};
pub use loaders::{load_all_paper_texts, load_ledger_toml, load_paper_text, save_ledger_toml, LedgerFile};
pub use marker::{HitKind, Marker, MarkerHit, MarkerStrategy};
pub use paper::PaperSource;
pub use question::{Question, QuestionLedger, TaskGroup, TaskSection};
