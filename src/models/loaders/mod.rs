pub mod text_loader;
pub mod toml_loader;

pub use text_loader::{load_all_paper_texts, load_paper_text};
pub use toml_loader::{load_ledger_toml, save_ledger_toml, LedgerFile};
