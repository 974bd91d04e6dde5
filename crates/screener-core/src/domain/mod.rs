//! 스크리너 도메인 모델.

mod dividend;
mod history;
mod holdings;
mod news;
mod record;

pub use dividend::*;
pub use history::*;
pub use holdings::*;
pub use news::*;
pub use record::*;
