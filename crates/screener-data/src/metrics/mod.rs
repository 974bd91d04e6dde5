//! 파생 지표 계산.
//!
//! - 배당 요약 (연도별 합계, 증가율, 평균, 지급 빈도)
//! - 섹터/국가 비중 정규화, 상위 보유 종목 집중도
//! - 표시용 숫자 축약, 날짜 포맷

pub mod dividends;
pub mod format;
pub mod holdings;

pub use dividends::summarize_dividends;
pub use format::{
    format_date, format_timestamp, parse_percent, simplify_digits, simplify_number,
    simplify_u64, to_news_items,
};
pub use holdings::{build_breakdown, build_top_holdings, normalize_label};
