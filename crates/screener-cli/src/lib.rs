//! ETF 스크리너 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 종목 주요 정보, 과거 시세 조회
//! - 섹터/국가 비중, 상위 보유 종목
//! - 배당 요약, 최근 뉴스

pub mod commands;

pub use commands::*;
