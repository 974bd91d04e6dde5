//! # Screener Core
//!
//! ETF 스크리너의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스크리너 전반에서 사용되는 기본 타입을 제공합니다:
//! - 통합(reconciled) 종목 레코드
//! - 섹터/국가 비중, 상위 보유 종목
//! - 배당 내역 및 요약
//! - 과거 시세 조회 기간/간격 정의
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
