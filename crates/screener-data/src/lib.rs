//! # Screener Data
//!
//! ETF 데이터 수집, 캐싱, 통합 모듈.
//!
//! ## 구성
//!
//! - `provider`: Yahoo Finance(1차), TrackInsight(2차) 클라이언트
//! - `cache`: 키별 single-flight 메모이제이션 캐시
//! - `reconcile`: 두 소스를 하나의 `TickerRecord`로 통합하는 `Screener`
//! - `metrics`: 배당 요약, 비중 정규화, 숫자 축약 등 파생 지표
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use screener_core::AppConfig;
//! use screener_data::Screener;
//!
//! let screener = Screener::from_config(&AppConfig::load_default()?)?;
//! let info = screener.key_info("VOO").await?;
//! println!("{} ({})", info.record.name, info.record.symbol);
//! ```

pub mod cache;
mod convert;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod reconcile;

pub use cache::{CacheStats, MemoCache, ProviderCache};
pub use error::{DataError, Result};
pub use provider::{
    PrimaryProvider, ProviderSource, SecondaryProvider, TrackInsightClient, YahooClient,
};
pub use reconcile::{ProviderWarning, Reconciled, Screener, ScreenerOptions};
