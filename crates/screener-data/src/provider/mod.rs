//! 데이터 Provider 모듈.
//!
//! ## Yahoo Finance (1차)
//! - `YahooClient`: 시세, 52주 범위, 200일 이동평균, 배당 내역, 기관 보유, 뉴스
//! - ISIN → 티커 변환
//!
//! ## TrackInsight (2차)
//! - `TrackInsightClient`: 펀드 설명/익스포저, 섹터·국가·보유 종목 비중, 일별 스냅샷(NAV, ESG)
//!
//! 응답 JSON은 이 경계에서 명시적인 Option 필드 구조체로 변환됩니다.
//! 상위 계층(reconcile)은 원본 JSON 형태를 알지 못합니다.

pub mod symbol;
pub mod trackinsight;
pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use screener_core::{DividendSeries, HistoricalSeries, Interval, Period};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DataError, Result};

pub use symbol::{is_isin, normalize_query};
pub use trackinsight::TrackInsightClient;
pub use yahoo::{YahooClient, EXPENSE_RATIO_LABEL};

/// 데이터 소스 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderSource {
    /// 1차 소스 (Yahoo Finance)
    Primary,
    /// 2차 소스 (TrackInsight)
    Secondary,
}

impl fmt::Display for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary provider"),
            Self::Secondary => write!(f, "secondary provider"),
        }
    }
}

/// 분류 항목 비중 (원본 단위: 비율 0~1).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawWeight {
    /// 원본 항목명 (예: "real_estate")
    pub label: String,
    /// 비율 (0~1)
    pub fraction: f64,
    /// 구성 종목 수
    pub count: Option<u32>,
}

/// 보유 종목 비중 (원본 단위: 비율 0~1).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTopHolding {
    /// 종목명
    pub name: String,
    /// 비율 (0~1)
    pub fraction: f64,
}

/// 1차 소스 종목 메타데이터.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPrimaryData {
    pub symbol: String,
    /// 자산 유형 (예: "ETF", "EQUITY")
    pub quote_type: Option<String>,
    pub long_name: Option<String>,
    pub summary: Option<String>,
    pub currency: Option<String>,
    pub price: Option<f64>,
    pub low_52w: Option<f64>,
    pub high_52w: Option<f64>,
    pub ma200: Option<f64>,
    /// 배당수익률 (비율)
    pub yield_fraction: Option<f64>,
    pub total_assets: Option<f64>,
    /// 펀드 프로필의 총보수 (비율)
    pub expense_ratio_fraction: Option<f64>,
    pub sector_weightings: Vec<RawWeight>,
    pub top_holdings: Vec<RawTopHolding>,
}

/// 기관 보유 표의 한 행 (항목명, 표시값).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderRow {
    pub label: String,
    pub value: String,
}

/// 1차 소스 뉴스 원본.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNews {
    pub title: String,
    /// 게시 시각 (Unix timestamp, 초)
    pub published_at: i64,
    pub publisher: Option<String>,
    pub link: Option<String>,
}

/// 2차 소스 펀드 메타데이터.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FundMetadata {
    pub symbol: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub exposure: Option<String>,
    pub isin: Option<String>,
    pub currency: Option<String>,
    /// 총보수 (비율)
    pub expense_ratio_fraction: Option<f64>,
    /// 배당수익률 (비율)
    pub dividend_yield_fraction: Option<f64>,
}

/// 2차 소스 보유 종목 구성.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FundHoldings {
    pub sectors: Vec<RawWeight>,
    pub countries: Vec<RawWeight>,
    pub top_holdings: Vec<RawTopHolding>,
    /// 전체 구성 종목 수
    pub holdings_count: Option<u32>,
}

/// 2차 소스 일별 스냅샷.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: Option<NaiveDate>,
    /// 순자산가치 (NAV)
    pub nav: Option<f64>,
    /// 운용자산 (AUM)
    pub aum: Option<f64>,
    pub esg_grade: Option<String>,
}

/// 2차 소스 통합 응답.
///
/// 보유 종목/스냅샷 조회 실패는 `None`으로 남습니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSecondaryData {
    pub fund: FundMetadata,
    pub holdings: Option<FundHoldings>,
    pub daily: Option<DailySnapshot>,
    /// 펀드 상세 페이지
    pub page_url: Option<String>,
}

/// 1차 데이터 소스 트레잇.
#[async_trait]
pub trait PrimaryProvider: Send + Sync {
    /// 사용자 입력(티커 또는 ISIN)을 티커 심볼로 변환합니다.
    async fn resolve_symbol(&self, query: &str) -> Result<String>;

    /// 종목 메타데이터 조회. 종목이 없으면 `NotFound`.
    async fn fetch_info(&self, ticker: &str) -> Result<RawPrimaryData>;

    /// 과거 시세 조회.
    async fn fetch_history(
        &self,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Result<HistoricalSeries>;

    /// 전체 배당 내역 조회.
    async fn fetch_dividends(&self, ticker: &str) -> Result<DividendSeries>;

    /// 기관 보유 표 조회.
    async fn fetch_institutional_holders(&self, ticker: &str) -> Result<Vec<HolderRow>>;

    /// 최근 뉴스 조회.
    async fn fetch_news(&self, ticker: &str, limit: usize) -> Result<Vec<RawNews>>;
}

/// 2차 데이터 소스 트레잇.
#[async_trait]
pub trait SecondaryProvider: Send + Sync {
    /// 펀드 데이터 조회. 펀드 레코드가 없으면 `NotFound`.
    async fn fetch(&self, symbol: &str) -> Result<RawSecondaryData>;
}

/// 기본 주소 뒤에 경로 세그먼트를 붙인 요청 주소.
///
/// 각 세그먼트는 하나의 경로 조각으로 퍼센트 인코딩되므로 티커에 포함된
/// `/`, `?`, `#`는 경로 구분자나 쿼리로 해석되지 않습니다.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| DataError::ConfigError(format!("잘못된 기본 주소 {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| DataError::ConfigError(format!("경로를 붙일 수 없는 주소: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
