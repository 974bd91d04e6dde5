//! 통합 종목 레코드.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 어느 데이터 소스에도 값이 없을 때 표시하는 문자열.
pub const UNKNOWN: &str = "?";

/// 두 데이터 소스 모두 통화를 제공하지 않을 때 사용하는 통화 코드.
pub const DEFAULT_CURRENCY: &str = "USD";

/// 값이 있으면 문자열로, 없으면 [`UNKNOWN`]으로 표시합니다.
pub fn display_or_unknown<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// 1차/2차 데이터 소스를 병합한 종목 레코드.
///
/// `None`은 두 소스 모두 값을 제공하지 않았음을 의미합니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickerRecord {
    /// 티커 심볼
    pub symbol: String,
    /// ISIN 코드
    pub isin: Option<String>,
    /// 펀드명
    pub name: String,
    /// 펀드 설명
    pub description: Option<String>,
    /// 투자 대상(익스포저) 설명
    pub exposure: Option<String>,
    /// ETF 여부
    pub is_etf: bool,
    /// 1차 소스가 보고한 자산 유형 (예: "ETF", "EQUITY")
    pub quote_type: Option<String>,
    /// 통화 코드
    pub currency: String,
    /// 현재가
    pub price: Option<Decimal>,
    /// 52주 최저가
    pub low_52w: Option<Decimal>,
    /// 52주 최고가
    pub high_52w: Option<Decimal>,
    /// 200일 이동평균
    pub ma200: Option<Decimal>,
    /// 현재가 - 200일 이동평균 (소수점 2자리)
    pub delta_ma200: Option<Decimal>,
    /// 총보수 (%)
    pub expense_ratio: Option<Decimal>,
    /// 배당수익률 (%)
    pub dividend_yield: Option<Decimal>,
    /// 순자산 총액
    pub total_assets: Option<u64>,
    /// ESG 등급
    pub esg_grade: Option<String>,
    /// 2차 소스의 펀드 상세 페이지
    pub provider_page: Option<String>,
}

impl TickerRecord {
    /// 레코드가 스크리너에서 다룰 수 있는지 확인합니다.
    ///
    /// 이름이 비어 있지 않고 ETF여야 합니다.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.is_etf
    }

    /// 52주 범위 표시 문자열 (`"low | high"`, 소수점 1자리).
    pub fn range_52w_display(&self) -> String {
        let fmt = |v: &Option<Decimal>| match v {
            Some(d) => format!("{:.1}", d.round_dp(1)),
            None => UNKNOWN.to_string(),
        };
        format!("{} | {}", fmt(&self.low_52w), fmt(&self.high_52w))
    }
}
