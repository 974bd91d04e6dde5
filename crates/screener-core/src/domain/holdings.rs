//! 섹터/국가 비중 및 상위 보유 종목.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 비중 분류 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownDimension {
    /// 섹터별
    Sector,
    /// 국가별
    Country,
}

impl fmt::Display for BreakdownDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sector => write!(f, "sector"),
            Self::Country => write!(f, "country"),
        }
    }
}

/// 분류 항목 하나의 비중.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// 정규화된 항목명 (예: "Real estate")
    pub label: String,
    /// 비중 (%, 0~100)
    pub share_pct: f64,
    /// 해당 항목의 구성 종목 수
    pub constituents: Option<u32>,
}

/// 섹터 또는 국가별 비중.
///
/// `entries`는 비중 내림차순으로 정렬되어 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsBreakdown {
    /// 분류 기준
    pub dimension: BreakdownDimension,
    /// 항목별 비중
    pub entries: Vec<WeightEntry>,
}

impl HoldingsBreakdown {
    /// 전체 비중 합계 (%).
    pub fn total_share_pct(&self) -> f64 {
        self.entries.iter().map(|e| e.share_pct).sum()
    }

    /// 비중이 가장 큰 항목.
    pub fn largest(&self) -> Option<&WeightEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 상위 보유 종목 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolding {
    /// 종목명
    pub label: String,
    /// 비중 (%)
    pub share_pct: f64,
}

/// 상위 보유 종목 목록과 집중도.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHoldingsView {
    /// 비중 순 보유 종목 (보통 상위 10개)
    pub holdings: Vec<TopHolding>,
    /// 반환된 보유 종목 비중 합계 (%)
    pub top_share_pct: f64,
    /// 펀드 전체 구성 종목 수
    pub total_constituents: Option<u32>,
}

impl TopHoldingsView {
    /// 반환된 상위 종목 수 (N).
    pub fn top_n(&self) -> usize {
        self.holdings.len()
    }
}
