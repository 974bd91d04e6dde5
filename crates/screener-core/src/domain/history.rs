//! 과거 시세 데이터.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Interval, Period};

/// OHLCV 캔들 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 캔들 시작 시각
    pub timestamp: DateTime<Utc>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: u64,
}

/// 기간/간격으로 조회한 과거 시세.
///
/// `bars`는 시각 오름차순입니다. 조회 후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    /// 티커 심볼
    pub symbol: String,
    /// 조회 기간
    pub period: Period,
    /// 캔들 간격
    pub interval: Interval,
    /// 캔들 목록
    pub bars: Vec<PriceBar>,
}

impl HistoricalSeries {
    /// 차트 x축 레이블.
    ///
    /// 일봉 이상의 간격은 날짜만, 그 외에는 시각까지 표시합니다.
    pub fn x_axis_label(&self) -> &'static str {
        if self.interval.is_daily_or_coarser() {
            "Date"
        } else {
            "Datetime"
        }
    }

    /// 마지막 종가.
    pub fn last_close(&self) -> Option<Decimal> {
        self.bars.last().map(|b| b.close)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
