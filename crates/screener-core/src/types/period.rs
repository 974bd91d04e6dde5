//! 과거 시세 조회 기간/간격 정의.
//!
//! 데이터 소스가 허용하는 고정된 값 목록만 표현할 수 있습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 과거 시세 조회 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// 1일
    D1,
    /// 5일
    D5,
    /// 1개월
    Mo1,
    /// 3개월
    Mo3,
    /// 6개월
    Mo6,
    /// 연초 이후
    Ytd,
    /// 1년
    Y1,
    /// 2년
    Y2,
    /// 5년
    Y5,
    /// 10년
    #[default]
    Y10,
    /// 전체
    Max,
}

impl Period {
    /// 허용된 전체 기간 목록 (짧은 순).
    pub const ALL: [Period; 11] = [
        Period::D1,
        Period::D5,
        Period::Mo1,
        Period::Mo3,
        Period::Mo6,
        Period::Ytd,
        Period::Y1,
        Period::Y2,
        Period::Y5,
        Period::Y10,
        Period::Max,
    ];

    /// 데이터 소스 쿼리 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::D1 => "1d",
            Period::D5 => "5d",
            Period::Mo1 => "1mo",
            Period::Mo3 => "3mo",
            Period::Mo6 => "6mo",
            Period::Ytd => "ytd",
            Period::Y1 => "1y",
            Period::Y2 => "2y",
            Period::Y5 => "5y",
            Period::Y10 => "10y",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("Invalid period: {}", s)))
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.as_str().to_string()
    }
}

/// 과거 시세 캔들 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    /// 1분
    M1,
    /// 2분
    M2,
    /// 5분
    M5,
    /// 15분
    M15,
    /// 30분
    M30,
    /// 60분
    M60,
    /// 90분
    M90,
    /// 1시간
    H1,
    /// 일봉
    #[default]
    D1,
    /// 5일봉
    D5,
    /// 주봉
    Wk1,
    /// 월봉
    Mo1,
    /// 분기봉
    Mo3,
}

impl Interval {
    /// 허용된 전체 간격 목록 (짧은 순).
    pub const ALL: [Interval; 13] = [
        Interval::M1,
        Interval::M2,
        Interval::M5,
        Interval::M15,
        Interval::M30,
        Interval::M60,
        Interval::M90,
        Interval::H1,
        Interval::D1,
        Interval::D5,
        Interval::Wk1,
        Interval::Mo1,
        Interval::Mo3,
    ];

    /// 데이터 소스 쿼리 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M2 => "2m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::M60 => "60m",
            Interval::M90 => "90m",
            Interval::H1 => "1h",
            Interval::D1 => "1d",
            Interval::D5 => "5d",
            Interval::Wk1 => "1wk",
            Interval::Mo1 => "1mo",
            Interval::Mo3 => "3mo",
        }
    }

    /// 일봉 이상(시각 정보가 없는) 간격인지 확인합니다.
    pub fn is_daily_or_coarser(&self) -> bool {
        matches!(
            self,
            Interval::D1 | Interval::D5 | Interval::Wk1 | Interval::Mo1 | Interval::Mo3
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("Invalid interval: {}", s)))
    }
}

impl TryFrom<String> for Interval {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.as_str().to_string()
    }
}
