//! 배당 내역 및 요약.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 배당 지급 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendPayment {
    /// 지급일 (배당락일)
    pub date: NaiveDate,
    /// 주당 배당금
    pub amount: Decimal,
}

/// 날짜 오름차순 배당 내역.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DividendSeries {
    payments: Vec<DividendPayment>,
}

impl DividendSeries {
    /// 지급 내역으로 생성합니다. 날짜 오름차순으로 정렬됩니다.
    pub fn new(mut payments: Vec<DividendPayment>) -> Self {
        payments.sort_by_key(|p| p.date);
        Self { payments }
    }

    pub fn payments(&self) -> &[DividendPayment] {
        &self.payments
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// 표시용 (날짜 문자열, 금액) 목록.
    pub fn formatted(&self, date_format: &str) -> Vec<(String, Decimal)> {
        self.payments
            .iter()
            .map(|p| (p.date.format(date_format).to_string(), p.amount))
            .collect()
    }
}

/// 배당 지급 빈도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionFrequency {
    /// 월배당
    Monthly,
    /// 분기배당
    Quarterly,
    /// 반기배당
    BiAnnually,
    /// 연배당
    Annually,
}

impl DistributionFrequency {
    /// 연평균 지급 횟수로 빈도를 분류합니다.
    ///
    /// 7회 초과 월배당, 3.5회 초과 분기배당, 1.5회 초과 반기배당, 그 외 연배당.
    pub fn from_payouts_per_year(payouts: f64) -> Self {
        if payouts > 7.0 {
            Self::Monthly
        } else if payouts > 3.5 {
            Self::Quarterly
        } else if payouts > 1.5 {
            Self::BiAnnually
        } else {
            Self::Annually
        }
    }
}

impl fmt::Display for DistributionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::BiAnnually => write!(f, "Bi-annually"),
            Self::Annually => write!(f, "Annually"),
        }
    }
}

/// 연도별 배당 합계.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyDividend {
    /// 연도
    pub year: i32,
    /// 연간 배당금 합계
    pub total: Decimal,
    /// 연간 지급 횟수
    pub payments: usize,
    /// 전년 대비 증가율 (%). 첫 해이거나 전년 합계가 0이면 없음
    pub increase_pct: Option<Decimal>,
}

/// 배당 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendSummary {
    /// 연도 오름차순 연간 합계
    pub yearly: Vec<YearlyDividend>,
    /// 연평균 배당금 (가장 최근 연도 제외)
    pub average_yearly: Decimal,
    /// 연평균 증가율 (%, 가장 최근 연도 제외)
    pub average_increase: Decimal,
    /// 지급 빈도
    pub frequency: DistributionFrequency,
}
