//! 배당 요약 계산.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use screener_core::{DistributionFrequency, DividendSeries, DividendSummary, YearlyDividend};

/// 배당 내역을 연도별로 집계하고 평균과 지급 빈도를 계산합니다.
///
/// - 증가율: `100 * (올해 - 전년) / 전년`. 첫 해이거나 전년 합계가 0이면 없음
/// - 평균: 가장 최근 연도(진행 중일 수 있음)를 제외. 연도가 2개 미만이면 0
/// - 지급 빈도: 모든 연도의 평균 지급 횟수로 분류
pub fn summarize_dividends(series: &DividendSeries) -> DividendSummary {
    let mut by_year: BTreeMap<i32, (Decimal, usize)> = BTreeMap::new();
    for payment in series.payments() {
        let entry = by_year
            .entry(payment.date.year())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += payment.amount;
        entry.1 += 1;
    }

    let mut yearly = Vec::with_capacity(by_year.len());
    let mut prev_total: Option<Decimal> = None;
    for (year, (total, payments)) in by_year {
        let increase_pct = prev_total
            .filter(|prev| !prev.is_zero())
            .map(|prev| ((total - prev) / prev * Decimal::ONE_HUNDRED).round_dp(2));
        yearly.push(YearlyDividend {
            year,
            total,
            payments,
            increase_pct,
        });
        prev_total = Some(total);
    }

    let (average_yearly, average_increase) = if yearly.len() < 2 {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let completed = &yearly[..yearly.len() - 1];
        let sum: Decimal = completed.iter().map(|y| y.total).sum();
        let average_yearly = (sum / Decimal::from(completed.len())).round_dp(4);

        let increases: Vec<Decimal> = completed.iter().filter_map(|y| y.increase_pct).collect();
        let average_increase = if increases.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = increases.iter().copied().sum();
            (sum / Decimal::from(increases.len())).round_dp(2)
        };

        (average_yearly, average_increase)
    };

    let payouts_per_year = if yearly.is_empty() {
        0.0
    } else {
        series.len() as f64 / yearly.len() as f64
    };

    DividendSummary {
        frequency: DistributionFrequency::from_payouts_per_year(payouts_per_year),
        yearly,
        average_yearly,
        average_increase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use screener_core::DividendPayment;

    fn payment(y: i32, m: u32, amount: Decimal) -> DividendPayment {
        DividendPayment {
            date: NaiveDate::from_ymd_opt(y, m, 15).unwrap(),
            amount,
        }
    }

    fn quarterly(years: &[(i32, Decimal)]) -> DividendSeries {
        DividendSeries::new(
            years
                .iter()
                .flat_map(|&(y, amount)| [3, 6, 9, 12].map(|m| payment(y, m, amount)))
                .collect(),
        )
    }

    #[test]
    fn test_yearly_totals_and_increase() {
        let series = quarterly(&[(2021, dec!(1.00)), (2022, dec!(1.10)), (2023, dec!(1.21))]);
        let summary = summarize_dividends(&series);

        assert_eq!(summary.yearly.len(), 3);
        assert_eq!(summary.yearly[0].total, dec!(4.00));
        assert_eq!(summary.yearly[0].increase_pct, None);
        assert_eq!(summary.yearly[1].increase_pct, Some(dec!(10.00)));
        assert_eq!(summary.yearly[2].increase_pct, Some(dec!(10.00)));
        assert_eq!(summary.frequency, DistributionFrequency::Quarterly);
    }

    #[test]
    fn test_averages_exclude_most_recent_year() {
        // 2024는 진행 중이라 한 번만 지급
        let mut payments = quarterly(&[(2021, dec!(1)), (2022, dec!(2)), (2023, dec!(3))])
            .payments()
            .to_vec();
        payments.push(payment(2024, 3, dec!(0.5)));
        let summary = summarize_dividends(&DividendSeries::new(payments));

        // (4 + 8 + 12) / 3
        assert_eq!(summary.average_yearly, dec!(8));
        // (100 + 50) / 2, 2024의 -95.83%는 제외
        assert_eq!(summary.average_increase, dec!(75));
        assert!(summary.yearly[3].increase_pct.unwrap() < Decimal::ZERO);
    }

    #[test]
    fn test_fewer_than_two_years() {
        let summary = summarize_dividends(&quarterly(&[(2023, dec!(1))]));
        assert_eq!(summary.average_yearly, Decimal::ZERO);
        assert_eq!(summary.average_increase, Decimal::ZERO);

        let empty = summarize_dividends(&DividendSeries::default());
        assert!(empty.yearly.is_empty());
        assert_eq!(empty.frequency, DistributionFrequency::Annually);
    }

    #[test]
    fn test_zero_previous_year_has_no_increase() {
        let series = DividendSeries::new(vec![
            payment(2021, 6, Decimal::ZERO),
            payment(2022, 6, dec!(1)),
            payment(2023, 6, dec!(1)),
        ]);
        let summary = summarize_dividends(&series);
        assert_eq!(summary.yearly[1].increase_pct, None);
        assert_eq!(summary.average_increase, Decimal::ZERO);
    }

    #[test]
    fn test_frequency_classification() {
        let monthly = DividendSeries::new(
            (2022..=2023)
                .flat_map(|y| (1..=12).map(move |m| payment(y, m, dec!(0.1))))
                .collect(),
        );
        assert_eq!(
            summarize_dividends(&monthly).frequency,
            DistributionFrequency::Monthly
        );

        let semi = DividendSeries::new(vec![
            payment(2022, 6, dec!(1)),
            payment(2022, 12, dec!(1)),
            payment(2023, 6, dec!(1)),
            payment(2023, 12, dec!(1)),
        ]);
        assert_eq!(
            summarize_dividends(&semi).frequency,
            DistributionFrequency::BiAnnually
        );

        let annual = DividendSeries::new(vec![payment(2022, 6, dec!(1)), payment(2023, 6, dec!(1))]);
        assert_eq!(
            summarize_dividends(&annual).frequency,
            DistributionFrequency::Annually
        );
    }
}
