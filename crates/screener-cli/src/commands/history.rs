//! 과거 시세 (`history`).

use screener_core::HistoricalSeries;

use super::section_title;

/// 시세 표. x축 레이블에 맞춰 날짜 또는 시각까지 표시합니다.
pub fn format_table(series: &HistoricalSeries) -> String {
    let label = series.x_axis_label();
    let time_format = if label == "Date" {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M"
    };

    let mut output = section_title(&format!(
        "{} history ({}, {})",
        series.symbol, series.period, series.interval
    ));
    output.push_str(&format!(
        "{:<17} {:>10} {:>10} {:>10} {:>10} {:>12}\n",
        label.to_uppercase(),
        "OPEN",
        "HIGH",
        "LOW",
        "CLOSE",
        "VOLUME"
    ));

    for bar in &series.bars {
        output.push_str(&format!(
            "{:<17} {:>10} {:>10} {:>10} {:>10} {:>12}\n",
            bar.timestamp.format(time_format),
            bar.open.round_dp(2),
            bar.high.round_dp(2),
            bar.low.round_dp(2),
            bar.close.round_dp(2),
            bar.volume
        ));
    }

    output.push_str(&format!("\nTotal: {} rows\n", series.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use screener_core::{Interval, Period, PriceBar};

    #[test]
    fn test_format_table_uses_interval_label() {
        let series = HistoricalSeries {
            symbol: "VOO".to_string(),
            period: Period::D5,
            interval: Interval::M15,
            bars: vec![PriceBar {
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 13, 30, 0).unwrap(),
                open: dec!(460.1),
                high: dec!(462),
                low: dec!(458.3),
                close: dec!(461.456),
                volume: 42_000,
            }],
        };

        let table = format_table(&series);
        assert!(table.starts_with("VOO history (5d, 15m)"));
        assert!(table.contains("DATETIME"));
        assert!(table.contains("2024-05-01 13:30"));
        assert!(table.contains("461.46"));
    }
}
