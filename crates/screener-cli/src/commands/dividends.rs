//! 배당 내역 및 요약 (`dividends`).

use screener_core::{display_or_unknown, DividendSeries, DividendSummary};

use super::section_title;

/// 배당 요약과 최근 지급 내역 표.
///
/// `recent`개의 최근 지급만 표시합니다.
pub fn format_table(
    series: &DividendSeries,
    summary: &DividendSummary,
    date_format: &str,
    recent: usize,
) -> String {
    let mut output = section_title("Dividends");
    output.push_str(&format!("{:<24} {}\n", "Distribution", summary.frequency));
    output.push_str(&format!(
        "{:<24} {}\n",
        "Average yearly dividend", summary.average_yearly
    ));
    output.push_str(&format!(
        "{:<24} {}%\n",
        "Average yearly increase", summary.average_increase
    ));

    output.push_str(&format!("\n{:<6} {:>12} {:>6} {:>10}\n", "YEAR", "TOTAL", "PAID", "CHANGE"));
    for year in &summary.yearly {
        let change = year.increase_pct.map(|d| format!("{}%", d));
        output.push_str(&format!(
            "{:<6} {:>12} {:>6} {:>10}\n",
            year.year,
            year.total,
            year.payments,
            display_or_unknown(&change)
        ));
    }

    let formatted = series.formatted(date_format);
    let skip = formatted.len().saturating_sub(recent);
    output.push_str(&format!("\n{:<12} {:>10}\n", "DATE", "AMOUNT"));
    for (date, amount) in formatted.iter().skip(skip).rev() {
        output.push_str(&format!("{:<12} {:>10}\n", date, amount));
    }

    output
}
