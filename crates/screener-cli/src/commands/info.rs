//! 주요 정보 (`info`).

use screener_core::{display_or_unknown, TickerRecord, UNKNOWN};
use screener_data::metrics::simplify_u64;

use super::{section_title, truncate};

/// 종목 주요 정보 표.
pub fn format_table(record: &TickerRecord) -> String {
    let pct = |v: &Option<rust_decimal::Decimal>| match v {
        Some(d) => format!("{}%", d),
        None => UNKNOWN.to_string(),
    };

    let rows: Vec<(&str, String)> = vec![
        ("Symbol", record.symbol.clone()),
        ("ISIN", display_or_unknown(&record.isin)),
        ("Name", record.name.clone()),
        ("Exposure", display_or_unknown(&record.exposure)),
        ("Currency", record.currency.clone()),
        ("Price", display_or_unknown(&record.price)),
        ("52 weeks range", record.range_52w_display()),
        ("MA200", display_or_unknown(&record.ma200)),
        ("Delta vs MA200", display_or_unknown(&record.delta_ma200)),
        ("Expense ratio", pct(&record.expense_ratio)),
        ("Dividend yield", pct(&record.dividend_yield)),
        (
            "Total assets",
            record
                .total_assets
                .map(simplify_u64)
                .unwrap_or_else(|| UNKNOWN.to_string()),
        ),
        ("ESG grade", display_or_unknown(&record.esg_grade)),
        ("TrackInsight", display_or_unknown(&record.provider_page)),
    ];

    let mut output = section_title(&format!("{} ({})", record.name, record.symbol));
    for (label, value) in rows {
        output.push_str(&format!("{:<16} {}\n", label, value));
    }

    if let Some(description) = &record.description {
        output.push('\n');
        output.push_str(&truncate(description, 400));
        output.push('\n');
    }

    output
}
