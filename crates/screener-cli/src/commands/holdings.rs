//! 섹터/국가 비중 (`sectors`, `countries`) 및 상위 보유 종목 (`holdings`).

use screener_core::{display_or_unknown, HoldingsBreakdown, TopHoldingsView};

use super::{section_title, truncate};

/// 비중 표.
pub fn format_breakdown(breakdown: &HoldingsBreakdown) -> String {
    let title = match breakdown.dimension {
        screener_core::BreakdownDimension::Sector => "Sector breakdown",
        screener_core::BreakdownDimension::Country => "Country breakdown",
    };

    let mut output = section_title(title);
    output.push_str(&format!("{:<28} {:>8} {:>8}\n", "LABEL", "SHARE", "COUNT"));
    for entry in &breakdown.entries {
        output.push_str(&format!(
            "{:<28} {:>7.2}% {:>8}\n",
            truncate(&entry.label, 28),
            entry.share_pct,
            display_or_unknown(&entry.constituents)
        ));
    }
    output.push_str(&format!("\nTotal: {:.2}%\n", breakdown.total_share_pct()));
    output
}

/// 상위 보유 종목 표.
pub fn format_top_holdings(view: &TopHoldingsView) -> String {
    let mut output = section_title("Top holdings");
    for (rank, holding) in view.holdings.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {:<40} {:>7.2}%\n",
            rank + 1,
            truncate(&holding.label, 40),
            holding.share_pct
        ));
    }
    output.push_str(&format!(
        "\nTop {} share: {:.2}% of {} holdings\n",
        view.top_n(),
        view.top_share_pct,
        display_or_unknown(&view.total_constituents)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::{BreakdownDimension, TopHolding, WeightEntry};

    #[test]
    fn test_format_breakdown() {
        let breakdown = HoldingsBreakdown {
            dimension: BreakdownDimension::Country,
            entries: vec![
                WeightEntry {
                    label: "United states".to_string(),
                    share_pct: 99.52,
                    constituents: Some(500),
                },
                WeightEntry {
                    label: "Ireland".to_string(),
                    share_pct: 0.48,
                    constituents: None,
                },
            ],
        };

        let table = format_breakdown(&breakdown);
        assert!(table.starts_with("Country breakdown"));
        assert!(table.contains("United states"));
        assert!(table.contains("99.52%"));
        assert!(table.contains("Total: 100.00%"));
    }

    #[test]
    fn test_format_top_holdings() {
        let view = TopHoldingsView {
            holdings: vec![TopHolding {
                label: "Microsoft Corp".to_string(),
                share_pct: 7.12,
            }],
            top_share_pct: 7.12,
            total_constituents: Some(504),
        };

        let table = format_top_holdings(&view);
        assert!(table.contains("  1. Microsoft Corp"));
        assert!(table.contains("Top 1 share: 7.12% of 504 holdings"));
    }
}
