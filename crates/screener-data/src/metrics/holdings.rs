//! 섹터/국가 비중 및 상위 보유 종목 계산.

use std::collections::HashMap;

use screener_core::{BreakdownDimension, HoldingsBreakdown, TopHolding, TopHoldingsView, WeightEntry};

use crate::provider::{RawTopHolding, RawWeight};

/// 비율(0~1)을 소수점 2자리 퍼센트로 변환합니다.
fn to_pct(fraction: f64) -> f64 {
    (fraction * 100.0 * 100.0).round() / 100.0
}

/// 분류 항목명 정규화: `_`를 공백으로 바꾸고 첫 글자만 대문자.
///
/// `"real_estate"` → `"Real estate"`, `"TECHNOLOGY"` → `"Technology"`
pub fn normalize_label(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// 비중 목록을 퍼센트로 변환하고 내림차순 정렬합니다.
///
/// 정규화 후 같은 항목명은 합산합니다. 0 이하 또는 유한하지 않은 비중은
/// 버립니다. 비중이 같으면 항목명 순입니다.
pub fn build_breakdown(dimension: BreakdownDimension, weights: &[RawWeight]) -> HoldingsBreakdown {
    let mut merged: HashMap<String, (f64, Option<u32>)> = HashMap::new();
    for w in weights {
        if !w.fraction.is_finite() || w.fraction <= 0.0 {
            continue;
        }
        let label = normalize_label(&w.label);
        if label.is_empty() {
            continue;
        }
        let entry = merged.entry(label).or_insert((0.0, None));
        entry.0 += w.fraction;
        entry.1 = match (entry.1, w.count) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
    }

    let mut entries: Vec<WeightEntry> = merged
        .into_iter()
        .map(|(label, (fraction, constituents))| WeightEntry {
            label,
            share_pct: to_pct(fraction),
            constituents,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.share_pct
            .total_cmp(&a.share_pct)
            .then_with(|| a.label.cmp(&b.label))
    });

    HoldingsBreakdown { dimension, entries }
}

/// 상위 보유 종목 목록을 퍼센트로 변환하고 집중도를 계산합니다.
///
/// `total_constituents`는 반환 목록 길이와 별개로 전달된 전체 종목 수입니다.
pub fn build_top_holdings(
    holdings: &[RawTopHolding],
    total_constituents: Option<u32>,
) -> TopHoldingsView {
    let mut ranked: Vec<TopHolding> = holdings
        .iter()
        .filter(|h| h.fraction.is_finite() && h.fraction > 0.0 && !h.name.trim().is_empty())
        .map(|h| TopHolding {
            label: h.name.trim().to_string(),
            share_pct: to_pct(h.fraction),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.share_pct
            .total_cmp(&a.share_pct)
            .then_with(|| a.label.cmp(&b.label))
    });

    let top_share_pct = (ranked.iter().map(|h| h.share_pct).sum::<f64>() * 100.0).round() / 100.0;

    TopHoldingsView {
        holdings: ranked,
        top_share_pct,
        total_constituents,
    }
}
