//! 표시용 숫자/날짜 포맷.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use screener_core::NewsItem;
use std::str::FromStr;

use crate::provider::RawNews;

/// 큰 숫자를 K/M/B 단위로 축약합니다.
///
/// 자릿수 `n`이 9 초과면 B, 6 초과면 M, 3 초과면 K. 앞쪽 자리와 소수 한 자리만
/// 남기며 반올림하지 않습니다. 3자리 이하는 그대로 반환합니다.
///
/// 단위는 자릿수만으로 정해지므로 B는 10자리부터입니다. `"123456789"`(9자리)는
/// `"123.4M"`, `"123456"`(6자리)은 `"123.4K"`, `"1234567890"`은 `"1.2B"`가 됩니다.
pub fn simplify_digits(digits: &str) -> String {
    let n = digits.len();
    let (shift, suffix) = if n > 9 {
        (9, 'B')
    } else if n > 6 {
        (6, 'M')
    } else if n > 3 {
        (3, 'K')
    } else {
        return digits.to_string();
    };

    let head = n - shift;
    format!("{}.{}{}", &digits[..head], &digits[head..head + 1], suffix)
}

/// 정수 축약 표시.
pub fn simplify_u64(value: u64) -> String {
    simplify_digits(&value.to_string())
}

/// 실수 축약 표시. 소수부는 버리고 부호는 유지합니다.
pub fn simplify_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let integer = value.trunc();
    let digits = format!("{:.0}", integer.abs());
    if integer < 0.0 {
        format!("-{}", simplify_digits(&digits))
    } else {
        simplify_digits(&digits)
    }
}

pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// Unix timestamp(초)를 UTC 기준으로 포맷합니다.
pub fn format_timestamp(timestamp: i64, date_format: &str) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|dt| dt.format(date_format).to_string())
}

/// 뉴스 원본을 표시용으로 변환합니다. 시각이 잘못된 항목은 버립니다.
pub fn to_news_items(raw: &[RawNews], date_format: &str) -> Vec<NewsItem> {
    raw.iter()
        .filter_map(|n| {
            Some(NewsItem {
                published: format_timestamp(n.published_at, date_format)?,
                title: n.title.clone(),
                publisher: n.publisher.clone(),
                link: n.link.clone(),
            })
        })
        .collect()
}

/// `"0.03%"` 형태의 퍼센트 문자열을 숫자로 변환합니다.
///
/// `%` 기호가 없거나 음수/숫자가 아니면 `None`.
pub fn parse_percent(value: &str) -> Option<Decimal> {
    let number = value.trim().strip_suffix('%')?.trim();
    Decimal::from_str(number)
        .ok()
        .filter(|d| !d.is_sign_negative())
}
