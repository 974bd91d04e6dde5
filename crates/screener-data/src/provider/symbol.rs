//! 사용자 입력 정규화 및 ISIN 판별.

use crate::error::{DataError, Result};

/// ISIN 형식인지 확인합니다.
///
/// 국가 코드 2자리(영문 대문자) + 영숫자 9자리 + 검증 숫자 1자리이며,
/// 검증 숫자는 문자를 숫자(A=10 … Z=35)로 펼친 뒤 Luhn 알고리즘으로 확인합니다.
pub fn is_isin(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 12 {
        return false;
    }
    if !bytes[..2].iter().all(|b| b.is_ascii_uppercase()) {
        return false;
    }
    if !bytes[2..11]
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return false;
    }
    if !bytes[11].is_ascii_digit() {
        return false;
    }

    let digits: Vec<u32> = value
        .chars()
        .filter_map(|c| c.to_digit(36))
        .flat_map(|v| {
            if v >= 10 {
                vec![v / 10, v % 10]
            } else {
                vec![v]
            }
        })
        .collect();

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// 사용자 입력을 정리합니다 (앞뒤 공백 제거, 대문자).
///
/// 빈 입력, 공백이나 URL 구분 문자(`/ \ ? # %`)가 섞인 입력, `.`만으로 된
/// 입력은 `InvalidInput`.
pub fn normalize_query(query: &str) -> Result<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(DataError::InvalidInput("empty ticker".to_string()));
    }
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '%'))
        || trimmed.chars().all(|c| c == '.')
    {
        return Err(DataError::InvalidInput(format!("invalid ticker: {}", trimmed)));
    }
    Ok(trimmed.to_uppercase())
}
