//! 숫자 변환 유틸리티.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// f64를 Decimal로 변환 후 소수점 4자리로 반올림.
///
/// NaN/무한대는 `None`.
pub(crate) fn round_decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(4))
}

/// 비율(0~1)을 퍼센트로 변환 후 소수점 2자리로 반올림.
pub(crate) fn fraction_to_pct_dp2(fraction: f64) -> Option<Decimal> {
    Decimal::from_f64(fraction * 100.0).map(|d| d.round_dp(2))
}

/// 0이 아닌 유한한 값만 남깁니다.
pub(crate) fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// 공백만 있는 문자열은 `None`으로 취급합니다.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_decimal_from_f64() {
        assert_eq!(round_decimal_from_f64(412.123456), Some(dec!(412.1235)));
        assert_eq!(round_decimal_from_f64(f64::NAN), None);
    }

    #[test]
    fn test_fraction_to_pct() {
        assert_eq!(fraction_to_pct_dp2(0.0003), Some(dec!(0.03)));
        assert_eq!(fraction_to_pct_dp2(0.01456), Some(dec!(1.46)));
    }

    #[test]
    fn test_non_zero_and_blank() {
        assert_eq!(non_zero(Some(0.0)), None);
        assert_eq!(non_zero(Some(f64::INFINITY)), None);
        assert_eq!(non_zero(Some(1.5)), Some(1.5));
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" VOO ".to_string())), Some("VOO".to_string()));
    }
}
