//! 데이터 모듈 오류 타입.

use screener_core::CoreError;
use thiserror::Error;

use crate::provider::ProviderSource;

/// 데이터 관련 오류.
///
/// 캐시에 실패 결과를 그대로 저장하므로 `Clone`이어야 합니다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// 어떤 소스에서도 종목을 찾을 수 없음
    #[error("Ticker not found: {0}")]
    NotFound(String),

    /// 종목은 존재하지만 ETF가 아님
    #[error("Unsupported asset type for {symbol}: {quote_type}")]
    InvalidAssetType { symbol: String, quote_type: String },

    /// 한쪽 소스 실패로 일부 데이터만 제공 가능 (치명적이지 않음)
    #[error("Partial data from {provider}: {reason}")]
    PartialDataUnavailable {
        provider: ProviderSource,
        reason: String,
    },

    /// 응답 스키마 불일치 (필수 키 누락 등)
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Rate limit 초과
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// 잘못된 입력
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DataError {
    /// 화면에 표시할 사용자 메시지.
    ///
    /// "찾을 수 없음", "지원하지 않는 자산", "일부 데이터 없음"을 구분하고,
    /// 일시적인 실패(타임아웃, rate limit)는 재시도를 안내합니다.
    pub fn user_message(&self) -> String {
        match self {
            DataError::NotFound(ticker) => format!("Could not find ticker {}.", ticker),
            DataError::InvalidAssetType { .. } => {
                "Only ETF assets are currently handled.".to_string()
            }
            DataError::PartialDataUnavailable { .. } => {
                "Some data unavailable, showing partial results.".to_string()
            }
            DataError::Timeout(_) => {
                "Could not find ticker data in time: providers did not respond. Try again later."
                    .to_string()
            }
            DataError::RateLimited(_) => {
                "Data providers are rate limiting requests. Try again later.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::MalformedResponse(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::MalformedResponse(err.to_string())
    }
}

impl From<CoreError> for DataError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config(msg) => DataError::ConfigError(msg),
            other => DataError::InvalidInput(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
