//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `SCREENER__*` 환경 변수 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreResult;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 1차 데이터 소스 (시세/펀더멘털)
    #[serde(default)]
    pub primary: PrimaryProviderConfig,
    /// 2차 데이터 소스 (보유 종목/섹터/국가 비중)
    #[serde(default)]
    pub secondary: SecondaryProviderConfig,
    /// 표시 설정
    #[serde(default)]
    pub display: DisplayConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 1차 데이터 소스(Yahoo Finance) 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrimaryProviderConfig {
    /// quoteSummary / chart API 기본 URL
    #[serde(default = "default_primary_base_url")]
    pub base_url: String,
    /// 검색 API 기본 URL (ISIN 변환, 뉴스)
    #[serde(default = "default_primary_search_url")]
    pub search_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// HTTP User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// crumb 토큰 사용 여부
    #[serde(default = "default_true")]
    pub use_crumb: bool,
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_primary_base_url(),
            search_url: default_primary_search_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            use_crumb: true,
        }
    }
}

/// 2차 데이터 소스(TrackInsight) 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecondaryProviderConfig {
    /// REST API 기본 URL
    #[serde(default = "default_secondary_base_url")]
    pub base_url: String,
    /// 펀드 상세 페이지 기본 URL
    #[serde(default = "default_secondary_page_url")]
    pub page_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SecondaryProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_secondary_base_url(),
            page_url: default_secondary_page_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 표시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// 배당 날짜 형식 (chrono strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// 뉴스 게시 시각 형식
    #[serde(default = "default_news_date_format")]
    pub news_date_format: String,
    /// 조회할 뉴스 개수
    #[serde(default = "default_news_limit")]
    pub news_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            news_date_format: default_news_date_format(),
            news_limit: default_news_limit(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_primary_base_url() -> String {
    "https://query2.finance.yahoo.com".to_string()
}
fn default_primary_search_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}
fn default_secondary_base_url() -> String {
    "https://www.trackinsight.com/data-api".to_string()
}
fn default_secondary_page_url() -> String {
    "https://www.trackinsight.com/en/fund".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}
fn default_true() -> bool {
    true
}
fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}
fn default_news_date_format() -> String {
    "%d/%m/%Y  %H:%M:%S".to_string()
}
fn default_news_limit() -> usize {
    10
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("SCREENER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        Self::load("config/default.toml")
    }
}
