//! TrackInsight 클라이언트 (2차 소스).
//!
//! 펀드 메타데이터, 보유 종목 구성, 일별 스냅샷을 각각의 엔드포인트에서
//! 동시에 조회합니다. 메타데이터가 없으면 펀드 자체가 없는 것으로 보고,
//! 나머지 두 엔드포인트의 실패는 `None`으로 남깁니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use screener_core::SecondaryProviderConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{
    endpoint_url, DailySnapshot, FundHoldings, FundMetadata, RawSecondaryData, RawTopHolding,
    RawWeight, SecondaryProvider,
};
use crate::convert::non_blank;
use crate::error::{DataError, Result};

// ==================== 응답 구조체 ====================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FundResponse {
    ticker: Option<String>,
    label: Option<String>,
    description: Option<String>,
    exposure: Option<String>,
    isin: Option<String>,
    currency: Option<String>,
    expense_ratio: Option<f64>,
    dividend_yield: Option<f64>,
}

impl FundResponse {
    fn is_empty(&self) -> bool {
        self.label.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.isin.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HoldingsResponse {
    sectors: Vec<WeightResponse>,
    countries: Vec<WeightResponse>,
    top_holdings: Vec<WeightResponse>,
    holdings_count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WeightResponse {
    name: Option<String>,
    weight: Option<f64>,
    count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DailyResponse {
    date: Option<String>,
    nav: Option<f64>,
    aum: Option<f64>,
    esg_grade: Option<String>,
}

fn to_weights(entries: Vec<WeightResponse>) -> Vec<RawWeight> {
    entries
        .into_iter()
        .filter_map(|w| {
            Some(RawWeight {
                label: non_blank(w.name)?,
                fraction: w.weight.filter(|v| v.is_finite())?,
                count: w.count,
            })
        })
        .collect()
}

// ==================== 클라이언트 ====================

/// TrackInsight HTTP 클라이언트.
#[derive(Debug, Clone)]
pub struct TrackInsightClient {
    client: Client,
    base_url: String,
    page_url: String,
}

impl TrackInsightClient {
    /// 기본 설정으로 클라이언트를 생성합니다.
    pub fn new() -> Result<Self> {
        Self::from_config(&SecondaryProviderConfig::default())
    }

    /// 설정으로 클라이언트를 생성합니다.
    pub fn from_config(config: &SecondaryProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_url: config.page_url.trim_end_matches('/').to_string(),
        })
    }

    /// 모의 서버 주소로 클라이언트를 생성합니다.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&SecondaryProviderConfig {
            base_url: base_url.into(),
            ..SecondaryProviderConfig::default()
        })
    }

    /// 펀드 상세 페이지 주소. 설정된 페이지 주소가 잘못되었으면 `None`.
    pub fn fund_page_url(&self, symbol: &str) -> Option<String> {
        endpoint_url(&self.page_url, &[symbol])
            .ok()
            .map(String::from)
    }

    /// `/funds/{symbol}[/{part}]` GET 요청 후 JSON 파싱. 404 또는 `null` 본문은 `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        symbol: &str,
        part: Option<&str>,
    ) -> Result<Option<T>> {
        let mut segments = vec!["funds", symbol];
        segments.extend(part);
        let url = endpoint_url(&self.base_url, &segments)?;
        debug!(url = %url, "TrackInsight 요청");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited(format!("TrackInsight ({})", symbol)));
        }
        if !status.is_success() {
            return Err(DataError::FetchError(format!(
                "TrackInsight 오류 [{}] ({})",
                status, symbol
            )));
        }

        let body = response.text().await?;
        serde_json::from_str::<Option<T>>(&body).map_err(|e| {
            DataError::MalformedResponse(format!(
                "TrackInsight 응답 파싱 실패 ({} {}): {}",
                symbol,
                part.unwrap_or("fund"),
                e
            ))
        })
    }

    async fn fetch_fund(&self, symbol: &str) -> Result<FundMetadata> {
        let fund: FundResponse = self
            .get_json(symbol, None)
            .await?
            .filter(|f: &FundResponse| !f.is_empty())
            .ok_or_else(|| DataError::NotFound(symbol.to_string()))?;

        Ok(FundMetadata {
            symbol: non_blank(fund.ticker).unwrap_or_else(|| symbol.to_string()),
            label: non_blank(fund.label),
            description: non_blank(fund.description),
            exposure: non_blank(fund.exposure),
            isin: non_blank(fund.isin),
            currency: non_blank(fund.currency),
            expense_ratio_fraction: fund.expense_ratio,
            dividend_yield_fraction: fund.dividend_yield,
        })
    }

    async fn fetch_holdings(&self, symbol: &str) -> Result<Option<FundHoldings>> {
        let holdings: Option<HoldingsResponse> = self
            .get_json(symbol, Some("holdings"))
            .await?;

        Ok(holdings.map(|h| FundHoldings {
            sectors: to_weights(h.sectors),
            countries: to_weights(h.countries),
            top_holdings: to_weights(h.top_holdings)
                .into_iter()
                .map(|w| RawTopHolding {
                    name: w.label,
                    fraction: w.fraction,
                })
                .collect(),
            holdings_count: h.holdings_count,
        }))
    }

    async fn fetch_daily(&self, symbol: &str) -> Result<Option<DailySnapshot>> {
        let daily: Option<DailyResponse> = self
            .get_json(symbol, Some("daily"))
            .await?;

        Ok(daily.map(|d| DailySnapshot {
            date: d
                .date
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            nav: d.nav,
            aum: d.aum,
            esg_grade: non_blank(d.esg_grade),
        }))
    }
}

/// 부가 엔드포인트 결과. 실패는 경고로 남기고 `None`.
fn degrade<T>(result: Result<Option<T>>, symbol: &str, part: &str) -> Option<T> {
    match result {
        Ok(value) => {
            if value.is_none() {
                debug!(symbol = %symbol, part = %part, "TrackInsight 데이터 없음");
            }
            value
        }
        Err(e) => {
            warn!(symbol = %symbol, part = %part, error = %e, "TrackInsight 부가 데이터 조회 실패");
            None
        }
    }
}

#[async_trait]
impl SecondaryProvider for TrackInsightClient {
    #[instrument(skip(self))]
    async fn fetch(&self, symbol: &str) -> Result<RawSecondaryData> {
        let (fund, holdings, daily) = tokio::join!(
            self.fetch_fund(symbol),
            self.fetch_holdings(symbol),
            self.fetch_daily(symbol),
        );

        let fund = fund?;
        let holdings = degrade(holdings, symbol, "holdings");
        let daily = degrade(daily, symbol, "daily");

        debug!(
            symbol = %fund.symbol,
            has_holdings = holdings.is_some(),
            has_daily = daily.is_some(),
            "TrackInsight 조회 완료"
        );

        Ok(RawSecondaryData {
            page_url: self.fund_page_url(&fund.symbol),
            fund,
            holdings,
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_page_url() {
        let client = TrackInsightClient::new().unwrap();
        assert_eq!(
            client.fund_page_url("VOO").as_deref(),
            Some("https://www.trackinsight.com/en/fund/VOO")
        );
    }

    #[test]
    fn test_empty_fund_record() {
        let fund: FundResponse = serde_json::from_str(r#"{"label": " ", "ticker": "X"}"#).unwrap();
        assert!(fund.is_empty());

        let fund: FundResponse = serde_json::from_str(r#"{"isin": "US9229083632"}"#).unwrap();
        assert!(!fund.is_empty());
    }

    #[test]
    fn test_to_weights_drops_incomplete_entries() {
        let entries: Vec<WeightResponse> = serde_json::from_str(
            r#"[
                {"name": "technology", "weight": 0.29, "count": 70},
                {"name": "", "weight": 0.1},
                {"name": "energy"}
            ]"#,
        )
        .unwrap();

        let weights = to_weights(entries);
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].label, "technology");
        assert_eq!(weights[0].count, Some(70));
    }
}
