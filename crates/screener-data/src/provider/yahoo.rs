//! Yahoo Finance 클라이언트 (1차 소스).
//!
//! quoteSummary, chart, search 엔드포인트를 직접 호출합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use screener_data::provider::{PrimaryProvider, YahooClient};
//!
//! let client = YahooClient::new()?;
//! let raw = client.fetch_info("VOO").await?;
//! ```

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{Client, StatusCode, Url};
use screener_core::{
    DividendPayment, DividendSeries, HistoricalSeries, Interval, Period, PriceBar,
    PrimaryProviderConfig,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

use super::symbol::{is_isin, normalize_query};
use super::{endpoint_url, HolderRow, PrimaryProvider, RawNews, RawPrimaryData, RawTopHolding, RawWeight};
use crate::convert::{non_blank, round_decimal_from_f64};
use crate::error::{DataError, Result};

/// 기관 보유 표에서 총보수 행의 항목명.
pub const EXPENSE_RATIO_LABEL: &str = "Expense Ratio (net)";

/// 기관 보유 표의 회전율 행 항목명.
const TURNOVER_LABEL: &str = "Annual Holdings Turnover";

const INFO_MODULES: &str =
    "price,summaryDetail,quoteType,assetProfile,fundProfile,topHoldings,defaultKeyStatistics";
const HOLDER_MODULES: &str = "fundProfile,institutionOwnership";

/// crumb 발급 전에 세션 쿠키를 받는 주소.
const COOKIE_URL: &str = "https://fc.yahoo.com";

// ==================== 응답 구조체 ====================

/// 숫자 필드. 평문 숫자 또는 `{raw, fmt}` 객체로 옵니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum YNumber {
    Plain(f64),
    Wrapped {
        #[serde(default)]
        raw: Option<f64>,
        #[serde(default)]
        fmt: Option<String>,
    },
}

impl YNumber {
    fn value(&self) -> Option<f64> {
        let v = match self {
            YNumber::Plain(v) => Some(*v),
            YNumber::Wrapped { raw, .. } => *raw,
        };
        v.filter(|v| v.is_finite())
    }

    fn formatted(&self) -> Option<String> {
        match self {
            YNumber::Wrapped { fmt, .. } => non_blank(fmt.clone()),
            YNumber::Plain(_) => None,
        }
    }
}

fn num(value: &Option<YNumber>) -> Option<f64> {
    value.as_ref().and_then(YNumber::value)
}

/// 퍼센트 표시 문자열. 응답에 `fmt`가 없으면 비율로부터 만듭니다.
fn pct_display(value: &YNumber) -> Option<String> {
    value
        .formatted()
        .or_else(|| value.value().map(|v| format!("{:.2}%", v * 100.0)))
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ApiError {
    fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some("Not Found")
    }

    fn describe(&self) -> String {
        format!(
            "{}: {}",
            self.code.as_deref().unwrap_or("unknown"),
            self.description.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryEnvelope {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetailModule>,
    quote_type: Option<QuoteTypeModule>,
    asset_profile: Option<AssetProfileModule>,
    fund_profile: Option<FundProfileModule>,
    top_holdings: Option<TopHoldingsModule>,
    default_key_statistics: Option<KeyStatisticsModule>,
    institution_ownership: Option<InstitutionOwnershipModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PriceModule {
    regular_market_price: Option<YNumber>,
    currency: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    quote_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SummaryDetailModule {
    fifty_two_week_low: Option<YNumber>,
    fifty_two_week_high: Option<YNumber>,
    two_hundred_day_average: Option<YNumber>,
    #[serde(rename = "yield")]
    yield_: Option<YNumber>,
    total_assets: Option<YNumber>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct QuoteTypeModule {
    symbol: Option<String>,
    quote_type: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AssetProfileModule {
    long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FundProfileModule {
    fees_expenses_investment: Option<FeesModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FeesModule {
    annual_report_expense_ratio: Option<YNumber>,
    annual_holdings_turnover: Option<YNumber>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TopHoldingsModule {
    holdings: Vec<HoldingEntry>,
    sector_weightings: Vec<HashMap<String, YNumber>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HoldingEntry {
    symbol: Option<String>,
    holding_name: Option<String>,
    holding_percent: Option<YNumber>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KeyStatisticsModule {
    total_assets: Option<YNumber>,
    #[serde(rename = "yield")]
    yield_: Option<YNumber>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InstitutionOwnershipModule {
    ownership_list: Vec<OwnershipEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OwnershipEntry {
    organization: Option<String>,
    pct_held: Option<YNumber>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartResult {
    timestamp: Vec<i64>,
    indicators: Option<Indicators>,
    events: Option<ChartEvents>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Indicators {
    quote: Vec<QuoteArrays>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteArrays {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartEvents {
    dividends: HashMap<String, DividendEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    quotes: Vec<SearchQuote>,
    news: Vec<SearchNews>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchQuote {
    symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchNews {
    title: Option<String>,
    publisher: Option<String>,
    link: Option<String>,
    provider_publish_time: Option<i64>,
}

// ==================== 클라이언트 ====================

/// Yahoo Finance HTTP 클라이언트.
pub struct YahooClient {
    client: Client,
    base_url: String,
    search_url: String,
    use_crumb: bool,
    /// 최초 요청 시 한 번만 발급받습니다. 발급 실패 시 `None`.
    crumb: OnceCell<Option<String>>,
}

impl YahooClient {
    /// 기본 설정으로 클라이언트를 생성합니다.
    pub fn new() -> Result<Self> {
        Self::from_config(&PrimaryProviderConfig::default())
    }

    /// 설정으로 클라이언트를 생성합니다.
    pub fn from_config(config: &PrimaryProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_url: config.search_url.trim_end_matches('/').to_string(),
            use_crumb: config.use_crumb,
            crumb: OnceCell::new(),
        })
    }

    /// 단일 주소로 모든 엔드포인트를 호출하는 클라이언트 (모의 서버용).
    ///
    /// crumb은 사용하지 않습니다.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Self::from_config(&PrimaryProviderConfig {
            base_url: base_url.clone(),
            search_url: base_url,
            use_crumb: false,
            ..PrimaryProviderConfig::default()
        })
    }

    async fn crumb(&self) -> Option<String> {
        if !self.use_crumb {
            return None;
        }
        self.crumb
            .get_or_init(|| async {
                match self.fetch_crumb().await {
                    Ok(crumb) => {
                        debug!("Yahoo Finance crumb 발급 완료");
                        Some(crumb)
                    }
                    Err(e) => {
                        warn!(error = %e, "Yahoo Finance crumb 발급 실패, crumb 없이 진행");
                        None
                    }
                }
            })
            .await
            .clone()
    }

    async fn fetch_crumb(&self) -> Result<String> {
        // 세션 쿠키만 필요하므로 응답 상태는 확인하지 않음
        if let Err(e) = self.client.get(COOKIE_URL).send().await {
            debug!(error = %e, "쿠키 요청 실패");
        }

        let url = endpoint_url(&self.base_url, &["v1", "test", "getcrumb"])?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::FetchError(format!(
                "crumb 발급 실패 [{}]",
                status
            )));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DataError::MalformedResponse(
                "crumb 응답이 비어 있거나 HTML입니다".to_string(),
            ));
        }
        Ok(crumb)
    }

    /// GET 요청 후 JSON 파싱.
    ///
    /// Yahoo는 404 응답에도 오류 JSON을 담아 보내므로 본문을 먼저 파싱합니다.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        mut query: Vec<(&'static str, String)>,
        subject: &str,
    ) -> Result<T> {
        if let Some(crumb) = self.crumb().await {
            query.push(("crumb", crumb));
        }

        debug!(url = %url, subject = %subject, "Yahoo Finance 요청");
        let response = self.client.get(url).query(&query).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited(format!(
                "Yahoo Finance ({})",
                subject
            )));
        }

        let body = response.text().await?;
        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if status == StatusCode::NOT_FOUND => {
                Err(DataError::NotFound(subject.to_string()))
            }
            Err(e) if !status.is_success() => Err(DataError::FetchError(format!(
                "Yahoo Finance 오류 [{}] ({}): {}",
                status, subject, e
            ))),
            Err(e) => Err(DataError::MalformedResponse(format!(
                "Yahoo Finance 응답 파싱 실패 ({}): {}",
                subject, e
            ))),
        }
    }

    async fn quote_summary(&self, ticker: &str, modules: &str) -> Result<SummaryResult> {
        let url = endpoint_url(&self.base_url, &["v10", "finance", "quoteSummary", ticker])?;
        let envelope: QuoteSummaryEnvelope = self
            .get_json(url, vec![("modules", modules.to_string())], ticker)
            .await?;

        let summary = envelope.quote_summary;
        if let Some(error) = summary.error {
            if error.is_not_found() {
                return Err(DataError::NotFound(ticker.to_string()));
            }
            return Err(DataError::FetchError(format!(
                "Yahoo Finance quoteSummary 오류 ({}): {}",
                ticker,
                error.describe()
            )));
        }

        summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::NotFound(ticker.to_string()))
    }

    async fn chart(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
        with_dividends: bool,
    ) -> Result<ChartResult> {
        let url = endpoint_url(&self.base_url, &["v8", "finance", "chart", ticker])?;
        let mut query = vec![
            ("range", range.to_string()),
            ("interval", interval.to_string()),
        ];
        if with_dividends {
            query.push(("events", "div".to_string()));
        }

        let envelope: ChartEnvelope = self.get_json(url, query, ticker).await?;
        let chart = envelope.chart;
        if let Some(error) = chart.error {
            if error.is_not_found() {
                return Err(DataError::NotFound(ticker.to_string()));
            }
            return Err(DataError::FetchError(format!(
                "Yahoo Finance chart 오류 ({}): {}",
                ticker,
                error.describe()
            )));
        }

        chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::NotFound(ticker.to_string()))
    }

    async fn search(&self, query: &str, quotes: usize, news: usize) -> Result<SearchResponse> {
        let url = endpoint_url(&self.search_url, &["v1", "finance", "search"])?;
        self.get_json(
            url,
            vec![
                ("q", query.to_string()),
                ("quotesCount", quotes.to_string()),
                ("newsCount", news.to_string()),
            ],
            query,
        )
        .await
    }
}

/// quoteSummary 결과를 메타데이터로 변환합니다.
fn to_primary_data(ticker: &str, result: SummaryResult) -> RawPrimaryData {
    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let quote = result.quote_type.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();
    let fees = result
        .fund_profile
        .and_then(|p| p.fees_expenses_investment)
        .unwrap_or_default();
    let holdings = result.top_holdings.unwrap_or_default();

    let sector_weightings = holdings
        .sector_weightings
        .iter()
        .flat_map(|entry| entry.iter())
        .filter_map(|(label, weight)| {
            weight.value().map(|fraction| RawWeight {
                label: label.clone(),
                fraction,
                count: None,
            })
        })
        .collect();

    let top_holdings = holdings
        .holdings
        .into_iter()
        .filter_map(|h| {
            let name = non_blank(h.holding_name).or_else(|| non_blank(h.symbol))?;
            let fraction = num(&h.holding_percent)?;
            Some(RawTopHolding { name, fraction })
        })
        .collect();

    RawPrimaryData {
        symbol: non_blank(quote.symbol).unwrap_or_else(|| ticker.to_string()),
        quote_type: non_blank(quote.quote_type).or_else(|| non_blank(price.quote_type)),
        long_name: non_blank(quote.long_name)
            .or_else(|| non_blank(price.long_name))
            .or_else(|| non_blank(price.short_name))
            .or_else(|| non_blank(quote.short_name)),
        summary: result
            .asset_profile
            .and_then(|p| non_blank(p.long_business_summary)),
        currency: non_blank(price.currency).or_else(|| non_blank(detail.currency)),
        price: num(&price.regular_market_price),
        low_52w: num(&detail.fifty_two_week_low),
        high_52w: num(&detail.fifty_two_week_high),
        ma200: num(&detail.two_hundred_day_average),
        yield_fraction: num(&detail.yield_).or_else(|| num(&stats.yield_)),
        total_assets: num(&detail.total_assets).or_else(|| num(&stats.total_assets)),
        expense_ratio_fraction: num(&fees.annual_report_expense_ratio),
        sector_weightings,
        top_holdings,
    }
}

/// 펀드 프로필과 기관 보유 목록을 표 형태로 변환합니다.
fn to_holder_rows(result: SummaryResult) -> Vec<HolderRow> {
    let mut rows = Vec::new();

    if let Some(fees) = result.fund_profile.and_then(|p| p.fees_expenses_investment) {
        if let Some(value) = fees.annual_report_expense_ratio.as_ref().and_then(pct_display) {
            rows.push(HolderRow {
                label: EXPENSE_RATIO_LABEL.to_string(),
                value,
            });
        }
        if let Some(value) = fees.annual_holdings_turnover.as_ref().and_then(pct_display) {
            rows.push(HolderRow {
                label: TURNOVER_LABEL.to_string(),
                value,
            });
        }
    }

    if let Some(ownership) = result.institution_ownership {
        rows.extend(ownership.ownership_list.into_iter().filter_map(|entry| {
            let label = non_blank(entry.organization)?;
            let value = entry.pct_held.as_ref().and_then(pct_display)?;
            Some(HolderRow { label, value })
        }));
    }

    rows
}

/// chart 결과를 캔들 목록으로 변환합니다. 종가가 없는 행은 건너뜁니다.
fn to_price_bars(result: &ChartResult) -> Vec<PriceBar> {
    let Some(quote) = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.first())
    else {
        return Vec::new();
    };

    let at = |values: &Vec<Option<f64>>, i: usize| values.get(i).copied().flatten();

    let mut bars: Vec<PriceBar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = at(&quote.close, i)?;
            let timestamp = Utc.timestamp_opt(ts, 0).single()?;
            Some(PriceBar {
                timestamp,
                open: round_decimal_from_f64(at(&quote.open, i).unwrap_or(close))?,
                high: round_decimal_from_f64(at(&quote.high, i).unwrap_or(close))?,
                low: round_decimal_from_f64(at(&quote.low, i).unwrap_or(close))?,
                close: round_decimal_from_f64(close)?,
                volume: at(&quote.volume, i)
                    .filter(|v| *v >= 0.0)
                    .map(|v| v as u64)
                    .unwrap_or(0),
            })
        })
        .collect();

    bars.sort_by_key(|b| b.timestamp);
    bars
}

/// chart 배당 이벤트를 배당 내역으로 변환합니다.
fn to_dividend_series(result: &ChartResult) -> DividendSeries {
    let payments = result
        .events
        .as_ref()
        .map(|events| {
            events
                .dividends
                .values()
                .filter_map(|event| {
                    let date = Utc.timestamp_opt(event.date, 0).single()?.date_naive();
                    let amount = round_decimal_from_f64(event.amount)?;
                    Some(DividendPayment { date, amount })
                })
                .collect()
        })
        .unwrap_or_default();

    DividendSeries::new(payments)
}

#[async_trait]
impl PrimaryProvider for YahooClient {
    #[instrument(skip(self))]
    async fn resolve_symbol(&self, query: &str) -> Result<String> {
        let normalized = normalize_query(query)?;
        if !is_isin(&normalized) {
            return Ok(normalized);
        }

        let response = self.search(&normalized, 1, 0).await?;
        let symbol = response
            .quotes
            .into_iter()
            .find_map(|q| non_blank(q.symbol))
            .ok_or_else(|| DataError::NotFound(normalized.clone()))?;

        debug!(isin = %normalized, symbol = %symbol, "ISIN 변환 완료");
        Ok(symbol)
    }

    #[instrument(skip(self))]
    async fn fetch_info(&self, ticker: &str) -> Result<RawPrimaryData> {
        let result = self.quote_summary(ticker, INFO_MODULES).await?;
        let data = to_primary_data(ticker, result);
        debug!(
            symbol = %data.symbol,
            quote_type = ?data.quote_type,
            sectors = data.sector_weightings.len(),
            "Yahoo Finance 메타데이터 조회 완료"
        );
        Ok(data)
    }

    #[instrument(skip(self))]
    async fn fetch_history(
        &self,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Result<HistoricalSeries> {
        let result = self
            .chart(ticker, period.as_str(), interval.as_str(), false)
            .await?;
        let bars = to_price_bars(&result);
        debug!(bars = bars.len(), "Yahoo Finance 시세 조회 완료");

        Ok(HistoricalSeries {
            symbol: ticker.to_string(),
            period,
            interval,
            bars,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_dividends(&self, ticker: &str) -> Result<DividendSeries> {
        let result = self.chart(ticker, "max", "1mo", true).await?;
        let series = to_dividend_series(&result);
        debug!(payments = series.len(), "Yahoo Finance 배당 조회 완료");
        Ok(series)
    }

    #[instrument(skip(self))]
    async fn fetch_institutional_holders(&self, ticker: &str) -> Result<Vec<HolderRow>> {
        let result = self.quote_summary(ticker, HOLDER_MODULES).await?;
        Ok(to_holder_rows(result))
    }

    #[instrument(skip(self))]
    async fn fetch_news(&self, ticker: &str, limit: usize) -> Result<Vec<RawNews>> {
        let response = self.search(ticker, 0, limit).await?;
        let news: Vec<RawNews> = response
            .news
            .into_iter()
            .filter_map(|n| {
                Some(RawNews {
                    title: non_blank(n.title)?,
                    published_at: n.provider_publish_time?,
                    publisher: non_blank(n.publisher),
                    link: non_blank(n.link),
                })
            })
            .take(limit)
            .collect();
        debug!(count = news.len(), "Yahoo Finance 뉴스 조회 완료");
        Ok(news)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ynumber_forms() {
        let plain: YNumber = serde_json::from_str("412.5").unwrap();
        assert_eq!(plain.value(), Some(412.5));
        assert_eq!(plain.formatted(), None);

        let wrapped: YNumber = serde_json::from_str(r#"{"raw": 0.0003, "fmt": "0.03%"}"#).unwrap();
        assert_eq!(wrapped.value(), Some(0.0003));
        assert_eq!(wrapped.formatted().as_deref(), Some("0.03%"));

        let empty: YNumber = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.value(), None);
    }

    #[test]
    fn test_pct_display_fallback() {
        let raw_only: YNumber = serde_json::from_str(r#"{"raw": 0.0945}"#).unwrap();
        assert_eq!(pct_display(&raw_only).as_deref(), Some("9.45%"));
    }

    #[test]
    fn test_to_primary_data_name_fallback() {
        let result: SummaryResult = serde_json::from_str(
            r#"{
                "price": {"shortName": "Vanguard S&P 500", "currency": "USD", "quoteType": "ETF"},
                "topHoldings": {
                    "sectorWeightings": [{"technology": {"raw": 0.29}}, {"realestate": 0.025}],
                    "holdings": [{"symbol": "AAPL", "holdingPercent": {"raw": 0.07}}, {"holdingName": "Missing pct"}]
                }
            }"#,
        )
        .unwrap();

        let data = to_primary_data("VOO", result);
        assert_eq!(data.symbol, "VOO");
        assert_eq!(data.long_name.as_deref(), Some("Vanguard S&P 500"));
        assert_eq!(data.quote_type.as_deref(), Some("ETF"));
        assert_eq!(data.sector_weightings.len(), 2);
        assert_eq!(data.top_holdings.len(), 1);
        assert_eq!(data.top_holdings[0].name, "AAPL");
    }

    #[test]
    fn test_price_bars_skip_null_close() {
        let result: ChartResult = serde_json::from_str(
            r#"{
                "timestamp": [1700006400, 1700092800, 1700179200],
                "indicators": {"quote": [{
                    "open": [10.0, null, 12.0],
                    "high": [11.0, null, 13.0],
                    "low": [9.0, null, 11.0],
                    "close": [10.5, null, 12.5],
                    "volume": [1000, null, 3000]
                }]}
            }"#,
        )
        .unwrap();

        let bars = to_price_bars(&result);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].volume, 3000);
        assert!(bars[0].timestamp < bars[1].timestamp);
    }
}
