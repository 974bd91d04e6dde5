//! 1차/2차 소스 통합 (Reconciliation).
//!
//! 두 소스를 캐시를 거쳐 동시에 조회한 뒤 필드별 우선순위로 하나의
//! `TickerRecord`를 만듭니다.
//!
//! # 필드 우선순위
//!
//! 1차 소스 값이 있고 비어 있지 않으며 0이 아니면 사용하고, 없으면 2차 소스
//! 값(비율 → 퍼센트, NAV → 가격, AUM → 총자산 변환)을 사용합니다. 둘 다
//! 없으면 `None`(화면에는 `"?"`)입니다.
//!
//! 한쪽 소스 실패는 `ProviderWarning`으로 기록되고 빈 레코드로 대체됩니다.
//! 이름을 얻지 못하면 `NotFound`, ETF가 아니면 `InvalidAssetType`입니다.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use screener_core::{
    AppConfig, BreakdownDimension, DividendSeries, DividendSummary, HistoricalSeries,
    HoldingsBreakdown, Interval, NewsItem, Period, TickerRecord, TopHoldingsView,
    DEFAULT_CURRENCY,
};
use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheStats, ProviderCache};
use crate::convert::{fraction_to_pct_dp2, non_zero, round_decimal_from_f64};
use crate::error::{DataError, Result};
use crate::metrics::{
    build_breakdown, build_top_holdings, parse_percent, summarize_dividends, to_news_items,
};
use crate::provider::{
    is_isin, normalize_query, HolderRow, PrimaryProvider, ProviderSource, RawNews,
    RawPrimaryData, RawSecondaryData, SecondaryProvider, TrackInsightClient, YahooClient,
    EXPENSE_RATIO_LABEL,
};

const ETF_QUOTE_TYPE: &str = "ETF";

/// 한쪽 소스 실패 기록.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderWarning {
    pub source: ProviderSource,
    pub error: DataError,
}

/// 통합 결과.
///
/// `warnings`가 비어 있지 않으면 일부 필드가 한쪽 소스만으로 채워졌습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub record: TickerRecord,
    pub warnings: Vec<ProviderWarning>,
}

impl Reconciled {
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 일부 데이터 누락을 표시용 오류 값으로 반환합니다.
    pub fn partial_error(&self) -> Option<DataError> {
        self.warnings
            .first()
            .map(|w| DataError::PartialDataUnavailable {
                provider: w.source,
                reason: w.error.to_string(),
            })
    }
}

/// 엔진 동작 옵션.
#[derive(Debug, Clone)]
pub struct ScreenerOptions {
    /// 1차 소스 호출 제한 시간
    pub primary_timeout: Duration,
    /// 2차 소스 호출 제한 시간
    pub secondary_timeout: Duration,
    /// 뉴스 최대 개수
    pub news_limit: usize,
    /// 뉴스 게시 시각 포맷
    pub news_date_format: String,
}

impl Default for ScreenerOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ScreenerOptions {
    /// 설정에서 옵션을 만듭니다.
    ///
    /// 한 번의 조회가 HTTP 요청 여러 개(crumb, 부가 엔드포인트)를 포함하므로
    /// 제한 시간은 HTTP 타임아웃의 2배입니다.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            primary_timeout: Duration::from_secs(config.primary.timeout_secs.saturating_mul(2)),
            secondary_timeout: Duration::from_secs(
                config.secondary.timeout_secs.saturating_mul(2),
            ),
            news_limit: config.display.news_limit,
            news_date_format: config.display.news_date_format.clone(),
        }
    }
}

/// 제한 시간 내에 끝나지 않으면 `Timeout`.
async fn with_timeout<T, F>(duration: Duration, source: ProviderSource, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(DataError::Timeout(format!(
            "{} did not respond within {}s",
            source,
            duration.as_secs_f64()
        ))),
    }
}

/// 표시 항목을 채울 데이터가 없음.
fn unavailable(source: ProviderSource, reason: impl Into<String>) -> DataError {
    DataError::PartialDataUnavailable {
        provider: source,
        reason: reason.into(),
    }
}

/// ETF 스크리너 엔진.
///
/// Provider와 캐시는 주입됩니다. 캐시를 공유하면 여러 엔진이 같은 조회
/// 결과를 재사용합니다.
pub struct Screener {
    primary: Arc<dyn PrimaryProvider>,
    secondary: Arc<dyn SecondaryProvider>,
    cache: Arc<ProviderCache>,
    options: ScreenerOptions,
}

impl Screener {
    pub fn new(
        primary: Arc<dyn PrimaryProvider>,
        secondary: Arc<dyn SecondaryProvider>,
        cache: Arc<ProviderCache>,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache,
            options: ScreenerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScreenerOptions) -> Self {
        self.options = options;
        self
    }

    /// 설정으로 Yahoo Finance/TrackInsight 클라이언트와 새 캐시를 구성합니다.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let primary = Arc::new(YahooClient::from_config(&config.primary)?);
        let secondary = Arc::new(TrackInsightClient::from_config(&config.secondary)?);
        Ok(Self::new(primary, secondary, Arc::new(ProviderCache::new()))
            .with_options(ScreenerOptions::from_config(config)))
    }

    pub fn cache(&self) -> &Arc<ProviderCache> {
        &self.cache
    }

    pub fn options(&self) -> &ScreenerOptions {
        &self.options
    }

    pub async fn cache_stats(&self) -> Vec<CacheStats> {
        self.cache.stats().await
    }

    // ==================== 캐시 경유 조회 ====================

    /// 사용자 입력을 티커로 변환합니다. 변환 실패 시 정리된 입력을 그대로 사용합니다.
    async fn resolve(&self, normalized: &str) -> String {
        let resolved = self
            .cache
            .symbols
            .get_or_fetch(normalized, || {
                with_timeout(
                    self.options.primary_timeout,
                    ProviderSource::Primary,
                    self.primary.resolve_symbol(normalized),
                )
            })
            .await;

        match resolved {
            Ok(symbol) => symbol.to_string(),
            Err(e) => {
                warn!(query = %normalized, error = %e, "심볼 변환 실패, 입력값 사용");
                normalized.to_string()
            }
        }
    }

    async fn primary_info(&self, ticker: &str) -> Result<Arc<RawPrimaryData>> {
        self.cache
            .primary_info
            .get_or_fetch(ticker, || {
                with_timeout(
                    self.options.primary_timeout,
                    ProviderSource::Primary,
                    self.primary.fetch_info(ticker),
                )
            })
            .await
    }

    async fn holders(&self, ticker: &str) -> Result<Arc<Vec<HolderRow>>> {
        self.cache
            .holders
            .get_or_fetch(ticker, || {
                with_timeout(
                    self.options.primary_timeout,
                    ProviderSource::Primary,
                    self.primary.fetch_institutional_holders(ticker),
                )
            })
            .await
    }

    async fn dividend_series(&self, ticker: &str) -> Result<Arc<DividendSeries>> {
        self.cache
            .dividends
            .get_or_fetch(ticker, || {
                with_timeout(
                    self.options.primary_timeout,
                    ProviderSource::Primary,
                    self.primary.fetch_dividends(ticker),
                )
            })
            .await
    }

    async fn raw_news(&self, ticker: &str) -> Result<Arc<Vec<RawNews>>> {
        self.cache
            .news
            .get_or_fetch(ticker, || {
                with_timeout(
                    self.options.primary_timeout,
                    ProviderSource::Primary,
                    self.primary.fetch_news(ticker, self.options.news_limit),
                )
            })
            .await
    }

    async fn secondary_data(&self, symbol: &str) -> Result<Arc<RawSecondaryData>> {
        self.cache
            .secondary
            .get_or_fetch(symbol, || {
                with_timeout(
                    self.options.secondary_timeout,
                    ProviderSource::Secondary,
                    self.secondary.fetch(symbol),
                )
            })
            .await
    }

    // ==================== 통합 ====================

    /// 티커 또는 ISIN으로 통합 레코드를 만듭니다.
    ///
    /// # Errors
    /// - `InvalidInput`: 빈 입력
    /// - `NotFound`: 어느 소스에서도 이름을 얻지 못함
    /// - `InvalidAssetType`: ETF가 아님
    #[instrument(skip(self))]
    pub async fn reconcile(&self, query: &str) -> Result<Reconciled> {
        let normalized = normalize_query(query)?;
        let symbol = self.resolve(&normalized).await;

        let (primary, secondary, holders) = tokio::join!(
            self.primary_info(&symbol),
            self.secondary_data(&symbol),
            self.holders(&symbol),
        );

        let mut warnings = Vec::new();
        let primary = absorb(primary, ProviderSource::Primary, &mut warnings);
        let secondary = absorb(secondary, ProviderSource::Secondary, &mut warnings);
        let holders = match holders {
            Ok(rows) => Some(rows),
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "기관 보유 표 조회 실패");
                None
            }
        };

        let isin_hint = is_isin(&normalized).then_some(normalized.as_str());
        let record = merge(
            &symbol,
            isin_hint,
            primary.as_deref(),
            secondary.as_deref(),
            holders.as_deref().map(Vec::as_slice),
        );

        validate(&record, &warnings)?;

        info!(
            symbol = %record.symbol,
            name = %record.name,
            warnings = warnings.len(),
            "종목 통합 완료"
        );

        Ok(Reconciled { record, warnings })
    }

    /// 주요 정보. `reconcile`과 같습니다.
    pub async fn key_info(&self, query: &str) -> Result<Reconciled> {
        self.reconcile(query).await
    }

    /// 과거 시세 (캐시하지 않음).
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        query: &str,
        period: Period,
        interval: Interval,
    ) -> Result<HistoricalSeries> {
        let symbol = self.reconcile(query).await?.record.symbol;

        let series = with_timeout(
            self.options.primary_timeout,
            ProviderSource::Primary,
            self.primary.fetch_history(&symbol, period, interval),
        )
        .await
        .map_err(|e| unavailable(ProviderSource::Primary, e.to_string()))?;

        if series.is_empty() {
            return Err(unavailable(
                ProviderSource::Primary,
                format!("no price history for {} ({}, {})", symbol, period, interval),
            ));
        }
        Ok(series)
    }

    /// 섹터 비중. 2차 소스 우선, 없으면 1차 소스 섹터 비중.
    #[instrument(skip(self))]
    pub async fn sector_weights(&self, query: &str) -> Result<HoldingsBreakdown> {
        let symbol = self.reconcile(query).await?.record.symbol;

        if let Ok(secondary) = self.secondary_data(&symbol).await {
            if let Some(holdings) = &secondary.holdings {
                let breakdown = build_breakdown(BreakdownDimension::Sector, &holdings.sectors);
                if !breakdown.is_empty() {
                    return Ok(breakdown);
                }
            }
        }

        if let Ok(primary) = self.primary_info(&symbol).await {
            let breakdown = build_breakdown(BreakdownDimension::Sector, &primary.sector_weightings);
            if !breakdown.is_empty() {
                debug!(symbol = %symbol, "1차 소스 섹터 비중 사용");
                return Ok(breakdown);
            }
        }

        Err(unavailable(
            ProviderSource::Secondary,
            format!("no sector breakdown for {}", symbol),
        ))
    }

    /// 국가 비중 (2차 소스).
    #[instrument(skip(self))]
    pub async fn country_weights(&self, query: &str) -> Result<HoldingsBreakdown> {
        let symbol = self.reconcile(query).await?.record.symbol;

        let secondary = self
            .secondary_data(&symbol)
            .await
            .map_err(|e| unavailable(ProviderSource::Secondary, e.to_string()))?;

        let breakdown = secondary
            .holdings
            .as_ref()
            .map(|h| build_breakdown(BreakdownDimension::Country, &h.countries))
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                unavailable(
                    ProviderSource::Secondary,
                    format!("no country breakdown for {}", symbol),
                )
            })?;
        Ok(breakdown)
    }

    /// 배당 내역과 요약.
    #[instrument(skip(self))]
    pub async fn dividends(&self, query: &str) -> Result<(DividendSeries, DividendSummary)> {
        let symbol = self.reconcile(query).await?.record.symbol;

        let series = self
            .dividend_series(&symbol)
            .await
            .map_err(|e| unavailable(ProviderSource::Primary, e.to_string()))?;

        if series.is_empty() {
            return Err(unavailable(
                ProviderSource::Primary,
                format!("no dividend history for {}", symbol),
            ));
        }

        let summary = summarize_dividends(&series);
        Ok((DividendSeries::clone(&series), summary))
    }

    /// 상위 보유 종목. 2차 소스 우선, 없으면 1차 소스.
    #[instrument(skip(self))]
    pub async fn top_holdings(&self, query: &str) -> Result<TopHoldingsView> {
        let symbol = self.reconcile(query).await?.record.symbol;

        if let Ok(secondary) = self.secondary_data(&symbol).await {
            if let Some(holdings) = &secondary.holdings {
                let view = build_top_holdings(&holdings.top_holdings, holdings.holdings_count);
                if view.top_n() > 0 {
                    return Ok(view);
                }
            }
        }

        if let Ok(primary) = self.primary_info(&symbol).await {
            let view = build_top_holdings(&primary.top_holdings, None);
            if view.top_n() > 0 {
                debug!(symbol = %symbol, "1차 소스 보유 종목 사용");
                return Ok(view);
            }
        }

        Err(unavailable(
            ProviderSource::Secondary,
            format!("no holdings for {}", symbol),
        ))
    }

    /// 최근 뉴스.
    #[instrument(skip(self))]
    pub async fn news(&self, query: &str) -> Result<Vec<NewsItem>> {
        let symbol = self.reconcile(query).await?.record.symbol;

        let raw = self
            .raw_news(&symbol)
            .await
            .map_err(|e| unavailable(ProviderSource::Primary, e.to_string()))?;

        let items = to_news_items(&raw, &self.options.news_date_format);
        if items.is_empty() {
            return Err(unavailable(
                ProviderSource::Primary,
                format!("no news for {}", symbol),
            ));
        }
        Ok(items)
    }
}

/// 소스 실패를 경고로 기록하고 `None`으로 대체합니다.
fn absorb<T>(
    result: Result<T>,
    source: ProviderSource,
    warnings: &mut Vec<ProviderWarning>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            if error.is_not_found() {
                debug!(source = %source, error = %error, "소스에 종목 없음");
            } else {
                warn!(source = %source, error = %error, "소스 조회 실패, 나머지 소스로 진행");
            }
            warnings.push(ProviderWarning { source, error });
            None
        }
    }
}

/// 기관 보유 표의 총보수 행을 퍼센트로 변환합니다.
///
/// 항목명이 정확히 `"Expense Ratio (net)"`인 행만 사용합니다.
fn expense_ratio_from_holders(rows: &[HolderRow]) -> Option<Decimal> {
    let row = rows.iter().find(|r| r.label == EXPENSE_RATIO_LABEL)?;
    let parsed = parse_percent(&row.value);
    if parsed.is_none() {
        warn!(value = %row.value, "총보수 행 형식 불일치, 다른 값 사용");
    }
    parsed.filter(|d| !d.is_zero())
}

/// 필드별 우선순위로 레코드를 병합합니다.
fn merge(
    symbol: &str,
    isin_hint: Option<&str>,
    primary: Option<&RawPrimaryData>,
    secondary: Option<&RawSecondaryData>,
    holders: Option<&[HolderRow]>,
) -> TickerRecord {
    let fund = secondary.map(|s| &s.fund);
    let daily = secondary.and_then(|s| s.daily.as_ref());

    let quote_type = primary
        .and_then(|p| p.quote_type.clone())
        .or_else(|| secondary.map(|_| ETF_QUOTE_TYPE.to_string()));
    let is_etf = quote_type
        .as_deref()
        .is_some_and(|q| q.eq_ignore_ascii_case(ETF_QUOTE_TYPE));

    let price = non_zero(primary.and_then(|p| p.price))
        .or_else(|| non_zero(daily.and_then(|d| d.nav)))
        .and_then(round_decimal_from_f64);
    let ma200 = non_zero(primary.and_then(|p| p.ma200)).and_then(round_decimal_from_f64);
    let delta_ma200 = match (price, ma200) {
        (Some(price), Some(ma200)) => Some((price - ma200).round_dp(2)),
        _ => None,
    };

    let expense_ratio = holders
        .and_then(expense_ratio_from_holders)
        .or_else(|| {
            non_zero(primary.and_then(|p| p.expense_ratio_fraction)).and_then(fraction_to_pct_dp2)
        })
        .or_else(|| non_zero(fund.and_then(|f| f.expense_ratio_fraction)).and_then(fraction_to_pct_dp2));

    let dividend_yield = non_zero(primary.and_then(|p| p.yield_fraction))
        .or_else(|| non_zero(fund.and_then(|f| f.dividend_yield_fraction)))
        .and_then(fraction_to_pct_dp2);

    let total_assets = non_zero(primary.and_then(|p| p.total_assets))
        .or_else(|| non_zero(daily.and_then(|d| d.aum)))
        .filter(|v| *v > 0.0)
        .map(|v| v.round() as u64);

    TickerRecord {
        symbol: symbol.to_string(),
        isin: fund
            .and_then(|f| f.isin.clone())
            .or_else(|| isin_hint.map(str::to_string)),
        name: primary
            .and_then(|p| p.long_name.clone())
            .or_else(|| fund.and_then(|f| f.label.clone()))
            .unwrap_or_default(),
        description: primary
            .and_then(|p| p.summary.clone())
            .or_else(|| fund.and_then(|f| f.description.clone())),
        exposure: fund.and_then(|f| f.exposure.clone()),
        is_etf,
        quote_type,
        currency: primary
            .and_then(|p| p.currency.clone())
            .or_else(|| fund.and_then(|f| f.currency.clone()))
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        price,
        low_52w: non_zero(primary.and_then(|p| p.low_52w)).and_then(round_decimal_from_f64),
        high_52w: non_zero(primary.and_then(|p| p.high_52w)).and_then(round_decimal_from_f64),
        ma200,
        delta_ma200,
        expense_ratio,
        dividend_yield,
        total_assets,
        esg_grade: daily.and_then(|d| d.esg_grade.clone()),
        provider_page: secondary.and_then(|s| s.page_url.clone()),
    }
}

/// 레코드 유효성 검사.
///
/// 이름이 없으면 소스 실패가 모두 `NotFound`일 때 `NotFound`, 그 외에는
/// 첫 번째 실패 원인을 그대로 반환합니다.
fn validate(record: &TickerRecord, warnings: &[ProviderWarning]) -> Result<()> {
    if record.name.trim().is_empty() {
        if let Some(w) = warnings.iter().find(|w| !w.error.is_not_found()) {
            return Err(w.error.clone());
        }
        return Err(DataError::NotFound(record.symbol.clone()));
    }

    if !record.is_etf {
        return Err(DataError::InvalidAssetType {
            symbol: record.symbol.clone(),
            quote_type: record
                .quote_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        });
    }

    Ok(())
}
