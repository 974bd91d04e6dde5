//! TrackInsight 클라이언트 모의 서버 테스트.

use chrono::NaiveDate;
use mockito::Server;
use screener_data::provider::{SecondaryProvider, TrackInsightClient};
use screener_data::DataError;

const VOO_FUND: &str = r#"{
  "ticker": "VOO",
  "label": "Vanguard S&P 500 ETF",
  "description": "Tracks the performance of the S&P 500 Index.",
  "exposure": "Equity, U.S., Large Cap",
  "isin": "US9229083632",
  "currency": "USD",
  "expenseRatio": 0.0003,
  "dividendYield": 0.0131
}"#;

const VOO_HOLDINGS: &str = r#"{
  "sectors": [
    {"name": "technology", "weight": 0.2934, "count": 68},
    {"name": "financial_services", "weight": 0.1301, "count": 72}
  ],
  "countries": [
    {"name": "united_states", "weight": 0.9952, "count": 500},
    {"name": "ireland", "weight": 0.0048, "count": 3}
  ],
  "topHoldings": [
    {"name": "Microsoft Corp", "weight": 0.0712},
    {"name": "Apple Inc", "weight": 0.0689}
  ],
  "holdingsCount": 504
}"#;

const VOO_DAILY: &str = r#"{
  "date": "2024-05-17",
  "nav": 487.31,
  "aum": 1.02e12,
  "esgGrade": "A"
}"#;

#[tokio::test]
async fn test_fetch_combines_three_endpoints() {
    let mut server = Server::new_async().await;
    let fund = server
        .mock("GET", "/funds/VOO")
        .with_status(200)
        .with_body(VOO_FUND)
        .create_async()
        .await;
    let holdings = server
        .mock("GET", "/funds/VOO/holdings")
        .with_status(200)
        .with_body(VOO_HOLDINGS)
        .create_async()
        .await;
    let daily = server
        .mock("GET", "/funds/VOO/daily")
        .with_status(200)
        .with_body(VOO_DAILY)
        .create_async()
        .await;

    let client = TrackInsightClient::with_base_url(server.url()).unwrap();
    let data = client.fetch("VOO").await.unwrap();

    fund.assert_async().await;
    holdings.assert_async().await;
    daily.assert_async().await;

    assert_eq!(data.fund.label.as_deref(), Some("Vanguard S&P 500 ETF"));
    assert_eq!(data.fund.isin.as_deref(), Some("US9229083632"));
    assert_eq!(data.fund.expense_ratio_fraction, Some(0.0003));

    let holdings = data.holdings.unwrap();
    assert_eq!(holdings.sectors.len(), 2);
    assert_eq!(holdings.countries[0].label, "united_states");
    assert_eq!(holdings.top_holdings[0].name, "Microsoft Corp");
    assert_eq!(holdings.holdings_count, Some(504));

    let daily = data.daily.unwrap();
    assert_eq!(daily.date, NaiveDate::from_ymd_opt(2024, 5, 17));
    assert_eq!(daily.nav, Some(487.31));
    assert_eq!(daily.esg_grade.as_deref(), Some("A"));

    assert_eq!(
        data.page_url.as_deref(),
        Some("https://www.trackinsight.com/en/fund/VOO")
    );
}

#[tokio::test]
async fn test_missing_fund_is_not_found() {
    let mut server = Server::new_async().await;
    let _fund = server
        .mock("GET", "/funds/XYZ")
        .with_status(404)
        .create_async()
        .await;
    let _holdings = server
        .mock("GET", "/funds/XYZ/holdings")
        .with_status(404)
        .create_async()
        .await;
    let _daily = server
        .mock("GET", "/funds/XYZ/daily")
        .with_status(404)
        .create_async()
        .await;

    let client = TrackInsightClient::with_base_url(server.url()).unwrap();
    let err = client.fetch("XYZ").await.unwrap_err();

    assert_eq!(err, DataError::NotFound("XYZ".to_string()));
}

#[tokio::test]
async fn test_empty_fund_record_is_not_found() {
    let mut server = Server::new_async().await;
    let _fund = server
        .mock("GET", "/funds/XYZ")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _holdings = server
        .mock("GET", "/funds/XYZ/holdings")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;
    let _daily = server
        .mock("GET", "/funds/XYZ/daily")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let client = TrackInsightClient::with_base_url(server.url()).unwrap();
    assert!(client.fetch("XYZ").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_holdings_and_daily_failures_degrade() {
    let mut server = Server::new_async().await;
    let _fund = server
        .mock("GET", "/funds/VOO")
        .with_status(200)
        .with_body(VOO_FUND)
        .create_async()
        .await;
    let _holdings = server
        .mock("GET", "/funds/VOO/holdings")
        .with_status(503)
        .create_async()
        .await;
    let _daily = server
        .mock("GET", "/funds/VOO/daily")
        .with_status(200)
        .with_body(r#"{"nav": "not a number"}"#)
        .create_async()
        .await;

    let client = TrackInsightClient::with_base_url(server.url()).unwrap();
    let data = client.fetch("VOO").await.unwrap();

    assert_eq!(data.fund.symbol, "VOO");
    assert!(data.holdings.is_none());
    assert!(data.daily.is_none());
}

#[tokio::test]
async fn test_fund_server_error_is_fetch_error() {
    let mut server = Server::new_async().await;
    let _fund = server
        .mock("GET", "/funds/VOO")
        .with_status(500)
        .create_async()
        .await;
    let _holdings = server
        .mock("GET", "/funds/VOO/holdings")
        .with_status(500)
        .create_async()
        .await;
    let _daily = server
        .mock("GET", "/funds/VOO/daily")
        .with_status(500)
        .create_async()
        .await;

    let client = TrackInsightClient::with_base_url(server.url()).unwrap();
    let err = client.fetch("VOO").await.unwrap_err();

    assert!(matches!(err, DataError::FetchError(_)));
}

#[tokio::test]
async fn test_ticker_path_characters_stay_in_one_segment() {
    let mut server = Server::new_async().await;
    let mut other_fund = Vec::new();
    for path in ["/funds/SPY", "/funds/SPY/holdings", "/funds/SPY/daily"] {
        other_fund.push(
            server
                .mock("GET", path)
                .with_status(200)
                .with_body(VOO_FUND)
                .expect(0)
                .create_async()
                .await,
        );
    }

    let client = TrackInsightClient::with_base_url(server.url()).unwrap();

    assert!(client.fetch("VOO/../SPY").await.is_err());
    for mock in &other_fund {
        mock.assert_async().await;
    }
}

#[tokio::test]
#[ignore] // 실제 네트워크 필요
async fn test_live_fetch() {
    let client = TrackInsightClient::new().unwrap();
    let data = client.fetch("VOO").await.unwrap();
    assert!(data.fund.label.is_some());
}
