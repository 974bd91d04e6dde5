//! Yahoo Finance 클라이언트 모의 서버 테스트.

use mockito::{Matcher, Server};
use rust_decimal_macros::dec;
use screener_core::{Interval, Period};
use screener_data::provider::{PrimaryProvider, YahooClient, EXPENSE_RATIO_LABEL};
use screener_data::DataError;

const VOO_SUMMARY: &str = r#"{
  "quoteSummary": {
    "result": [{
      "price": {
        "regularMarketPrice": {"raw": 480.25, "fmt": "480.25"},
        "currency": "USD",
        "longName": "Vanguard S&P 500 ETF",
        "quoteType": "ETF"
      },
      "summaryDetail": {
        "fiftyTwoWeekLow": {"raw": 380.0, "fmt": "380.00"},
        "fiftyTwoWeekHigh": {"raw": 490.5, "fmt": "490.50"},
        "twoHundredDayAverage": {"raw": 440.12, "fmt": "440.12"},
        "yield": {"raw": 0.0135, "fmt": "1.35%"},
        "totalAssets": {"raw": 1200000000000, "fmt": "1.2T"}
      },
      "quoteType": {"symbol": "VOO", "quoteType": "ETF", "longName": "Vanguard S&P 500 ETF"},
      "assetProfile": {"longBusinessSummary": "The fund employs an indexing investment approach."},
      "fundProfile": {
        "feesExpensesInvestment": {"annualReportExpenseRatio": {"raw": 0.0003, "fmt": "0.03%"}}
      },
      "topHoldings": {
        "holdings": [
          {"symbol": "MSFT", "holdingName": "Microsoft Corp", "holdingPercent": {"raw": 0.0712}},
          {"symbol": "AAPL", "holdingName": "Apple Inc", "holdingPercent": {"raw": 0.0689}}
        ],
        "sectorWeightings": [
          {"technology": {"raw": 0.2934}},
          {"realestate": {"raw": 0.0231}},
          {"energy": {}}
        ]
      },
      "defaultKeyStatistics": {}
    }],
    "error": null
  }
}"#;

const NOT_FOUND_SUMMARY: &str = r#"{
  "quoteSummary": {
    "result": null,
    "error": {"code": "Not Found", "description": "Quote not found for ticker symbol: XYZ"}
  }
}"#;

#[tokio::test]
async fn test_fetch_info_decodes_quote_summary() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v10/finance/quoteSummary/VOO")
        .match_query(Matcher::Regex("modules=".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VOO_SUMMARY)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let data = client.fetch_info("VOO").await.unwrap();

    mock.assert_async().await;
    assert_eq!(data.symbol, "VOO");
    assert_eq!(data.quote_type.as_deref(), Some("ETF"));
    assert_eq!(data.long_name.as_deref(), Some("Vanguard S&P 500 ETF"));
    assert_eq!(data.price, Some(480.25));
    assert_eq!(data.ma200, Some(440.12));
    assert_eq!(data.yield_fraction, Some(0.0135));
    assert_eq!(data.total_assets, Some(1.2e12));
    assert_eq!(data.expense_ratio_fraction, Some(0.0003));
    assert_eq!(data.top_holdings.len(), 2);
    // 값이 없는 섹터는 제외
    assert_eq!(data.sector_weightings.len(), 2);
}

#[tokio::test]
async fn test_fetch_info_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v10/finance/quoteSummary/XYZ")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(NOT_FOUND_SUMMARY)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let err = client.fetch_info("XYZ").await.unwrap_err();

    assert_eq!(err, DataError::NotFound("XYZ".to_string()));
}

#[tokio::test]
async fn test_fetch_info_malformed_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v10/finance/quoteSummary/VOO")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let err = client.fetch_info("VOO").await.unwrap_err();

    assert!(matches!(err, DataError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_ticker_path_characters_stay_in_one_segment() {
    let mut server = Server::new_async().await;
    let other_fund = server
        .mock("GET", "/v10/finance/quoteSummary/SPY")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(VOO_SUMMARY)
        .expect(0)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();

    assert!(client.fetch_info("VOO/../SPY").await.is_err());
    assert!(client.fetch_info("SPY?modules=price#").await.is_err());
    other_fund.assert_async().await;
}

#[tokio::test]
async fn test_rate_limited() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v10/finance/quoteSummary/VOO")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("Too Many Requests")
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let err = client.fetch_info("VOO").await.unwrap_err();

    assert!(matches!(err, DataError::RateLimited(_)));
}

#[tokio::test]
async fn test_fetch_history_skips_null_rows() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v8/finance/chart/VOO")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("range".into(), "1mo".into()),
            Matcher::UrlEncoded("interval".into(), "1d".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"chart": {"result": [{
                "meta": {"symbol": "VOO", "currency": "USD"},
                "timestamp": [1714570200, 1714656600, 1714743000],
                "indicators": {"quote": [{
                    "open": [460.1, null, 465.0],
                    "high": [462.0, null, 468.2],
                    "low": [458.3, null, 464.1],
                    "close": [461.5, null, 467.9],
                    "volume": [4200000, null, 3900000]
                }]}
            }], "error": null}}"#,
        )
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let series = client
        .fetch_history("VOO", Period::Mo1, Interval::D1)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(series.len(), 2);
    assert_eq!(series.x_axis_label(), "Date");
    assert_eq!(series.bars[1].volume, 3_900_000);
    assert_eq!(series.last_close(), Some(dec!(467.9)));
}

#[tokio::test]
async fn test_fetch_dividends_from_events() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/VOO")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("range".into(), "max".into()),
            Matcher::UrlEncoded("events".into(), "div".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"chart": {"result": [{
                "timestamp": [1703808000],
                "indicators": {"quote": [{"close": [436.8]}]},
                "events": {"dividends": {
                    "1703808000": {"amount": 1.8121, "date": 1703808000},
                    "1695945600": {"amount": 1.4874, "date": 1695945600}
                }}
            }], "error": null}}"#,
        )
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let series = client.fetch_dividends("VOO").await.unwrap();

    assert_eq!(series.len(), 2);
    let formatted = series.formatted("%d/%m/%Y");
    assert_eq!(formatted[0].0, "29/09/2023");
    assert_eq!(formatted[1].0, "29/12/2023");
}

#[tokio::test]
async fn test_fetch_institutional_holders_has_expense_row() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v10/finance/quoteSummary/VOO")
        .match_query(Matcher::UrlEncoded(
            "modules".into(),
            "fundProfile,institutionOwnership".into(),
        ))
        .with_status(200)
        .with_body(
            r#"{"quoteSummary": {"result": [{
                "fundProfile": {"feesExpensesInvestment": {
                    "annualReportExpenseRatio": {"raw": 0.0003, "fmt": "0.03%"}
                }},
                "institutionOwnership": {"ownershipList": [
                    {"organization": "Morgan Stanley", "pctHeld": {"raw": 0.0392, "fmt": "3.92%"}}
                ]}
            }], "error": null}}"#,
        )
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let rows = client.fetch_institutional_holders("VOO").await.unwrap();

    assert_eq!(rows[0].label, EXPENSE_RATIO_LABEL);
    assert_eq!(rows[0].value, "0.03%");
    assert_eq!(rows[1].label, "Morgan Stanley");
    assert_eq!(rows[1].value, "3.92%");
}

#[tokio::test]
async fn test_fetch_news() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/finance/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "VOO".into()),
            Matcher::UrlEncoded("newsCount".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"quotes": [], "news": [
                {"title": "S&P 500 hits record", "publisher": "Reuters", "link": "https://example.com/a", "providerPublishTime": 1700000000},
                {"title": "Missing time"},
                {"title": "ETF inflows surge", "providerPublishTime": 1700003600}
            ]}"#,
        )
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let news = client.fetch_news("VOO", 2).await.unwrap();

    assert_eq!(news.len(), 2);
    assert_eq!(news[0].publisher.as_deref(), Some("Reuters"));
    assert_eq!(news[1].title, "ETF inflows surge");
}

#[tokio::test]
async fn test_resolve_isin_via_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/finance/search")
        .match_query(Matcher::UrlEncoded("q".into(), "US9229083632".into()))
        .with_status(200)
        .with_body(r#"{"quotes": [{"symbol": "VOO"}], "news": []}"#)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    let symbol = client.resolve_symbol(" us9229083632 ").await.unwrap();

    mock.assert_async().await;
    assert_eq!(symbol, "VOO");
}

#[tokio::test]
async fn test_resolve_plain_ticker_without_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = YahooClient::with_base_url(server.url()).unwrap();
    assert_eq!(client.resolve_symbol("voo").await.unwrap(), "VOO");

    mock.assert_async().await;
}

#[tokio::test]
#[ignore] // 실제 네트워크 필요
async fn test_live_fetch_info() {
    let client = YahooClient::new().unwrap();
    let data = client.fetch_info("VOO").await.unwrap();
    assert_eq!(data.quote_type.as_deref(), Some("ETF"));
}
