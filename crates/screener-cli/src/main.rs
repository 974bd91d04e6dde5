//! ETF 스크리너 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 주요 정보
//! screener info VOO
//!
//! # ISIN으로 조회
//! screener info IE00B5BMR087
//!
//! # 6개월 일봉
//! screener history VOO --period 6mo --interval 1d
//!
//! # 전체 섹션을 JSON으로
//! screener --format json all VOO
//! ```

use clap::{Parser, Subcommand};
use screener_core::{init_logging, AppConfig, Interval, LogConfig, LogFormat, Period};
use screener_data::{DataError, Screener};
use serde_json::json;
use tracing::{error, info};

use screener_cli::commands::{
    dividends, format_json, history, holdings, info as info_cmd, news, optional_section,
    OutputFormat,
};

/// 배당 표에 표시할 최근 지급 건수.
const RECENT_DIVIDENDS: usize = 12;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "ETF screener - Yahoo Finance + TrackInsight", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    /// 로그 형식 (pretty, compact, json). 지정하지 않으면 설정 파일 값
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// 출력 형식 (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 주요 정보 (가격, 52주 범위, 보수, 배당수익률, 순자산)
    Info {
        /// 티커 또는 ISIN (예: VOO, IE00B5BMR087)
        ticker: String,
    },

    /// 과거 시세
    History {
        /// 티커 또는 ISIN
        ticker: String,

        /// 조회 기간 (1d, 5d, 1mo, 3mo, 6mo, ytd, 1y, 2y, 5y, 10y, max)
        #[arg(short, long, default_value = "10y")]
        period: String,

        /// 캔들 간격 (1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo)
        #[arg(short, long, default_value = "1d")]
        interval: String,
    },

    /// 섹터 비중
    Sectors {
        /// 티커 또는 ISIN
        ticker: String,
    },

    /// 국가 비중
    Countries {
        /// 티커 또는 ISIN
        ticker: String,
    },

    /// 배당 요약 및 내역
    Dividends {
        /// 티커 또는 ISIN
        ticker: String,
    },

    /// 상위 보유 종목
    Holdings {
        /// 티커 또는 ISIN
        ticker: String,
    },

    /// 최근 뉴스
    News {
        /// 티커 또는 ISIN
        ticker: String,
    },

    /// 전체 섹션 (데이터가 없는 섹션은 건너뜀)
    All {
        /// 티커 또는 ISIN
        ticker: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        match e.downcast_ref::<DataError>() {
            Some(data_error) => {
                error!(error = %data_error, "Command failed");
                eprintln!("{}", data_error.user_message());
            }
            None => {
                error!(error = %e, "Command failed");
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;

    let mut log_config = LogConfig::from_config(&config.logging);
    if let Some(format) = &cli.log_format {
        let format: LogFormat = format.parse().map_err(anyhow::Error::msg)?;
        log_config = log_config.with_format(format);
    }
    init_logging(log_config)?;

    let output: OutputFormat = cli.format.parse()?;
    let screener = Screener::from_config(&config)?;

    info!(config = %cli.config, "Screener ready");

    match cli.command {
        Commands::Info { ticker } => {
            let reconciled = screener.key_info(&ticker).await?;
            if let Some(partial) = reconciled.partial_error() {
                eprintln!("{}", partial.user_message());
            }
            match output {
                OutputFormat::Table => print!("{}", info_cmd::format_table(&reconciled.record)),
                OutputFormat::Json => println!("{}", format_json(&reconciled.record)?),
            }
        }

        Commands::History {
            ticker,
            period,
            interval,
        } => {
            let period: Period = period.parse()?;
            let interval: Interval = interval.parse()?;

            let series = screener.history(&ticker, period, interval).await?;
            match output {
                OutputFormat::Table => print!("{}", history::format_table(&series)),
                OutputFormat::Json => println!("{}", format_json(&series)?),
            }
        }

        Commands::Sectors { ticker } => {
            let breakdown = screener.sector_weights(&ticker).await?;
            match output {
                OutputFormat::Table => print!("{}", holdings::format_breakdown(&breakdown)),
                OutputFormat::Json => println!("{}", format_json(&breakdown)?),
            }
        }

        Commands::Countries { ticker } => {
            let breakdown = screener.country_weights(&ticker).await?;
            match output {
                OutputFormat::Table => print!("{}", holdings::format_breakdown(&breakdown)),
                OutputFormat::Json => println!("{}", format_json(&breakdown)?),
            }
        }

        Commands::Dividends { ticker } => {
            let (series, summary) = screener.dividends(&ticker).await?;
            match output {
                OutputFormat::Table => print!(
                    "{}",
                    dividends::format_table(
                        &series,
                        &summary,
                        &config.display.date_format,
                        RECENT_DIVIDENDS
                    )
                ),
                OutputFormat::Json => println!(
                    "{}",
                    format_json(&json!({ "payments": series, "summary": summary }))?
                ),
            }
        }

        Commands::Holdings { ticker } => {
            let view = screener.top_holdings(&ticker).await?;
            match output {
                OutputFormat::Table => print!("{}", holdings::format_top_holdings(&view)),
                OutputFormat::Json => println!("{}", format_json(&view)?),
            }
        }

        Commands::News { ticker } => {
            let items = screener.news(&ticker).await?;
            match output {
                OutputFormat::Table => print!("{}", news::format_table(&items)),
                OutputFormat::Json => println!("{}", format_json(&items)?),
            }
        }

        Commands::All { ticker } => {
            let reconciled = screener.key_info(&ticker).await?;
            if let Some(partial) = reconciled.partial_error() {
                eprintln!("{}", partial.user_message());
            }

            let sectors = optional_section(screener.sector_weights(&ticker).await)?;
            let countries = optional_section(screener.country_weights(&ticker).await)?;
            let top = optional_section(screener.top_holdings(&ticker).await)?;
            let divs = optional_section(screener.dividends(&ticker).await)?;
            let headlines = optional_section(screener.news(&ticker).await)?;

            match output {
                OutputFormat::Table => {
                    print!("{}", info_cmd::format_table(&reconciled.record));
                    if let Some(breakdown) = &sectors {
                        print!("\n{}", holdings::format_breakdown(breakdown));
                    }
                    if let Some(breakdown) = &countries {
                        print!("\n{}", holdings::format_breakdown(breakdown));
                    }
                    if let Some(view) = &top {
                        print!("\n{}", holdings::format_top_holdings(view));
                    }
                    if let Some((series, summary)) = &divs {
                        print!(
                            "\n{}",
                            dividends::format_table(
                                series,
                                summary,
                                &config.display.date_format,
                                RECENT_DIVIDENDS
                            )
                        );
                    }
                    if let Some(items) = &headlines {
                        print!("\n{}", news::format_table(items));
                    }
                }
                OutputFormat::Json => {
                    let dividends_json = divs
                        .as_ref()
                        .map(|(series, summary)| json!({ "payments": series, "summary": summary }));
                    println!(
                        "{}",
                        format_json(&json!({
                            "info": reconciled.record,
                            "sectors": sectors,
                            "countries": countries,
                            "top_holdings": top,
                            "dividends": dividends_json,
                            "news": headlines,
                        }))?
                    );
                }
            }
        }
    }

    for stats in screener.cache_stats().await {
        info!(
            cache = stats.name,
            entries = stats.entries,
            hits = stats.hits,
            misses = stats.misses,
            "Cache statistics"
        );
    }

    Ok(())
}
