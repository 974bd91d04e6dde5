//! CLI 명령어 구현 모듈.
//!
//! 각 명령은 `Screener`로 데이터를 조회하고 표 또는 JSON 문자열로 변환합니다.
//! 변환 함수는 출력 없이 문자열만 만들어 테스트할 수 있습니다.

pub mod dividends;
pub mod history;
pub mod holdings;
pub mod info;
pub mod news;

use std::str::FromStr;

use anyhow::Result;
use screener_data::{DataError, Result as DataResult};
use serde::Serialize;
use tracing::warn;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: table, json", s)),
        }
    }
}

/// JSON 문자열 변환.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// 구분선이 있는 섹션 제목.
pub fn section_title(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.chars().count().max(40)))
}

/// 글자 수 기준으로 자르고 말줄임표를 붙입니다.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// 일부 데이터 누락은 `None`으로 바꾸고 나머지 오류는 그대로 반환합니다.
///
/// 여러 섹션을 한 번에 출력할 때 비어 있는 섹션만 건너뛰기 위해 사용합니다.
pub fn optional_section<T>(result: DataResult<T>) -> DataResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ DataError::PartialDataUnavailable { .. }) => {
            warn!(error = %e, "Section skipped");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
