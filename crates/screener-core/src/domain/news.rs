//! 종목 관련 뉴스.

use serde::{Deserialize, Serialize};

/// 뉴스 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// 게시 시각 (표시 형식으로 변환됨)
    pub published: String,
    /// 제목
    pub title: String,
    /// 언론사
    pub publisher: Option<String>,
    /// 원문 링크
    pub link: Option<String>,
}
