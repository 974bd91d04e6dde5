//! Provider 호출 결과 캐싱.
//!
//! - `MemoCache`: 키별 single-flight 메모이제이션 (성공/실패 모두 저장)
//! - `ProviderCache`: 엔드포인트별 캐시 묶음. `Screener`에 `Arc`로 주입됩니다.
//!
//! 무효화는 없습니다. 값은 프로세스 수명 동안 유지됩니다.
//! 과거 시세는 기간/간격 조합이 많아 캐시하지 않습니다.

mod memo;

pub use memo::{CacheStats, MemoCache};

use screener_core::DividendSeries;
use tracing::debug;

use crate::provider::{HolderRow, RawNews, RawPrimaryData, RawSecondaryData};

/// 엔드포인트별 캐시 묶음.
///
/// 1차 소스 캐시는 티커, 2차 소스 캐시는 심볼을 키로 사용합니다.
pub struct ProviderCache {
    /// 사용자 입력 → 티커 변환 결과
    pub symbols: MemoCache<String>,
    /// 1차 소스 메타데이터
    pub primary_info: MemoCache<RawPrimaryData>,
    /// 1차 소스 배당 내역
    pub dividends: MemoCache<DividendSeries>,
    /// 1차 소스 기관 보유 표
    pub holders: MemoCache<Vec<HolderRow>>,
    /// 1차 소스 뉴스
    pub news: MemoCache<Vec<RawNews>>,
    /// 2차 소스 펀드 데이터
    pub secondary: MemoCache<RawSecondaryData>,
}

impl ProviderCache {
    pub fn new() -> Self {
        Self {
            symbols: MemoCache::new("symbols"),
            primary_info: MemoCache::new("primary_info"),
            dividends: MemoCache::new("dividends"),
            holders: MemoCache::new("holders"),
            news: MemoCache::new("news"),
            secondary: MemoCache::new("secondary"),
        }
    }

    /// 캐시별 통계.
    pub async fn stats(&self) -> Vec<CacheStats> {
        let stats = vec![
            self.symbols.stats().await,
            self.primary_info.stats().await,
            self.dividends.stats().await,
            self.holders.stats().await,
            self.news.stats().await,
            self.secondary.stats().await,
        ];

        for s in &stats {
            debug!(
                cache = s.name,
                entries = s.entries,
                hits = s.hits,
                misses = s.misses,
                hit_rate = s.hit_rate,
                "캐시 통계"
            );
        }

        stats
    }
}

impl Default for ProviderCache {
    fn default() -> Self {
        Self::new()
    }
}
