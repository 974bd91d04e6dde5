//! 키별 단일 조회(single-flight) 메모이제이션 캐시.
//!
//! 같은 키에 대한 첫 조회가 동시에 여러 번 들어와도 실제 조회는 한 번만
//! 수행되고, 나머지 호출은 그 결과를 기다렸다가 공유합니다. 서로 다른 키는
//! 독립적으로 병렬 조회됩니다.
//!
//! 실패 결과도 저장하므로 프로세스 수명 동안 키당 조회는 최대 한 번입니다.
//! 조회 future가 완료 전에 취소되면(예: 외부 타임아웃) 셀은 비어 있는 채로
//! 남고 다음 호출이 다시 조회합니다.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

use crate::error::Result;

type Cell<V> = Arc<OnceCell<Result<Arc<V>>>>;

/// 캐시 통계.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    /// 캐시 이름
    pub name: &'static str,
    /// 저장된 키 수
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// 키별 결과 메모이제이션 캐시.
pub struct MemoCache<V> {
    name: &'static str,
    cells: RwLock<HashMap<String, Cell<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> MemoCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cells: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 캐시된 결과 조회. 없거나 조회 중이면 `None`.
    pub async fn get(&self, key: &str) -> Option<Result<Arc<V>>> {
        let cells = self.cells.read().await;
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// 키에 대한 결과를 반환합니다. 처음 보는 키면 `fetch`로 조회 후 저장합니다.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let cell = self.get_or_create_cell(key).await;

        let mut fetched = false;
        let result = cell
            .get_or_init(|| {
                fetched = true;
                async move { fetch().await.map(Arc::new) }
            })
            .await
            .clone();

        if fetched {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(cache = self.name, key = %key, ok = result.is_ok(), "캐시 미스, 조회 결과 저장");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(cache = self.name, key = %key, "캐시 히트");
        }

        result
    }

    /// 저장된 키 수.
    pub async fn len(&self) -> usize {
        self.cells.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStats {
            name: self.name,
            entries: self.len().await,
            hits,
            misses,
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// 키에 해당하는 셀 획득 또는 생성.
    async fn get_or_create_cell(&self, key: &str) -> Cell<V> {
        let cells = self.cells.read().await;
        if let Some(cell) = cells.get(key) {
            return cell.clone();
        }
        drop(cells);

        let mut cells = self.cells.write().await;
        cells
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}
