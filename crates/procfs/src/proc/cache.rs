//! 内容缓存
//!
//! 每个 Cached 叶子节点持有一个 [`CacheSlot`]。生成器在持有槽锁期间运行，
//! 因此同一个槽至多只有一次计算在进行，读者也不会看到写了一半的内容。
//! 生成失败（取消或超时）时槽保持原样。
//!
//! 等待槽锁的调用方轮询自己的取消令牌，不会因为别人的慢生成器而错过自己的截止时间。

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use sync::{SpinLock, SpinLockGuard};
use vfs::{CancelToken, FsError, Interrupt};

/// 缓存策略，按条目身份固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// 生成一次后保留，直到强制刷新或过期
    Cached,
    /// 每次访问都重新生成，从不保留
    AlwaysFresh,
}

struct CachedContent {
    content: Arc<str>,
    produced_at: Instant,
}

impl CachedContent {
    fn is_fresh(&self, ttl: Option<Duration>) -> bool {
        ttl.is_none_or(|ttl| self.produced_at.elapsed() < ttl)
    }
}

/// 单个节点的缓存槽
#[derive(Default)]
pub struct CacheSlot {
    inner: SpinLock<Option<CachedContent>>,
}

impl CacheSlot {
    /// 创建空缓存槽
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得缓存内容，必要时调用 `produce` 重新生成
    ///
    /// - `refresh` 为真时跳过已有内容并用新结果替换
    /// - `ttl` 为 `Some` 时超过存活时间的内容视为过期
    /// - 等待槽锁期间 `cancel` 触发则返回对应错误
    pub fn get_or_produce<F>(
        &self,
        refresh: bool,
        ttl: Option<Duration>,
        cancel: &CancelToken,
        produce: F,
    ) -> Result<Arc<str>, FsError>
    where
        F: FnOnce() -> Result<String, FsError>,
    {
        let mut slot = self.lock(cancel)?;

        if !refresh {
            if let Some(cached) = slot.as_ref().filter(|c| c.is_fresh(ttl)) {
                debug!("procfs: cache hit");
                return Ok(cached.content.clone());
            }
        }

        debug!("procfs: cache miss (refresh={})", refresh);
        let content: Arc<str> = Arc::from(produce()?);
        *slot = Some(CachedContent {
            content: content.clone(),
            produced_at: Instant::now(),
        });
        Ok(content)
    }

    fn lock(
        &self,
        cancel: &CancelToken,
    ) -> Result<SpinLockGuard<'_, Option<CachedContent>>, Interrupt> {
        loop {
            if let Some(guard) = self.inner.try_lock() {
                // 拿到锁时截止时间可能已经过去
                cancel.check()?;
                return Ok(guard);
            }
            cancel.check()?;
            thread::yield_now();
        }
    }
}
