//! 自旋锁实现
//!
//! 基于原子操作实现自旋锁机制。宿主环境下临界区可能被抢占，
//! 因此自旋若干次仍未获取时让出时间片，避免持锁线程被饿死。
//!
//! `lock()` 会一直等到锁释放。临界区可能很长（例如持锁刷新宿主快照）而调用方
//! 又有截止时间时，应改用 `try_lock()` 循环并在每轮检查自己的取消条件。

use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use lock_api::{GuardSend, RawMutex};

/// 让出时间片之前的自旋次数
const SPIN_LIMIT: u32 = 64;

/// 原始自旋锁，实现 [`lock_api::RawMutex`]。
///
/// 不可重入 (即不能嵌套调用 `lock()`)。
#[derive(Debug)]
pub struct RawSpinLock {
    lock: AtomicBool,
}

impl RawSpinLock {
    /// 创建一个新的 RawSpinLock 实例。
    pub const fn new() -> Self {
        RawSpinLock {
            lock: AtomicBool::new(false),
        }
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: 获取成功时 compare_exchange 使用 Acquire，释放时使用 Release，
// 同一时刻至多一个持有者。
unsafe impl RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: RawSpinLock = RawSpinLock::new();

    type GuardMarker = GuardSend;

    fn lock(&self) {
        let mut spins = 0u32;
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // 只读等待，减少缓存行争用
            while self.lock.load(Ordering::Relaxed) {
                if spins < SPIN_LIMIT {
                    spins += 1;
                    hint::spin_loop();
                } else {
                    thread::yield_now();
                }
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.lock.load(Ordering::Relaxed)
    }
}
