//! 操作上下文
//!
//! 每次 list/read 调用都携带一个 [`OpContext`]，显式传递原本属于"环境"的信息：
//!
//! - 调用方进程号（`self` 别名据此解析）
//! - 取消令牌 [`CancelToken`]（可选的取消标志和截止时间）
//! - 是否强制刷新缓存
//!
//! 不设置取消令牌时，所有操作都同步执行到结束。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// 中断原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// 调用方显式取消
    Cancelled,
    /// 截止时间已过
    TimedOut,
}

/// 取消令牌
///
/// 克隆出的令牌共享同一个取消标志，任意一方调用 [`CancelToken::cancel`] 后所有副本都可见。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// 永不触发的令牌
    pub fn none() -> Self {
        Self::default()
    }

    /// 可被显式取消的令牌
    pub fn new() -> Self {
        Self {
            flag: Some(Arc::new(AtomicBool::new(false))),
            deadline: None,
        }
    }

    /// 设置绝对截止时间
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 从现在起经过 `timeout` 后超时
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// 取消所有共享此标志的令牌
    ///
    /// 对 [`CancelToken::none`] 创建的令牌没有效果。
    pub fn cancel(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::Release);
        }
    }

    /// 检查点：已取消或超时则返回对应的中断原因
    pub fn check(&self) -> Result<(), Interrupt> {
        if let Some(flag) = &self.flag {
            if flag.load(Ordering::Acquire) {
                return Err(Interrupt::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Interrupt::TimedOut);
            }
        }
        Ok(())
    }
}

/// 单次 list/read 调用的上下文
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    caller_pid: Option<u32>,
    cancel: CancelToken,
    refresh: bool,
}

impl OpContext {
    /// 默认上下文：调用方身份由数据源决定，不可取消，不强制刷新
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定调用方进程号
    #[must_use]
    pub fn with_caller_pid(mut self, pid: u32) -> Self {
        self.caller_pid = Some(pid);
        self
    }

    /// 指定取消令牌
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 本次调用跳过缓存
    #[must_use]
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// 调用方进程号
    pub fn caller_pid(&self) -> Option<u32> {
        self.caller_pid
    }

    /// 取消令牌
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// 是否强制刷新
    pub fn refresh(&self) -> bool {
        self.refresh
    }

    /// 检查点，供长操作在每个阶段之间调用
    pub fn checkpoint(&self) -> Result<(), Interrupt> {
        self.cancel.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_token_never_triggers() {
        let token = CancelToken::none();
        token.cancel();
        assert!(token.check().is_ok());
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert_eq!(token.check(), Err(Interrupt::Cancelled));
    }

    #[test]
    fn expired_deadline_times_out() {
        let token = CancelToken::none().with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(token.check(), Err(Interrupt::TimedOut));
    }

    #[test]
    fn context_defaults() {
        let ctx = OpContext::new();
        assert_eq!(ctx.caller_pid(), None);
        assert!(!ctx.refresh());
        assert!(ctx.checkpoint().is_ok());

        let ctx = ctx.with_caller_pid(42).with_refresh(true);
        assert_eq!(ctx.caller_pid(), Some(42));
        assert!(ctx.refresh());
    }
}
