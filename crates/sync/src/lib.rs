//! 同步原语
//!
//! 向其它模块提供基本的锁原语。自旋锁基于 [`lock_api`] 构建，
//! 用于保护临界区很短的共享状态（缓存槽、模拟数据源等）。

mod raw_spin_lock;
mod spin_lock;

pub use raw_spin_lock::*;
pub use spin_lock::*;
