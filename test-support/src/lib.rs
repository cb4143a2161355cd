//! 测试支持 crate
//!
//! 提供 Mock 数据源和测试工具

pub mod mock;

pub use mock::MockProcOps;
