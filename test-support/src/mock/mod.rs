//! Mock 实现模块
//!
//! 提供可编程的数据源实现，用于测试

pub mod fixtures;
pub mod proc_ops;

pub use proc_ops::MockProcOps;
