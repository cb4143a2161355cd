//! VFS 错误类型
//!
//! 定义了与 POSIX 兼容的文件系统错误码，可通过 [`FsError::to_errno()`] 转换为系统调用错误码。
//!
//! 命名空间是只读的，因此这里只保留路径解析与读取过程中可能出现的错误。
//! 数据源无法提供某项数据并不属于这里的错误，它由上层渲染为占位内容。

use thiserror::Error;

use crate::context::Interrupt;

/// VFS 错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    // 文件/目录相关
    /// 文件不存在 (-ENOENT)
    #[error("no such file or directory")]
    NotFound,
    /// 文件已存在 (-EEXIST)
    #[error("file exists")]
    AlreadyExists,
    /// 不是目录 (-ENOTDIR)
    #[error("not a directory")]
    NotDirectory,
    /// 是目录 (-EISDIR)
    #[error("is a directory")]
    IsDirectory,

    // 调用方中断
    /// 操作被调用方取消 (-ECANCELED)
    #[error("operation canceled")]
    Cancelled,
    /// 超过调用方给定的截止时间 (-ETIMEDOUT)
    #[error("operation timed out")]
    TimedOut,
}

impl FsError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            FsError::NotFound => -2,
            FsError::AlreadyExists => -17,
            FsError::NotDirectory => -20,
            FsError::IsDirectory => -21,
            FsError::TimedOut => -110,
            FsError::Cancelled => -125,
        }
    }
}

impl From<Interrupt> for FsError {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::Cancelled => FsError::Cancelled,
            Interrupt::TimedOut => FsError::TimedOut,
        }
    }
}
