//! Inode 抽象层 - 只读节点接口
//!
//! 该模块定义了命名空间中节点的统一接口。节点内容与子项都是按需生成的，
//! 因此每个读取类方法都接收一个 [`OpContext`]，由它携带调用方身份、取消令牌与刷新标志。
//!
//! 命名空间只读：接口中不存在任何写入、创建或删除操作。

use std::any::Any;
use std::sync::Arc;

use crate::{FsError, OpContext};

/// 文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InodeType {
    /// 普通文件（叶子节点）
    File,
    /// 目录
    Directory,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 文件权限和类型（与 POSIX 兼容）
    pub struct FileMode: u32 {
        // 文件类型掩码
        /// 文件类型掩码
        const S_IFMT   = 0o170000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 目录
        const S_IFDIR  = 0o040000;

        // 用户权限
        /// 用户读
        const S_IRUSR  = 0o400;
        /// 用户写
        const S_IWUSR  = 0o200;
        /// 用户执行
        const S_IXUSR  = 0o100;

        // 组权限
        /// 组读
        const S_IRGRP  = 0o040;
        /// 组写
        const S_IWGRP  = 0o020;
        /// 组执行
        const S_IXGRP  = 0o010;

        // 其他用户权限
        /// 其他读
        const S_IROTH  = 0o004;
        /// 其他写
        const S_IWOTH  = 0o002;
        /// 其他执行
        const S_IXOTH  = 0o001;
    }
}

impl FileMode {
    /// 只读普通文件 (`0o444`)
    pub fn read_only_file() -> Self {
        FileMode::S_IFREG | FileMode::S_IRUSR | FileMode::S_IRGRP | FileMode::S_IROTH
    }

    /// 只读目录 (`0o555`)
    pub fn read_only_dir() -> Self {
        FileMode::S_IFDIR
            | FileMode::S_IRUSR
            | FileMode::S_IXUSR
            | FileMode::S_IRGRP
            | FileMode::S_IXGRP
            | FileMode::S_IROTH
            | FileMode::S_IXOTH
    }

    /// 权限位（去掉类型位）
    pub fn permissions(&self) -> u32 {
        self.bits() & !FileMode::S_IFMT.bits()
    }

    /// 检查是否有读权限（只检查用户权限）
    pub fn can_read(&self) -> bool {
        self.contains(FileMode::S_IRUSR)
    }

    /// 检查是否有写权限
    pub fn can_write(&self) -> bool {
        self.contains(FileMode::S_IWUSR)
    }

    /// 检查是否有执行权限
    pub fn can_execute(&self) -> bool {
        self.contains(FileMode::S_IXUSR)
    }
}

/// 轻量级目录项（readdir 返回）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// 文件名
    pub name: String,
    /// Inode 编号
    pub inode_no: usize,
    /// 文件类型
    pub inode_type: InodeType,
}

/// 文件元数据
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    /// Inode 编号
    pub inode_no: usize,
    /// 文件类型
    pub inode_type: InodeType,
    /// 权限位
    pub mode: FileMode,
    /// 文件大小（字节），内容按需生成的节点报告 0
    pub size: usize,
    /// 硬链接数
    pub nlinks: usize,
}

/// 只读节点接口
pub trait Inode: Send + Sync + Any {
    /// 获取文件元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 生成叶子节点的完整内容
    ///
    /// 目录返回 [`FsError::IsDirectory`]。
    fn read_all(&self, ctx: &OpContext) -> Result<String, FsError>;

    /// 在目录中查找子项
    ///
    /// 叶子节点返回 [`FsError::NotDirectory`]。
    fn lookup(&self, name: &str, ctx: &OpContext) -> Result<Arc<dyn Inode>, FsError>;

    /// 列出目录内容
    ///
    /// 返回的目录项不包含 `.` 与 `..`。
    fn readdir(&self, ctx: &OpContext) -> Result<Vec<DirEntry>, FsError>;

    /// 从根开始的完整路径，仅用于诊断
    fn full_path(&self) -> String;

    /// 向下转型为 &dyn Any，用于支持 downcast
    fn as_any(&self) -> &dyn Any;
}

/// 为 `dyn Inode` 提供向下转型辅助方法
impl dyn Inode {
    /// 尝试获取具体类型的引用
    pub fn downcast_ref<T: Inode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
