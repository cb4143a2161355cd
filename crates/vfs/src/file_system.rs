//! 文件系统抽象

use std::sync::Arc;

use crate::Inode;

/// 文件系统 trait
///
/// 所有文件系统实现都必须实现此 trait
pub trait FileSystem: Send + Sync {
    /// 文件系统类型名称
    fn fs_type(&self) -> &'static str;

    /// 获取根 inode
    fn root_inode(&self) -> Arc<dyn Inode>;
}
