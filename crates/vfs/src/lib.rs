//! 只读虚拟文件系统层
//!
//! 此 crate 提供按需生成内容的只读命名空间抽象，包括：
//!
//! - [`Inode`] trait - 只读节点接口
//! - [`FileSystem`] trait - 文件系统接口
//! - [`OpContext`] / [`CancelToken`] - 单次调用的上下文与取消
//! - 路径解析引擎
//! - 设备号编解码与标准 major 表

#![allow(clippy::module_inception)]

pub mod context;
pub mod dev;
pub mod error;

mod devno;
mod file_system;
mod inode;
mod path;

// Re-export error
pub use error::FsError;

// Re-export context
pub use context::{CancelToken, Interrupt, OpContext};

// Re-export dev
pub use dev::{major, makedev, minor};

// Re-export inode
pub use inode::{DirEntry, FileMode, Inode, InodeMetadata, InodeType};

// Re-export file_system
pub use file_system::FileSystem;

// Re-export path
pub use path::{PathComponent, parse_path, vfs_lookup_from};

// Re-export devno
pub use devno::{BLKDEV_NAMES, CHRDEV_NAMES, blkdev_major, chrdev_major, scsi_disk_devno};
