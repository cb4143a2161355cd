//! ProcFS - 进程信息伪文件系统
//!
//! 该模块提供一个与 **Linux /proc 兼容的只读命名空间**，内容在读取时由数据源生成。
//!
//! - [`entry`]: 条目身份键与固定树布局
//! - [`cache`]: 按条目策略保留生成结果
//! - [`generators`]: 把数据源记录渲染为文本
//! - `process`: 按需构建的进程目录

pub mod cache;
pub mod entry;
pub mod generators;
pub mod inode;
pub mod proc;

mod process;

pub use cache::{CachePolicy, CacheSlot};
pub use entry::{Layout, PROCESS_LAYOUT, ProcEntry, ROOT_LAYOUT};
pub use generators::{ContentGenerator, GenContext};
pub use inode::{ProcInode, ProcInodeContent};
pub use proc::ProcFS;
