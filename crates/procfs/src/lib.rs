//! # ProcFS
//!
//! 在没有原生 `/proc` 的宿主上提供一个与 Linux `/proc` 布局兼容的只读命名空间。
//!
//! 命名空间的内容全部来自一个注入的数据源 [`ProcOps`]：
//!
//! ```ignore
//! let fs = ProcFS::new(Arc::new(my_ops), ProcFsConfig::default())?;
//! for entry in fs.list("/")? {
//!     println!("{}", entry.name);
//! }
//! let meminfo = fs.read("/meminfo")?;
//! ```
//!
//! 数据源无法提供的数据在内容中降级为占位值，只有取消与超时会让读取失败。

#![doc = "进程信息伪文件系统"]

pub mod config;
pub mod ops;
pub mod proc;

pub use config::ProcFsConfig;
pub use ops::{
    ArpEntry, ArpFlags, CpuInfo, CpuTimes, DeviceKind, DeviceMajor, DriverInfo, FilesystemType,
    KernelStats, LoadAverage, MemInfo, MemoryAreaInfo, MountInfo, NetAdapter, OsInfo,
    PartitionInfo, ProcOps, RouteEntry, RouteFlags, SocketEntry, SocketProto, SwapInfo, TaskInfo,
    TaskState, TcpState, Unavailable, Uptime, VmStats,
};
pub use proc::{ContentGenerator, ProcEntry, ProcFS, ProcInode, ProcInodeContent};
