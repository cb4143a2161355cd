//! # 文件系统模块 (FS)
//!
//! 本模块 re-export procfs crate 的内容，并提供以宿主数据源构建命名空间的入口。

mod ops_impl;

pub use ops_impl::HostOps;

use std::sync::Arc;

use log::info;
use procfs::{ProcFS, ProcFsConfig};
use vfs::FsError;

/// 以宿主数据源创建 ProcFS
pub fn init_procfs(config: ProcFsConfig) -> Result<Arc<ProcFS>, FsError> {
    let ops = Arc::new(HostOps::new());
    let fs = ProcFS::new(ops, config)?;
    info!("hostproc: procfs ready");
    Ok(fs)
}
