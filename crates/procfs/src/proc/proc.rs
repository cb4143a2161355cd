//! Procfs 文件系统实现

use std::sync::Arc;

use log::{debug, info};
use vfs::{DirEntry, FileSystem, FsError, Inode, InodeType, OpContext, vfs_lookup_from};

use crate::config::ProcFsConfig;
use crate::ops::ProcOps;
use crate::proc::ProcInode;
use crate::proc::entry::{FIXED_LEAVES, Layout, ROOT_LAYOUT};
use crate::proc::inode::ProcBackend;

/// ProcFS 文件系统对象（提供 `/proc` 目录树）
///
/// 固定树在构造时一次建好，此后不再变化，可以在线程间共享。
/// 进程目录在每次访问根目录时按数据源的当前状态构建。
pub struct ProcFS {
    root_inode: Arc<ProcInode>,
    backend: Arc<ProcBackend>,
}

impl ProcFS {
    /// 以给定数据源和配置创建 ProcFS 实例并建好固定树
    pub fn new(ops: Arc<dyn ProcOps>, config: ProcFsConfig) -> Result<Arc<Self>, FsError> {
        let backend = Arc::new(ProcBackend { ops, config });
        let root = ProcInode::new_root(&backend);
        build_tree(&backend, &root, ROOT_LAYOUT)?;

        info!(
            "procfs: tree initialised ({} fixed leaves, cache_ttl={:?}, case_insensitive={})",
            FIXED_LEAVES.len(),
            backend.config.cache_ttl,
            backend.config.case_insensitive
        );

        Ok(Arc::new(Self {
            root_inode: root,
            backend,
        }))
    }

    /// 列出目录
    pub fn list(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        self.list_with(&OpContext::new(), path)
    }

    /// 读取叶子内容，Cached 条目可能返回保留的内容
    pub fn read(&self, path: &str) -> Result<String, FsError> {
        self.read_with(&OpContext::new(), path)
    }

    /// 读取叶子内容并替换保留的缓存
    pub fn force_refresh(&self, path: &str) -> Result<String, FsError> {
        self.read_with(&OpContext::new().with_refresh(true), path)
    }

    /// 解析路径
    pub fn lookup_with(&self, ctx: &OpContext, path: &str) -> Result<Arc<dyn Inode>, FsError> {
        vfs_lookup_from(self.root_inode.clone(), path, ctx)
    }

    /// 以显式上下文列出目录
    ///
    /// 目标是叶子时返回 [`FsError::NotDirectory`]。
    pub fn list_with(&self, ctx: &OpContext, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let node = self.lookup_with(ctx, path)?;
        if node.metadata()?.inode_type != InodeType::Directory {
            return Err(FsError::NotDirectory);
        }
        ctx.checkpoint()?;
        node.readdir(ctx)
    }

    /// 以显式上下文读取叶子
    ///
    /// 目标是目录时返回 [`FsError::IsDirectory`]；上下文要求刷新时跳过缓存。
    pub fn read_with(&self, ctx: &OpContext, path: &str) -> Result<String, FsError> {
        let node = self.lookup_with(ctx, path)?;
        if node.metadata()?.inode_type == InodeType::Directory {
            return Err(FsError::IsDirectory);
        }
        node.read_all(ctx)
    }
}

fn build_tree(
    backend: &Arc<ProcBackend>,
    dir: &Arc<ProcInode>,
    layout: &'static [Layout],
) -> Result<(), FsError> {
    for node in layout {
        match node {
            Layout::Leaf(name, entry) => {
                let leaf = ProcInode::new_generated_file(backend, dir, name, *entry, None, None);
                dir.add_child(name, leaf)?;
            }
            Layout::Dir(name, children) => {
                let child = ProcInode::new_directory(backend, dir, name);
                build_tree(backend, &child, children)?;
                dir.add_child(name, child)?;
            }
            Layout::SelfAlias(name) => {
                let alias = ProcInode::new_self_alias(backend, dir, name);
                dir.add_child(name, alias)?;
            }
        }
        debug!("procfs: created '{}' under '{}'", node.name(), dir.full_path());
    }
    Ok(())
}

impl FileSystem for ProcFS {
    fn fs_type(&self) -> &'static str {
        "proc"
    }

    fn root_inode(&self) -> Arc<dyn Inode> {
        self.root_inode.clone()
    }
}
