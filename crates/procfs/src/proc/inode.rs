//! ProcFS Inode 实现

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use sync::SpinLock;
use vfs::{DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType, OpContext};

use crate::config::ProcFsConfig;
use crate::ops::ProcOps;
use crate::proc::cache::{CachePolicy, CacheSlot};
use crate::proc::entry::ProcEntry;
use crate::proc::generators::{GenContext, generator_for};
use crate::proc::process;

/// 整棵树共享的数据源与配置
pub(crate) struct ProcBackend {
    pub(crate) ops: Arc<dyn ProcOps>,
    pub(crate) config: ProcFsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcInodeKind {
    Generic,
    Root,
    PidDir(u32),
    SelfAlias,
}

const PROC_PID_INO_BASE: usize = 1_000_000_000;
const PROC_PID_INO_STRIDE: usize = 32;

pub(crate) fn proc_pid_dir_inode_no(pid: u32) -> usize {
    PROC_PID_INO_BASE + (pid as usize).saturating_mul(PROC_PID_INO_STRIDE)
}

pub(crate) fn proc_pid_child_inode_no(pid: u32, offset: usize) -> usize {
    proc_pid_dir_inode_no(pid).saturating_add(offset)
}

/// ProcFS 中的 inode 节点
///
/// 目录与叶子共用这一种类型，叶子的行为由 [`ProcEntry`] 身份键决定。
pub struct ProcInode {
    kind: ProcInodeKind,
    name: String,
    /// 父目录的完整路径，只用于诊断
    parent: Option<String>,
    inode_no: usize,
    content: ProcInodeContent,
    backend: Arc<ProcBackend>,
}

/// ProcFS inode 的内容类型
pub enum ProcInodeContent {
    /// 目录（包含子节点）
    Directory(SpinLock<BTreeMap<String, Arc<ProcInode>>>),
    /// 读取时生成内容的叶子
    Generated {
        /// 身份键
        entry: ProcEntry,
        /// 进程目录中的叶子绑定的进程
        pid: Option<u32>,
        /// Cached 条目的缓存槽
        slot: Option<CacheSlot>,
    },
}

/// 全局 Inode 编号分配器
static NEXT_INODE_NO: AtomicUsize = AtomicUsize::new(1);

fn path_join(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

impl ProcInode {
    /// 创建根目录 inode
    pub(crate) fn new_root(backend: &Arc<ProcBackend>) -> Arc<Self> {
        Arc::new(Self {
            kind: ProcInodeKind::Root,
            name: String::new(),
            parent: None,
            inode_no: NEXT_INODE_NO.fetch_add(1, Ordering::Relaxed),
            content: ProcInodeContent::Directory(SpinLock::new(BTreeMap::new())),
            backend: backend.clone(),
        })
    }

    /// 创建固定树中的目录
    pub(crate) fn new_directory(
        backend: &Arc<ProcBackend>,
        parent: &ProcInode,
        name: &str,
    ) -> Arc<Self> {
        let parent = parent.full_path();
        Self::new_directory_with_inode_no(backend, parent, name, None, ProcInodeKind::Generic)
    }

    /// 创建 `self` 别名目录，子项在每次访问时按调用方解析
    pub(crate) fn new_self_alias(
        backend: &Arc<ProcBackend>,
        parent: &ProcInode,
        name: &str,
    ) -> Arc<Self> {
        let parent = parent.full_path();
        Self::new_directory_with_inode_no(backend, parent, name, None, ProcInodeKind::SelfAlias)
    }

    /// 创建进程目录，编号由 pid 推出
    pub(crate) fn new_process_dir(backend: &Arc<ProcBackend>, name: &str, pid: u32) -> Arc<Self> {
        Self::new_directory_with_inode_no(
            backend,
            String::from("/"),
            name,
            Some(proc_pid_dir_inode_no(pid)),
            ProcInodeKind::PidDir(pid),
        )
    }

    fn new_directory_with_inode_no(
        backend: &Arc<ProcBackend>,
        parent: String,
        name: &str,
        inode_no: Option<usize>,
        kind: ProcInodeKind,
    ) -> Arc<Self> {
        let inode_no = inode_no.unwrap_or_else(|| NEXT_INODE_NO.fetch_add(1, Ordering::Relaxed));

        Arc::new(Self {
            kind,
            name: String::from(name),
            parent: Some(parent),
            inode_no,
            content: ProcInodeContent::Directory(SpinLock::new(BTreeMap::new())),
            backend: backend.clone(),
        })
    }

    /// 创建生成内容的叶子
    ///
    /// 缓存槽只为 [`CachePolicy::Cached`] 条目分配。
    pub(crate) fn new_generated_file(
        backend: &Arc<ProcBackend>,
        parent: &ProcInode,
        name: &str,
        entry: ProcEntry,
        pid: Option<u32>,
        inode_no: Option<usize>,
    ) -> Arc<Self> {
        let inode_no = inode_no.unwrap_or_else(|| NEXT_INODE_NO.fetch_add(1, Ordering::Relaxed));
        let slot = match entry.policy() {
            CachePolicy::Cached => Some(CacheSlot::new()),
            CachePolicy::AlwaysFresh => None,
        };

        Arc::new(Self {
            kind: ProcInodeKind::Generic,
            name: String::from(name),
            parent: Some(parent.full_path()),
            inode_no,
            content: ProcInodeContent::Generated { entry, pid, slot },
            backend: backend.clone(),
        })
    }

    /// 向目录添加子节点
    ///
    /// 同名（按配置的大小写约定）子节点已存在时返回 [`FsError::AlreadyExists`]。
    pub fn add_child(&self, name: &str, child: Arc<ProcInode>) -> Result<(), FsError> {
        match &self.content {
            ProcInodeContent::Directory(children) => {
                let mut children = children.lock();
                let config = &self.backend.config;
                if children.keys().any(|existing| config.names_equal(existing, name)) {
                    return Err(FsError::AlreadyExists);
                }
                children.insert(String::from(name), child);
                Ok(())
            }
            ProcInodeContent::Generated { .. } => Err(FsError::NotDirectory),
        }
    }

    /// 节点名称，根目录为空串
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 叶子的身份键，目录返回 `None`
    pub fn entry(&self) -> Option<ProcEntry> {
        match &self.content {
            ProcInodeContent::Generated { entry, .. } => Some(*entry),
            ProcInodeContent::Directory(_) => None,
        }
    }

    /// 叶子绑定的进程
    pub fn pid(&self) -> Option<u32> {
        match (&self.content, self.kind) {
            (ProcInodeContent::Generated { pid, .. }, _) => *pid,
            (_, ProcInodeKind::PidDir(pid)) => Some(pid),
            _ => None,
        }
    }

    /// 节点内容
    pub fn content(&self) -> &ProcInodeContent {
        &self.content
    }

    fn inode_type(&self) -> InodeType {
        match self.content {
            ProcInodeContent::Directory(_) => InodeType::Directory,
            ProcInodeContent::Generated { .. } => InodeType::File,
        }
    }

    fn find_child(
        &self,
        children: &BTreeMap<String, Arc<ProcInode>>,
        name: &str,
    ) -> Option<Arc<ProcInode>> {
        let config = &self.backend.config;
        if !config.case_insensitive {
            return children.get(name).cloned();
        }
        children
            .iter()
            .find(|(existing, _)| config.names_equal(existing, name))
            .map(|(_, child)| child.clone())
    }

    fn generate(
        &self,
        entry: ProcEntry,
        pid: Option<u32>,
        ctx: &OpContext,
    ) -> Result<String, FsError> {
        ctx.checkpoint()?;
        let cx = GenContext::new(self.backend.ops.as_ref(), pid, ctx);
        Ok(generator_for(entry).generate(&cx)?)
    }
}

impl Inode for ProcInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        let inode_type = self.inode_type();
        let (mode, nlinks) = match inode_type {
            InodeType::Directory => (FileMode::read_only_dir(), 2),
            InodeType::File => (FileMode::read_only_file(), 1),
        };

        Ok(InodeMetadata {
            inode_no: self.inode_no,
            inode_type,
            mode,
            size: 0,
            nlinks,
        })
    }

    fn read_all(&self, ctx: &OpContext) -> Result<String, FsError> {
        match &self.content {
            ProcInodeContent::Generated { entry, pid, slot } => {
                ctx.checkpoint()?;
                match slot {
                    Some(slot) => {
                        let ttl = self.backend.config.cache_ttl;
                        let content =
                            slot.get_or_produce(ctx.refresh(), ttl, ctx.cancel_token(), || {
                                self.generate(*entry, *pid, ctx)
                            })?;
                        Ok(String::from(&*content))
                    }
                    None => self.generate(*entry, *pid, ctx),
                }
            }
            ProcInodeContent::Directory(_) => Err(FsError::IsDirectory),
        }
    }

    fn lookup(&self, name: &str, ctx: &OpContext) -> Result<Arc<dyn Inode>, FsError> {
        match &self.content {
            ProcInodeContent::Directory(children) => {
                if self.kind == ProcInodeKind::SelfAlias {
                    return process::resolve_self(&self.backend, ctx)?.lookup(name, ctx);
                }

                let child = self.find_child(&children.lock(), name);
                if let Some(child) = child {
                    return Ok(child as Arc<dyn Inode>);
                }

                if self.kind == ProcInodeKind::Root {
                    if let Some(pid) = process::parse_pid(name) {
                        let dir = process::resolve_process(&self.backend, pid, ctx)?;
                        return Ok(dir as Arc<dyn Inode>);
                    }
                }

                Err(FsError::NotFound)
            }
            ProcInodeContent::Generated { .. } => Err(FsError::NotDirectory),
        }
    }

    fn readdir(&self, ctx: &OpContext) -> Result<Vec<DirEntry>, FsError> {
        match &self.content {
            ProcInodeContent::Directory(children) => {
                if self.kind == ProcInodeKind::SelfAlias {
                    return process::resolve_self(&self.backend, ctx)?.readdir(ctx);
                }

                let mut entries: Vec<DirEntry> = children
                    .lock()
                    .iter()
                    .map(|(name, child)| DirEntry {
                        name: name.clone(),
                        inode_no: child.inode_no,
                        inode_type: child.inode_type(),
                    })
                    .collect();

                if self.kind == ProcInodeKind::Root {
                    entries.extend(process::list_process_dirs(&self.backend, ctx)?);
                }

                debug!("procfs: readdir '{}' -> {} entries", self.full_path(), entries.len());
                Ok(entries)
            }
            ProcInodeContent::Generated { .. } => Err(FsError::NotDirectory),
        }
    }

    fn full_path(&self) -> String {
        match &self.parent {
            None => String::from("/"),
            Some(parent) => path_join(parent, &self.name),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
