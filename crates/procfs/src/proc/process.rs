//! 进程目录工厂
//!
//! 进程目录不存放在常驻树中。每次列出或查找根目录时都重新询问数据源，
//! 按需构建目录节点，遍历结束后即被丢弃，因此不保留任何跨调用状态。

use std::sync::Arc;

use log::debug;
use vfs::{DirEntry, FsError, InodeType, OpContext};

use crate::ops::Unavailable;
use crate::proc::entry::{PROCESS_LAYOUT, ProcEntry};
use crate::proc::generators::log_unavailable;
use crate::proc::inode::{ProcBackend, ProcInode, proc_pid_child_inode_no, proc_pid_dir_inode_no};

/// 只接受规范的十进制写法（无前导零、无符号），且 pid 不为 0
pub(crate) fn parse_pid(name: &str) -> Option<u32> {
    let pid = name.parse::<u32>().ok()?;
    (pid > 0 && pid.to_string() == name).then_some(pid)
}

/// 数据源当前报告的每个进程对应一个目录项，按 pid 升序
pub(crate) fn list_process_dirs(
    backend: &ProcBackend,
    ctx: &OpContext,
) -> Result<Vec<DirEntry>, FsError> {
    ctx.checkpoint()?;

    let mut pids = match backend.ops.list_process_pids(ctx.cancel_token()) {
        Ok(pids) => pids,
        Err(Unavailable::Interrupted(interrupt)) => return Err(interrupt.into()),
        Err(reason) => {
            log_unavailable("process list", reason);
            Vec::new()
        }
    };
    pids.retain(|&pid| pid > 0);
    pids.sort_unstable();
    pids.dedup();

    Ok(pids
        .into_iter()
        .map(|pid| DirEntry {
            name: pid.to_string(),
            inode_no: proc_pid_dir_inode_no(pid),
            inode_type: InodeType::Directory,
        })
        .collect())
}

/// 构建进程目录，调用时确认进程仍然存在
///
/// 进程已退出或不可见时返回 [`FsError::NotFound`]。
pub(crate) fn resolve_process(
    backend: &Arc<ProcBackend>,
    pid: u32,
    ctx: &OpContext,
) -> Result<Arc<ProcInode>, FsError> {
    ctx.checkpoint()?;

    match backend.ops.get_task(pid) {
        Ok(_) => {}
        Err(Unavailable::Interrupted(interrupt)) => return Err(interrupt.into()),
        Err(reason) => {
            debug!("procfs: pid {} not resolvable: {}", pid, reason);
            return Err(FsError::NotFound);
        }
    }

    build_process_dir(backend, &pid.to_string(), pid, true)
}

/// 构建调用方进程的目录，每次访问都重新计算
///
/// 调用方身份优先取自上下文，否则询问数据源；两者都没有时返回 [`FsError::NotFound`]。
pub(crate) fn resolve_self(
    backend: &Arc<ProcBackend>,
    ctx: &OpContext,
) -> Result<Arc<ProcInode>, FsError> {
    ctx.checkpoint()?;

    let pid = match ctx.caller_pid() {
        Some(pid) => pid,
        None => match backend.ops.current_pid() {
            Ok(pid) => pid,
            Err(Unavailable::Interrupted(interrupt)) => return Err(interrupt.into()),
            Err(reason) => {
                debug!("procfs: caller identity unavailable: {}", reason);
                return Err(FsError::NotFound);
            }
        },
    };

    build_process_dir(backend, "self", pid, false)
}

fn build_process_dir(
    backend: &Arc<ProcBackend>,
    name: &str,
    pid: u32,
    with_maps: bool,
) -> Result<Arc<ProcInode>, FsError> {
    let dir = ProcInode::new_process_dir(backend, name, pid);

    for (offset, (child_name, entry)) in PROCESS_LAYOUT.iter().enumerate() {
        if *entry == ProcEntry::PidMaps && !with_maps {
            continue;
        }
        let child = ProcInode::new_generated_file(
            backend,
            &dir,
            child_name,
            *entry,
            Some(pid),
            Some(proc_pid_child_inode_no(pid, offset + 1)),
        );
        dir.add_child(child_name, child)?;
    }

    debug!("procfs: built process dir '{}' for pid {}", name, pid);
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_pid_names_only() {
        assert_eq!(parse_pid("42"), Some(42));
        assert_eq!(parse_pid("042"), None);
        assert_eq!(parse_pid("+42"), None);
        assert_eq!(parse_pid("0"), None);
        assert_eq!(parse_pid("self"), None);
        assert_eq!(parse_pid("99999999999"), None);
    }
}
