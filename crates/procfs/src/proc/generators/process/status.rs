//! `/<pid>/status` 生成器

use vfs::Interrupt;

use super::fetch_task;
use crate::ops::TaskInfo;
use crate::proc::generators::{ContentGenerator, GenContext};

/// 为绑定进程生成 `/<pid>/status` 内容的生成器
pub struct PidStatusGenerator;

impl ContentGenerator for PidStatusGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        Ok(fetch_task(cx, "pid/status")?
            .map(|task| render(&task))
            .unwrap_or_default())
    }
}

/// `Key:\tvalue` 行，内存统计缺失时各项为 0
pub fn render(task: &TaskInfo) -> String {
    let state = task.state;
    let vm = task.vm.unwrap_or_default();

    format!(
        "Name:\t{}\n\
         State:\t{} ({})\n\
         Tgid:\t{}\n\
         Pid:\t{}\n\
         PPid:\t{}\n\
         TracerPid:\t0\n\
         Uid:\t{uid}\t{uid}\t{uid}\t{uid}\n\
         Gid:\t{gid}\t{gid}\t{gid}\t{gid}\n\
         Threads:\t{}\n\
         VmSize:\t{:>8} kB\n\
         VmRSS:\t{:>8} kB\n\
         VmStk:\t{:>8} kB\n\
         VmData:\t{:>8} kB\n\
         VmExe:\t{:>8} kB\n\
         VmLib:\t{:>8} kB\n\
         VmPTE:\t{:>8} kB\n\
         VmSwap:\t{:>8} kB\n",
        task.name,
        state.to_char(),
        state.name(),
        task.pid,
        task.pid,
        task.ppid,
        task.num_threads,
        vm.vm_size_kb(),
        vm.rss_kb(),
        vm.stack_bytes / 1024,
        vm.data_bytes / 1024,
        vm.text_bytes / 1024,
        vm.lib_bytes / 1024,
        vm.pte_bytes / 1024,
        vm.swap_bytes / 1024,
        uid = task.uid,
        gid = task.gid,
    )
}
