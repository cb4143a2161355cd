//! /stat 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::{CpuTimes, KernelStats};

/// `/stat` 内容生成器。
pub struct StatGenerator;

impl ContentGenerator for StatGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let stats = cx.fetch("stat", cx.ops().kernel_stats())?;
        Ok(render(&stats))
    }
}

fn cpu_line(out: &mut String, label: &str, t: &CpuTimes) {
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} {} {}",
        label, t.user, t.nice, t.system, t.idle, t.iowait, t.irq, t.softirq
    );
}

/// 汇总 `cpu` 行（标签后两个空格）、每核 `cpuN` 行，然后是计数器
pub fn render(stats: &KernelStats) -> String {
    let mut out = String::new();

    cpu_line(&mut out, "cpu ", &stats.total);
    for (i, times) in stats.per_cpu.iter().enumerate() {
        cpu_line(&mut out, &format!("cpu{}", i), times);
    }

    let _ = write!(
        out,
        "intr {}\n\
         ctxt {}\n\
         btime {}\n\
         processes {}\n\
         procs_running {}\n\
         procs_blocked {}\n",
        stats.interrupts,
        stats.context_switches,
        stats.boot_time,
        stats.processes,
        stats.procs_running,
        stats.procs_blocked,
    );

    out
}
