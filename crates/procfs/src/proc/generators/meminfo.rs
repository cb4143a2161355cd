//! /meminfo 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::MemInfo;

/// `/meminfo` 内容生成器。
pub struct MeminfoGenerator;

impl ContentGenerator for MeminfoGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let mem = cx.fetch("meminfo", cx.ops().memory())?;
        Ok(render(&mem))
    }
}

/// `Key:` 左对齐到 16 列，数值右对齐到 8 列
pub fn render(mem: &MemInfo) -> String {
    let fields = [
        ("MemTotal", mem.total_kb),
        ("MemFree", mem.free_kb),
        ("MemAvailable", mem.available_kb),
        ("Buffers", mem.buffers_kb),
        ("Cached", mem.cached_kb),
        ("SwapTotal", mem.swap_total_kb),
        ("SwapFree", mem.swap_free_kb),
        ("Dirty", mem.dirty_kb),
        ("Writeback", mem.writeback_kb),
        ("Mapped", mem.mapped_kb),
        ("Shmem", mem.shmem_kb),
        ("CommitLimit", mem.commit_limit_kb),
        ("Committed_AS", mem.committed_as_kb),
    ];

    fields
        .iter()
        .map(|(key, value)| format!("{:<16}{:>8} kB\n", format!("{}:", key), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_layout() {
        let mem = MemInfo {
            total_kb: 16384,
            free_kb: 1024,
            ..MemInfo::default()
        };
        let out = render(&mem);
        assert_eq!(out.lines().count(), 13);
        assert!(out.starts_with("MemTotal:          16384 kB\n"));
        assert!(out.contains("MemFree:            1024 kB\n"));
        assert!(out.contains("Committed_AS:          0 kB\n"));
    }
}
