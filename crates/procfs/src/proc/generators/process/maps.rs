//! `/<pid>/maps` 生成器

use std::fmt::Write;

use vfs::Interrupt;

use crate::ops::{MemoryAreaInfo, Unavailable};
use crate::proc::generators::{ACCESS_DENIED, ContentGenerator, GenContext, log_unavailable};

/// `/<pid>/maps` 生成器
pub struct PidMapsGenerator;

impl ContentGenerator for PidMapsGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let Some(pid) = cx.pid() else {
            return Ok(String::new());
        };
        match cx.ops().memory_areas(pid) {
            Ok(areas) => Ok(render(&areas)),
            Err(Unavailable::Interrupted(interrupt)) => Err(interrupt),
            Err(Unavailable::AccessDenied) => Ok(String::from(ACCESS_DENIED)),
            Err(reason) => {
                log_unavailable("pid/maps", reason);
                Ok(String::new())
            }
        }
    }
}

/// `start-end perm offset dev inode path`
pub fn render(areas: &[MemoryAreaInfo]) -> String {
    let mut out = String::new();
    for area in areas {
        let path = area.path.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "{:016x}-{:016x} {} {:08x} {} {:>8} {}",
            area.start, area.end, area.perm, area.offset, area.dev, area.inode, path
        );
    }
    out
}
