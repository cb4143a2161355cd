//! `/<pid>/cmdline` 生成器

use vfs::Interrupt;

use super::fetch_task;
use crate::ops::TaskInfo;
use crate::proc::generators::{ContentGenerator, GenContext};

/// 为绑定进程生成 `/<pid>/cmdline` 内容的生成器
pub struct PidCmdlineGenerator;

impl ContentGenerator for PidCmdlineGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        Ok(fetch_task(cx, "pid/cmdline")?
            .map(|task| render(&task))
            .unwrap_or_default())
    }
}

/// 每个参数后跟一个 NUL；没有参数时输出进程名加 NUL
pub fn render(task: &TaskInfo) -> String {
    if task.cmdline.is_empty() {
        return format!("{}\0", task.name);
    }

    let mut content = String::new();
    for arg in &task.cmdline {
        content.push_str(arg);
        content.push('\0');
    }
    content
}
