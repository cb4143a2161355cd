//! /cmdline 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext, line};
use crate::ops::TaskInfo;

/// `/cmdline` 内容生成器：调用方进程的命令行。
pub struct CmdlineGenerator;

impl ContentGenerator for CmdlineGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let Some(pid) = cx.caller_pid()? else {
            return Ok(String::new());
        };
        let task = cx.fetch("cmdline", cx.ops().get_task(pid))?;
        Ok(render(&task))
    }
}

/// 参数以空格连接；没有参数时使用可执行文件路径
pub fn render(task: &TaskInfo) -> String {
    if task.cmdline.is_empty() {
        line(task.exe_path.as_deref().unwrap_or(""))
    } else {
        line(&task.cmdline.join(" "))
    }
}
