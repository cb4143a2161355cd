//! `/<pid>/environ` 生成器

use vfs::Interrupt;

use crate::ops::Unavailable;
use crate::proc::generators::{ACCESS_DENIED, ContentGenerator, GenContext, log_unavailable};

/// 为绑定进程生成 `/<pid>/environ` 内容的生成器
///
/// 宿主拒绝访问时（通常是读取其它进程的环境变量）内容为 `Access denied`。
pub struct PidEnvironGenerator;

impl ContentGenerator for PidEnvironGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let Some(pid) = cx.pid() else {
            return Ok(String::new());
        };
        match cx.ops().task_environ(pid) {
            Ok(vars) => Ok(render(&vars)),
            Err(Unavailable::Interrupted(interrupt)) => Err(interrupt),
            Err(Unavailable::AccessDenied) => Ok(String::from(ACCESS_DENIED)),
            Err(reason) => {
                log_unavailable("pid/environ", reason);
                Ok(String::new())
            }
        }
    }
}

/// 每个 `KEY=VALUE` 后跟一个 NUL
pub fn render(vars: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\0');
    }
    out
}
