//! 进程目录中的生成器
//!
//! 生成器在读取时才按绑定的 pid 查询数据源，因此内容反映读取那一刻的进程状态。
//! 进程在解析之后、读取之前退出时内容为空。

pub mod cmdline;
pub mod environ;
pub mod maps;
pub mod stat;
pub mod status;

pub use cmdline::PidCmdlineGenerator;
pub use environ::PidEnvironGenerator;
pub use maps::PidMapsGenerator;
pub use stat::PidStatGenerator;
pub use status::PidStatusGenerator;

use vfs::Interrupt;

use crate::ops::{TaskInfo, Unavailable};
use crate::proc::generators::{GenContext, log_unavailable};

/// 取绑定进程的快照，进程不可见时返回 `None`
pub(crate) fn fetch_task(cx: &GenContext<'_>, what: &str) -> Result<Option<TaskInfo>, Interrupt> {
    let Some(pid) = cx.pid() else {
        return Ok(None);
    };
    match cx.ops().get_task(pid) {
        Ok(task) => Ok(Some(task)),
        Err(Unavailable::Interrupted(interrupt)) => Err(interrupt),
        Err(reason) => {
            log_unavailable(what, reason);
            Ok(None)
        }
    }
}
