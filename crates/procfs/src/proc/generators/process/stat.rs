//! `/<pid>/stat` 生成器

use vfs::Interrupt;

use super::fetch_task;
use crate::ops::TaskInfo;
use crate::proc::generators::{ContentGenerator, GenContext};

/// 为绑定进程生成 `/<pid>/stat` 内容的生成器
pub struct PidStatGenerator;

impl ContentGenerator for PidStatGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        Ok(fetch_task(cx, "pid/stat")?
            .map(|task| render(&task))
            .unwrap_or_default())
    }
}

/// Linux `/proc/[pid]/stat` 的字段数
pub const STAT_FIELDS: usize = 52;

const PAGE_SIZE: usize = 4096;

/// 52 个以空格分隔的字段，宿主没有的字段写 0
pub fn render(task: &TaskInfo) -> String {
    let vm = task.vm.unwrap_or_default();
    let mut fields = vec![String::from("0"); STAT_FIELDS];

    // 下标为 Linux 字段编号减一
    fields[0] = task.pid.to_string();
    fields[1] = format!("({})", task.name);
    fields[2] = task.state.to_char().to_string();
    fields[3] = task.ppid.to_string();
    fields[4] = task.pgid.to_string();
    fields[13] = task.utime.to_string();
    fields[14] = task.stime.to_string();
    fields[19] = task.num_threads.to_string();
    fields[21] = task.start_time.to_string();
    fields[22] = vm.vm_bytes.to_string();
    fields[23] = (vm.rss_bytes / PAGE_SIZE).to_string();

    let mut out = fields.join(" ");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{TaskState, VmStats};

    #[test]
    fn fifty_two_fields() {
        let task = TaskInfo {
            pid: 7,
            ppid: 1,
            pgid: 7,
            name: "daemon".into(),
            state: TaskState::Interruptible,
            utime: 120,
            stime: 30,
            num_threads: 3,
            start_time: 500,
            vm: Some(VmStats {
                vm_bytes: 40960,
                rss_bytes: 8192,
                ..VmStats::default()
            }),
            ..TaskInfo::default()
        };
        let out = render(&task);
        let fields: Vec<&str> = out.trim_end().split(' ').collect();
        assert_eq!(fields.len(), STAT_FIELDS);
        assert_eq!(&fields[..5], &["7", "(daemon)", "S", "1", "7"]);
        assert_eq!(fields[13], "120");
        assert_eq!(fields[14], "30");
        assert_eq!(fields[19], "3");
        assert_eq!(fields[21], "500");
        assert_eq!(fields[22], "40960");
        assert_eq!(fields[23], "2");
        assert_eq!(fields[51], "0");
    }
}
