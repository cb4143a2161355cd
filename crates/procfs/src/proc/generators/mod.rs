//! 内容生成器
//!
//! 每个叶子文件对应一个生成器。生成器分两步工作：
//!
//! 1. 通过 [`GenContext`] 从数据源取数据，不可用的数据在这里降级为默认值或占位内容
//! 2. 调用同模块中的纯函数 `render`，把已取得的记录格式化为文本
//!
//! 只有取消与超时会让生成失败，其余数据缺失都体现在内容里。

use log::{debug, warn};
use vfs::{CancelToken, Interrupt, OpContext};

use crate::ops::{ProcOps, Unavailable};
use crate::proc::entry::ProcEntry;

pub mod cmdline;
pub mod cpuinfo;
pub mod devices;
pub mod filesystems;
pub mod kernel;
pub mod loadavg;
pub mod meminfo;
pub mod modules;
pub mod mounts;
pub mod net;
pub mod partitions;
pub mod process;
pub mod stat;
pub mod swaps;
pub mod uptime;

pub use cmdline::CmdlineGenerator;
pub use cpuinfo::CpuinfoGenerator;
pub use devices::DevicesGenerator;
pub use filesystems::FilesystemsGenerator;
pub use kernel::{KernelField, KernelGenerator, VersionGenerator};
pub use loadavg::LoadavgGenerator;
pub use meminfo::MeminfoGenerator;
pub use modules::ModulesGenerator;
pub use mounts::MountsGenerator;
pub use net::{NetArpGenerator, NetDevGenerator, NetRouteGenerator, NetSocketsGenerator};
pub use partitions::PartitionsGenerator;
pub use process::{
    PidCmdlineGenerator, PidEnvironGenerator, PidMapsGenerator, PidStatGenerator,
    PidStatusGenerator,
};
pub use stat::StatGenerator;
pub use swaps::SwapsGenerator;
pub use uptime::UptimeGenerator;

/// 权限不足时的占位内容
pub const ACCESS_DENIED: &str = "Access denied";

/// 生成一次内容所需的上下文
pub struct GenContext<'a> {
    ops: &'a dyn ProcOps,
    pid: Option<u32>,
    op: &'a OpContext,
}

impl<'a> GenContext<'a> {
    /// 创建上下文，`pid` 为进程目录中的条目绑定的进程
    pub fn new(ops: &'a dyn ProcOps, pid: Option<u32>, op: &'a OpContext) -> Self {
        Self { ops, pid, op }
    }

    /// 数据源
    pub fn ops(&self) -> &'a dyn ProcOps {
        self.ops
    }

    /// 绑定的进程
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// 取消令牌
    pub fn cancel(&self) -> &CancelToken {
        self.op.cancel_token()
    }

    /// 调用方进程号：优先使用上下文给出的身份，否则询问数据源
    pub fn caller_pid(&self) -> Result<Option<u32>, Interrupt> {
        if let Some(pid) = self.op.caller_pid() {
            return Ok(Some(pid));
        }
        match self.ops.current_pid() {
            Ok(pid) => Ok(Some(pid)),
            Err(Unavailable::Interrupted(interrupt)) => Err(interrupt),
            Err(_) => Ok(None),
        }
    }

    /// 取数据，不可用时降级为默认值
    ///
    /// 只有中断会向上传播。
    pub fn fetch<T: Default>(
        &self,
        what: &str,
        result: Result<T, Unavailable>,
    ) -> Result<T, Interrupt> {
        match result {
            Ok(value) => Ok(value),
            Err(Unavailable::Interrupted(interrupt)) => Err(interrupt),
            Err(reason) => {
                log_unavailable(what, reason);
                Ok(T::default())
            }
        }
    }
}

/// 记录数据不可用：能力缺失或被拒绝是预期情况，其它原因值得警告
pub(crate) fn log_unavailable(what: &str, reason: Unavailable) {
    match reason {
        Unavailable::NotSupported | Unavailable::AccessDenied => {
            debug!("procfs: {} unavailable: {}", what, reason);
        }
        _ => warn!("procfs: {} unavailable: {}", what, reason),
    }
}

/// 内容生成器 trait
pub trait ContentGenerator: Send + Sync {
    /// 生成文件内容
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt>;
}

/// 按条目身份查找生成器
pub fn generator_for(entry: ProcEntry) -> &'static dyn ContentGenerator {
    use crate::ops::{DeviceKind, SocketProto};

    match entry {
        ProcEntry::Cpuinfo => &CpuinfoGenerator,
        ProcEntry::Meminfo => &MeminfoGenerator,
        ProcEntry::Version => &VersionGenerator,
        ProcEntry::Uptime => &UptimeGenerator,
        ProcEntry::Loadavg => &LoadavgGenerator,
        ProcEntry::Stat => &StatGenerator,
        ProcEntry::Mounts => &MountsGenerator,
        ProcEntry::Cmdline => &CmdlineGenerator,
        ProcEntry::Filesystems => &FilesystemsGenerator,
        ProcEntry::Swaps => &SwapsGenerator,
        ProcEntry::Partitions => &PartitionsGenerator,
        ProcEntry::Modules => &ModulesGenerator,
        ProcEntry::NetDev => &NetDevGenerator,
        ProcEntry::NetRoute => &NetRouteGenerator,
        ProcEntry::NetArp => &NetArpGenerator,
        ProcEntry::NetTcp => &NetSocketsGenerator(SocketProto::Tcp),
        ProcEntry::NetUdp => &NetSocketsGenerator(SocketProto::Udp),
        ProcEntry::KernelHostname => &KernelGenerator(KernelField::Hostname),
        ProcEntry::KernelOstype => &KernelGenerator(KernelField::OsType),
        ProcEntry::KernelOsrelease => &KernelGenerator(KernelField::OsRelease),
        ProcEntry::KernelVersion => &KernelGenerator(KernelField::Version),
        ProcEntry::DevicesBlock => &DevicesGenerator(DeviceKind::Block),
        ProcEntry::DevicesCharacter => &DevicesGenerator(DeviceKind::Character),
        ProcEntry::PidCmdline => &PidCmdlineGenerator,
        ProcEntry::PidStatus => &PidStatusGenerator,
        ProcEntry::PidStat => &PidStatGenerator,
        ProcEntry::PidEnviron => &PidEnvironGenerator,
        ProcEntry::PidMaps => &PidMapsGenerator,
    }
}

/// 单行文本：非空时追加换行，空值保持为空
pub(crate) fn line(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{}\n", value)
    }
}
