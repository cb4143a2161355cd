//! 条目表
//!
//! 命名空间中的每个叶子文件都由一个 [`ProcEntry`] 标识。缓存策略和内容生成器都
//! 通过身份键在静态表中查得，节点本身只有一种类型。
//!
//! 固定树的形状由 [`ROOT_LAYOUT`] 描述，进程目录的形状由 [`PROCESS_LAYOUT`] 描述。

use lazy_static::lazy_static;

use crate::proc::cache::CachePolicy;

/// 叶子文件的身份键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcEntry {
    /// `/cpuinfo`
    Cpuinfo,
    /// `/meminfo`
    Meminfo,
    /// `/version`
    Version,
    /// `/uptime`
    Uptime,
    /// `/loadavg`
    Loadavg,
    /// `/stat`
    Stat,
    /// `/mounts`
    Mounts,
    /// `/cmdline`
    Cmdline,
    /// `/filesystems`
    Filesystems,
    /// `/swaps`
    Swaps,
    /// `/partitions`
    Partitions,
    /// `/modules`
    Modules,
    /// `/net/dev`
    NetDev,
    /// `/net/route`
    NetRoute,
    /// `/net/arp`
    NetArp,
    /// `/net/tcp`
    NetTcp,
    /// `/net/udp`
    NetUdp,
    /// `/sys/kernel/hostname`
    KernelHostname,
    /// `/sys/kernel/ostype`
    KernelOstype,
    /// `/sys/kernel/osrelease`
    KernelOsrelease,
    /// `/sys/kernel/version`
    KernelVersion,
    /// `/devices/block`
    DevicesBlock,
    /// `/devices/character`
    DevicesCharacter,
    /// `/<pid>/cmdline`
    PidCmdline,
    /// `/<pid>/status`
    PidStatus,
    /// `/<pid>/stat`
    PidStat,
    /// `/<pid>/environ`
    PidEnviron,
    /// `/<pid>/maps`
    PidMaps,
}

impl ProcEntry {
    /// 条目的缓存策略
    pub fn policy(self) -> CachePolicy {
        match self {
            ProcEntry::Uptime
            | ProcEntry::Loadavg
            | ProcEntry::Stat
            | ProcEntry::PidCmdline
            | ProcEntry::PidStatus
            | ProcEntry::PidStat
            | ProcEntry::PidEnviron
            | ProcEntry::PidMaps => CachePolicy::AlwaysFresh,
            _ => CachePolicy::Cached,
        }
    }
}

/// 固定树的一个节点描述
#[derive(Debug)]
pub enum Layout {
    /// 叶子文件
    Leaf(&'static str, ProcEntry),
    /// 目录及其子项
    Dir(&'static str, &'static [Layout]),
    /// 调用方进程目录的别名
    SelfAlias(&'static str),
}

impl Layout {
    /// 节点名称
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Leaf(name, _) | Layout::Dir(name, _) | Layout::SelfAlias(name) => name,
        }
    }
}

/// 根目录下的固定树
pub static ROOT_LAYOUT: &[Layout] = &[
    Layout::Leaf("cpuinfo", ProcEntry::Cpuinfo),
    Layout::Leaf("meminfo", ProcEntry::Meminfo),
    Layout::Leaf("version", ProcEntry::Version),
    Layout::Leaf("uptime", ProcEntry::Uptime),
    Layout::Leaf("loadavg", ProcEntry::Loadavg),
    Layout::Leaf("stat", ProcEntry::Stat),
    Layout::Leaf("mounts", ProcEntry::Mounts),
    Layout::Leaf("cmdline", ProcEntry::Cmdline),
    Layout::Leaf("filesystems", ProcEntry::Filesystems),
    Layout::Leaf("swaps", ProcEntry::Swaps),
    Layout::Leaf("partitions", ProcEntry::Partitions),
    Layout::Leaf("modules", ProcEntry::Modules),
    Layout::Dir(
        "net",
        &[
            Layout::Leaf("dev", ProcEntry::NetDev),
            Layout::Leaf("route", ProcEntry::NetRoute),
            Layout::Leaf("arp", ProcEntry::NetArp),
            Layout::Leaf("tcp", ProcEntry::NetTcp),
            Layout::Leaf("udp", ProcEntry::NetUdp),
        ],
    ),
    Layout::Dir(
        "sys",
        &[Layout::Dir(
            "kernel",
            &[
                Layout::Leaf("hostname", ProcEntry::KernelHostname),
                Layout::Leaf("ostype", ProcEntry::KernelOstype),
                Layout::Leaf("osrelease", ProcEntry::KernelOsrelease),
                Layout::Leaf("version", ProcEntry::KernelVersion),
            ],
        )],
    ),
    Layout::Dir(
        "devices",
        &[
            Layout::Leaf("block", ProcEntry::DevicesBlock),
            Layout::Leaf("character", ProcEntry::DevicesCharacter),
        ],
    ),
    Layout::SelfAlias("self"),
];

/// 进程目录的子项，`maps` 只出现在数字进程目录中
pub static PROCESS_LAYOUT: &[(&str, ProcEntry)] = &[
    ("cmdline", ProcEntry::PidCmdline),
    ("status", ProcEntry::PidStatus),
    ("stat", ProcEntry::PidStat),
    ("environ", ProcEntry::PidEnviron),
    ("maps", ProcEntry::PidMaps),
];

fn flatten(prefix: &str, layout: &'static [Layout], out: &mut Vec<(String, ProcEntry)>) {
    for node in layout {
        match node {
            Layout::Leaf(name, entry) => out.push((format!("{}/{}", prefix, name), *entry)),
            Layout::Dir(name, children) => flatten(&format!("{}/{}", prefix, name), children, out),
            Layout::SelfAlias(_) => {}
        }
    }
}

lazy_static! {
    /// 固定树中所有叶子的 (路径, 条目)，按布局顺序
    pub static ref FIXED_LEAVES: Vec<(String, ProcEntry)> = {
        let mut out = Vec::new();
        flatten("", ROOT_LAYOUT, &mut out);
        out
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixed_paths_are_unique() {
        let paths: HashSet<_> = FIXED_LEAVES.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths.len(), FIXED_LEAVES.len());
        assert!(FIXED_LEAVES.contains(&("/net/tcp".to_string(), ProcEntry::NetTcp)));
        assert!(
            FIXED_LEAVES.contains(&("/sys/kernel/version".to_string(), ProcEntry::KernelVersion))
        );
        assert!(!FIXED_LEAVES.iter().any(|(_, entry)| *entry == ProcEntry::PidMaps));
    }

    #[test]
    fn policies_match_volatility() {
        assert_eq!(ProcEntry::Meminfo.policy(), CachePolicy::Cached);
        assert_eq!(ProcEntry::Cmdline.policy(), CachePolicy::Cached);
        assert_eq!(ProcEntry::Uptime.policy(), CachePolicy::AlwaysFresh);
        assert_eq!(ProcEntry::PidStatus.policy(), CachePolicy::AlwaysFresh);
        assert!(
            PROCESS_LAYOUT
                .iter()
                .all(|(_, entry)| entry.policy() == CachePolicy::AlwaysFresh)
        );
        assert!(
            FIXED_LEAVES
                .iter()
                .all(|(_, fixed)| PROCESS_LAYOUT.iter().all(|(_, entry)| entry != fixed))
        );
    }

    #[test]
    fn process_layout_names_are_unique() {
        let names: HashSet<_> = PROCESS_LAYOUT.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), PROCESS_LAYOUT.len());
    }

    #[test]
    fn root_names_are_unique() {
        let names: HashSet<_> = ROOT_LAYOUT.iter().map(Layout::name).collect();
        assert_eq!(names.len(), ROOT_LAYOUT.len());
    }
}
