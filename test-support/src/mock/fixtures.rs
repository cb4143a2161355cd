//! 测试用的样例记录

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use procfs::{
    CpuInfo, CpuTimes, FilesystemType, KernelStats, LoadAverage, MemInfo, MountInfo, NetAdapter,
    OsInfo, PartitionInfo, SocketEntry, TaskInfo, TaskState, TcpState, Uptime, VmStats,
};

/// 一个逻辑 CPU
pub fn cpu(index: u32) -> CpuInfo {
    CpuInfo {
        vendor_id: "GenuineIntel".into(),
        family: 6,
        model: 158,
        model_name: "Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz".into(),
        stepping: 10,
        mhz: 3192.0,
        cache_size_kb: 12288,
        physical_id: 0,
        siblings: 2,
        core_id: index,
        cpu_cores: 2,
        flags: vec!["fpu".into(), "sse2".into()],
    }
}

/// 内存计数器，`total_kb` 之外的字段按比例填充
pub fn memory(total_kb: u64) -> MemInfo {
    MemInfo {
        total_kb,
        free_kb: total_kb / 4,
        available_kb: total_kb / 2,
        buffers_kb: 0,
        cached_kb: total_kb / 8,
        swap_total_kb: 2_097_152,
        swap_free_kb: 2_097_152,
        dirty_kb: 0,
        writeback_kb: 0,
        mapped_kb: 0,
        shmem_kb: 0,
        commit_limit_kb: total_kb / 2 + 2_097_152,
        committed_as_kb: total_kb / 3,
    }
}

/// 操作系统标识
pub fn os_info() -> OsInfo {
    OsInfo {
        name: "Windows".into(),
        version: "10.0.19045".into(),
        build: "19045".into(),
        arch: "x86_64".into(),
        hostname: "testhost".into(),
        os_type: "Windows_NT".into(),
        release: "10.0.19045".into(),
    }
}

/// 运行时间
pub fn uptime(secs: u64) -> Uptime {
    Uptime {
        uptime: Duration::from_secs(secs),
        idle: Duration::from_secs(secs * 2),
    }
}

/// 平均负载
pub fn load_average() -> LoadAverage {
    LoadAverage {
        one: 0.5,
        five: 0.25,
        fifteen: 0.1,
        running: 1,
        total: 2,
        last_pid: 42,
    }
}

/// 两个 CPU 的内核统计
pub fn kernel_stats() -> KernelStats {
    let cpu = CpuTimes {
        user: 100,
        system: 50,
        idle: 1000,
        ..CpuTimes::default()
    };
    KernelStats {
        total: CpuTimes {
            user: 200,
            system: 100,
            idle: 2000,
            ..CpuTimes::default()
        },
        per_cpu: vec![cpu, cpu],
        interrupts: 12345,
        context_switches: 67890,
        boot_time: 1_700_000_000,
        processes: 2,
        procs_running: 1,
        procs_blocked: 0,
    }
}

/// 一个挂载点
pub fn mount(device: &str, path: &str, fs_type: &str) -> MountInfo {
    MountInfo {
        device: device.into(),
        path: path.into(),
        fs_type: fs_type.into(),
        read_only: false,
    }
}

/// 文件系统类型
pub fn filesystems() -> Vec<FilesystemType> {
    vec![
        FilesystemType {
            name: "NTFS".into(),
            nodev: false,
        },
        FilesystemType {
            name: "tmpfs".into(),
            nodev: true,
        },
    ]
}

/// 一个分区
pub fn partition(name: &str, minor: u32, blocks: u64) -> PartitionInfo {
    PartitionInfo {
        major: 8,
        minor,
        blocks,
        name: name.into(),
    }
}

/// 一个网络适配器
pub fn adapter(name: &str, rx_bytes: u64, tx_bytes: u64) -> NetAdapter {
    NetAdapter {
        name: name.into(),
        rx_bytes,
        rx_packets: rx_bytes / 100,
        tx_bytes,
        tx_packets: tx_bytes / 100,
        ..NetAdapter::default()
    }
}

/// 一个 IPv4 套接字
pub fn ipv4_socket(
    local_port: u16,
    remote: Option<(Ipv4Addr, u16)>,
    state: TcpState,
) -> SocketEntry {
    let (remote_ip, remote_port) = remote.unwrap_or((Ipv4Addr::UNSPECIFIED, 0));
    SocketEntry {
        local: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), local_port),
        remote: SocketAddr::new(IpAddr::V4(remote_ip), remote_port),
        state,
        tx_queue: 0,
        rx_queue: 0,
        uid: 0,
        inode: u64::from(local_port),
    }
}

/// 一个 IPv6 套接字
pub fn ipv6_socket(local_port: u16, state: TcpState) -> SocketEntry {
    SocketEntry {
        local: SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), local_port),
        remote: SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        state,
        tx_queue: 0,
        rx_queue: 0,
        uid: 0,
        inode: u64::from(local_port),
    }
}

/// 一个进程快照
pub fn task(pid: u32, name: &str, args: &[&str]) -> TaskInfo {
    TaskInfo {
        pid,
        ppid: if pid == 1 { 0 } else { 1 },
        pgid: pid,
        name: name.into(),
        state: TaskState::Interruptible,
        exe_path: Some(format!("/usr/bin/{}", name)),
        cmdline: args.iter().map(|arg| arg.to_string()).collect(),
        uid: 1000,
        gid: 1000,
        num_threads: 1,
        utime: 10,
        stime: 5,
        start_time: 100,
        vm: Some(VmStats {
            vm_bytes: 16 * 1024 * 1024,
            rss_bytes: 4 * 1024 * 1024,
            ..VmStats::default()
        }),
    }
}
