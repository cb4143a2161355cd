//! ProcOps trait 实现
//!
//! 此模块基于 `sysinfo` 实现 procfs crate 的 [`ProcOps`] trait，桥接宿主平台。
//! 路由、邻居、套接字、驱动与内存映射宿主无法统一提供，沿用 trait 的默认实现
//! （[`Unavailable::NotSupported`]）。

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use log::debug;
use procfs::{
    CpuInfo, CpuTimes, FilesystemType, KernelStats, LoadAverage, MemInfo, MountInfo, NetAdapter,
    OsInfo, PartitionInfo, ProcOps, TaskInfo, TaskState, Unavailable, Uptime, VmStats,
};
use sync::{SpinLock, SpinLockGuard};
use sysinfo::{Disks, Networks, Pid, Process, ProcessStatus, System};
use vfs::{CancelToken, major, minor, scsi_disk_devno};

/// Linux 用户态时钟频率
const USER_HZ: u64 = 100;

/// 基于 `sysinfo` 的宿主数据源
///
/// 刷新 `System` 需要独占访问，刷新期间一直持有自旋锁，其他调用方让出时间片等待。
/// 带取消令牌的枚举在等待期间轮询令牌，不会被别人的慢刷新拖过截止时间。
pub struct HostOps {
    system: SpinLock<System>,
    self_pid: u32,
}

impl Default for HostOps {
    fn default() -> Self {
        Self::new()
    }
}

impl HostOps {
    /// 采集一次完整快照
    pub fn new() -> Self {
        let system = System::new_all();
        let self_pid = sysinfo::get_current_pid()
            .map(|pid| pid.as_u32())
            .unwrap_or_else(|_| std::process::id());
        debug!(
            "hostproc: host snapshot with {} processes, self pid {}",
            system.processes().len(),
            self_pid
        );
        Self {
            system: SpinLock::new(system),
            self_pid,
        }
    }

    fn lock_system(
        &self,
        cancel: &CancelToken,
    ) -> Result<SpinLockGuard<'_, System>, Unavailable> {
        loop {
            cancel.check()?;
            if let Some(system) = self.system.try_lock() {
                return Ok(system);
            }
            thread::yield_now();
        }
    }
}

/// 宿主的系统族标签
fn os_type() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows_NT",
        "macos" | "ios" => "Darwin",
        "linux" | "android" => "Linux",
        "freebsd" => "FreeBSD",
        _ => "Unknown",
    }
}

pub(crate) fn map_status(status: ProcessStatus) -> TaskState {
    match status {
        ProcessStatus::Run => TaskState::Running,
        ProcessStatus::UninterruptibleDiskSleep => TaskState::Uninterruptible,
        ProcessStatus::Stop | ProcessStatus::Tracing => TaskState::Stopped,
        ProcessStatus::Zombie | ProcessStatus::Dead => TaskState::Zombie,
        _ => TaskState::Interruptible,
    }
}

/// 第 `index` 块磁盘的 Linux 风格名称：sda, sdb, ..., sdz, sdaa, ...
pub(crate) fn disk_name(index: usize) -> String {
    let mut suffix = Vec::new();
    let mut n = index;
    loop {
        suffix.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    suffix.reverse();
    format!("sd{}", String::from_utf8_lossy(&suffix))
}

/// 用运行时间把使用率折算为时钟滴答
fn cpu_times(uptime_secs: u64, usage_percent: f32) -> CpuTimes {
    let total = uptime_secs * USER_HZ;
    let busy = (total as f64 * f64::from(usage_percent.clamp(0.0, 100.0)) / 100.0) as u64;
    CpuTimes {
        user: busy,
        idle: total - busy,
        ..CpuTimes::default()
    }
}

fn task_info(process: &Process, boot_time: u64) -> TaskInfo {
    let cmdline: Vec<String> = process.cmd().to_vec();
    let memory = process.memory() as usize;
    let virtual_memory = process.virtual_memory() as usize;

    TaskInfo {
        pid: process.pid().as_u32(),
        ppid: process.parent().map(|pid| pid.as_u32()).unwrap_or(0),
        pgid: process.pid().as_u32(),
        name: process.name().to_string(),
        state: map_status(process.status()),
        exe_path: process.exe().map(|path| path.display().to_string()),
        cmdline,
        uid: 0,
        gid: 0,
        num_threads: 1,
        utime: 0,
        stime: 0,
        start_time: process.start_time().saturating_sub(boot_time) * USER_HZ,
        vm: Some(VmStats {
            vm_bytes: virtual_memory,
            rss_bytes: memory,
            ..VmStats::default()
        }),
    }
}

/// 组装系统标识，缺失的字段各自取默认值，互不影响
fn os_info_from(
    name: Option<String>,
    version: Option<String>,
    kernel: Option<String>,
    hostname: Option<String>,
) -> OsInfo {
    let kernel = kernel.unwrap_or_default();
    OsInfo {
        name: name.unwrap_or_else(|| os_type().to_string()),
        version: version.unwrap_or_default(),
        build: kernel.clone(),
        arch: std::env::consts::ARCH.to_string(),
        hostname: hostname.unwrap_or_default(),
        os_type: os_type().to_string(),
        release: kernel,
    }
}

impl ProcOps for HostOps {
    fn current_pid(&self) -> Result<u32, Unavailable> {
        Ok(self.self_pid)
    }

    fn cpus(&self) -> Result<Vec<CpuInfo>, Unavailable> {
        let system = self.system.lock();
        let cpus = system.cpus();
        let siblings = cpus.len() as u32;
        let cores = system.physical_core_count().unwrap_or(cpus.len()) as u32;

        Ok(cpus
            .iter()
            .enumerate()
            .map(|(index, cpu)| CpuInfo {
                vendor_id: cpu.vendor_id().to_string(),
                model_name: cpu.brand().trim().to_string(),
                mhz: cpu.frequency() as f64,
                physical_id: 0,
                siblings,
                core_id: if cores == 0 { 0 } else { index as u32 % cores },
                cpu_cores: cores,
                ..CpuInfo::default()
            })
            .collect())
    }

    fn memory(&self) -> Result<MemInfo, Unavailable> {
        let mut system = self.system.lock();
        system.refresh_memory();

        let total_kb = system.total_memory() / 1024;
        let available_kb = system.available_memory() / 1024;
        let swap_total_kb = system.total_swap() / 1024;
        let swap_free_kb = system.free_swap() / 1024;

        Ok(MemInfo {
            total_kb,
            free_kb: system.free_memory() / 1024,
            available_kb,
            swap_total_kb,
            swap_free_kb,
            commit_limit_kb: total_kb + swap_total_kb,
            committed_as_kb: system.used_memory() / 1024 + system.used_swap() / 1024,
            ..MemInfo::default()
        })
    }

    fn os_info(&self) -> Result<OsInfo, Unavailable> {
        Ok(os_info_from(
            System::name(),
            System::os_version(),
            System::kernel_version(),
            System::host_name(),
        ))
    }

    fn uptime(&self) -> Result<Uptime, Unavailable> {
        let secs = System::uptime();
        let system = self.system.lock();
        let cpus = system.cpus();
        let idle: f64 = cpus
            .iter()
            .map(|cpu| secs as f64 * (1.0 - f64::from(cpu.cpu_usage().clamp(0.0, 100.0)) / 100.0))
            .sum();

        Ok(Uptime {
            uptime: Duration::from_secs(secs),
            idle: Duration::from_secs_f64(idle),
        })
    }

    fn load_average(&self) -> Result<LoadAverage, Unavailable> {
        let load = System::load_average();
        let system = self.system.lock();
        let processes = system.processes();
        let running = processes
            .values()
            .filter(|p| p.status() == ProcessStatus::Run)
            .count();
        let last_pid = processes.keys().map(|pid| pid.as_u32()).max().unwrap_or(0);

        Ok(LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
            running: running as u32,
            total: processes.len() as u32,
            last_pid,
        })
    }

    fn kernel_stats(&self) -> Result<KernelStats, Unavailable> {
        let uptime = System::uptime();
        let mut system = self.system.lock();
        system.refresh_cpu();

        let per_cpu: Vec<CpuTimes> = system
            .cpus()
            .iter()
            .map(|cpu| cpu_times(uptime, cpu.cpu_usage()))
            .collect();
        let total = per_cpu.iter().fold(CpuTimes::default(), |acc, t| CpuTimes {
            user: acc.user + t.user,
            idle: acc.idle + t.idle,
            ..acc
        });
        let processes = system.processes();
        let running = processes
            .values()
            .filter(|p| p.status() == ProcessStatus::Run)
            .count();

        Ok(KernelStats {
            total,
            per_cpu,
            boot_time: System::boot_time(),
            processes: processes.len() as u64,
            procs_running: running as u32,
            ..KernelStats::default()
        })
    }

    fn list_mounts(&self) -> Result<Vec<MountInfo>, Unavailable> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .map(|disk| MountInfo {
                device: disk.name().to_string_lossy().into_owned(),
                path: disk.mount_point().display().to_string(),
                fs_type: disk.file_system().to_string_lossy().into_owned(),
                read_only: false,
            })
            .collect())
    }

    fn filesystems(&self) -> Result<Vec<FilesystemType>, Unavailable> {
        let disks = Disks::new_with_refreshed_list();
        let names: BTreeSet<String> = disks
            .iter()
            .map(|disk| disk.file_system().to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(names
            .into_iter()
            .map(|name| FilesystemType { name, nodev: false })
            .collect())
    }

    fn partitions(&self) -> Result<Vec<PartitionInfo>, Unavailable> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .enumerate()
            .filter_map(|(index, disk)| {
                let dev = scsi_disk_devno(index, 0)?;
                Some(PartitionInfo {
                    major: major(dev),
                    minor: minor(dev),
                    blocks: disk.total_space() / 1024,
                    name: disk_name(index),
                })
            })
            .collect())
    }

    fn net_adapters(&self, cancel: &CancelToken) -> Result<Vec<NetAdapter>, Unavailable> {
        cancel.check()?;
        let networks = Networks::new_with_refreshed_list();
        cancel.check()?;

        let mut adapters: Vec<NetAdapter> = networks
            .iter()
            .map(|(name, data)| NetAdapter {
                name: name.clone(),
                rx_bytes: data.total_received(),
                rx_packets: data.total_packets_received(),
                rx_errors: data.total_errors_on_received(),
                tx_bytes: data.total_transmitted(),
                tx_packets: data.total_packets_transmitted(),
                tx_errors: data.total_errors_on_transmitted(),
                ..NetAdapter::default()
            })
            .collect();
        adapters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(adapters)
    }

    fn list_process_pids(&self, cancel: &CancelToken) -> Result<Vec<u32>, Unavailable> {
        let mut system = self.lock_system(cancel)?;
        system.refresh_processes();
        cancel.check()?;

        Ok(system.processes().keys().map(|pid| pid.as_u32()).collect())
    }

    fn get_task(&self, pid: u32) -> Result<TaskInfo, Unavailable> {
        let mut system = self.system.lock();
        let sys_pid = Pid::from_u32(pid);
        if !system.refresh_process(sys_pid) {
            return Err(Unavailable::NoSuchProcess);
        }
        let process = system.process(sys_pid).ok_or(Unavailable::NoSuchProcess)?;
        Ok(task_info(process, System::boot_time()))
    }

    fn task_environ(&self, pid: u32) -> Result<Vec<(String, String)>, Unavailable> {
        if pid != self.self_pid {
            return Err(Unavailable::AccessDenied);
        }
        Ok(std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect())
    }
}
