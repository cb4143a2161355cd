//! ProcFS 数据源的 Mock 实现
//!
//! 状态保存在 [`SpinLock`] 中，测试可以在 ProcFS 存活期间随时修改，
//! 以验证缓存与进程目录的行为。每个方法的调用次数都被记录。

use std::collections::{BTreeMap, BTreeSet};
use std::thread;
use std::time::Duration;

use procfs::{
    ArpEntry, CpuInfo, DriverInfo, FilesystemType, KernelStats, LoadAverage, MemInfo,
    MemoryAreaInfo, MountInfo, NetAdapter, OsInfo, PartitionInfo, ProcOps, RouteEntry,
    SocketEntry, SocketProto, SwapInfo, TaskInfo, Unavailable, Uptime,
};
use sync::SpinLock;
use vfs::CancelToken;

use super::fixtures;

struct MockState {
    current_pid: Option<u32>,
    cpus: Vec<CpuInfo>,
    memory: Option<MemInfo>,
    os_info: OsInfo,
    uptime: Uptime,
    load_average: LoadAverage,
    kernel_stats: KernelStats,
    mounts: Vec<MountInfo>,
    filesystems: Vec<FilesystemType>,
    swaps: Option<Vec<SwapInfo>>,
    partitions: Vec<PartitionInfo>,
    drivers: Option<Vec<DriverInfo>>,
    adapters: Vec<NetAdapter>,
    routes: Option<Vec<RouteEntry>>,
    neighbors: Option<Vec<ArpEntry>>,
    sockets: BTreeMap<SocketKey, Vec<SocketEntry>>,
    processes: BTreeMap<u32, TaskInfo>,
    environ: BTreeMap<u32, Vec<(String, String)>>,
    denied_environ: BTreeSet<u32>,
    memory_areas: BTreeMap<u32, Vec<MemoryAreaInfo>>,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SocketKey {
    Tcp,
    Udp,
}

impl From<SocketProto> for SocketKey {
    fn from(proto: SocketProto) -> Self {
        match proto {
            SocketProto::Tcp => SocketKey::Tcp,
            SocketProto::Udp => SocketKey::Udp,
        }
    }
}

impl Default for MockState {
    fn default() -> Self {
        let mut processes = BTreeMap::new();
        processes.insert(1, fixtures::task(1, "init", &["/sbin/init"]));
        processes.insert(42, fixtures::task(42, "worker", &["worker", "--verbose"]));

        let mut environ = BTreeMap::new();
        environ.insert(42, vec![("HOME".to_string(), "/home/test".to_string())]);

        Self {
            current_pid: Some(42),
            cpus: vec![fixtures::cpu(0), fixtures::cpu(1)],
            memory: Some(fixtures::memory(8_388_608)),
            os_info: fixtures::os_info(),
            uptime: fixtures::uptime(3600),
            load_average: fixtures::load_average(),
            kernel_stats: fixtures::kernel_stats(),
            mounts: vec![fixtures::mount("C:", "/", "NTFS")],
            filesystems: fixtures::filesystems(),
            swaps: None,
            partitions: vec![fixtures::partition("sda", 0, 500_107_608)],
            drivers: None,
            adapters: vec![fixtures::adapter("eth0", 1_000_000, 500_000)],
            routes: None,
            neighbors: None,
            sockets: BTreeMap::new(),
            processes,
            environ,
            denied_environ: BTreeSet::from([1]),
            memory_areas: BTreeMap::new(),
        }
    }
}

/// 可编程的 ProcFS 数据源
///
/// 默认状态：两个 CPU、8 GiB 内存、进程 1（`init`）与 42（`worker`），
/// 调用方为 42，读取进程 1 的环境变量被拒绝。
/// 交换区、驱动、路由、邻居与内存映射默认不支持。
pub struct MockProcOps {
    state: SpinLock<MockState>,
    calls: SpinLock<BTreeMap<&'static str, usize>>,
    delay: SpinLock<Option<Duration>>,
}

impl Default for MockProcOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProcOps {
    /// 以默认状态创建
    pub fn new() -> Self {
        Self {
            state: SpinLock::new(MockState::default()),
            calls: SpinLock::new(BTreeMap::new()),
            delay: SpinLock::new(None),
        }
    }

    /// 指定方法被调用的次数
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().get(method).copied().unwrap_or(0)
    }

    /// 清零调用计数
    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    /// 每次调用前等待的时间，用于制造并发重叠
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// 设置调用方进程，`None` 表示无法识别调用方
    pub fn set_current_pid(&self, pid: Option<u32>) {
        self.state.lock().current_pid = pid;
    }

    /// 设置 CPU 列表
    pub fn set_cpus(&self, cpus: Vec<CpuInfo>) {
        self.state.lock().cpus = cpus;
    }

    /// 设置内存计数器，`None` 表示不支持
    pub fn set_memory(&self, memory: Option<MemInfo>) {
        self.state.lock().memory = memory;
    }

    /// 设置操作系统标识
    pub fn set_os_info(&self, os_info: OsInfo) {
        self.state.lock().os_info = os_info;
    }

    /// 设置运行时间（秒）
    pub fn set_uptime_secs(&self, secs: u64) {
        self.state.lock().uptime = fixtures::uptime(secs);
    }

    /// 设置平均负载
    pub fn set_load_average(&self, load: LoadAverage) {
        self.state.lock().load_average = load;
    }

    /// 设置挂载点
    pub fn set_mounts(&self, mounts: Vec<MountInfo>) {
        self.state.lock().mounts = mounts;
    }

    /// 设置交换区，`None` 表示不支持
    pub fn set_swaps(&self, swaps: Option<Vec<SwapInfo>>) {
        self.state.lock().swaps = swaps;
    }

    /// 设置驱动，`None` 表示不支持
    pub fn set_drivers(&self, drivers: Option<Vec<DriverInfo>>) {
        self.state.lock().drivers = drivers;
    }

    /// 设置网络适配器
    pub fn set_adapters(&self, adapters: Vec<NetAdapter>) {
        self.state.lock().adapters = adapters;
    }

    /// 设置路由表，`None` 表示不支持
    pub fn set_routes(&self, routes: Option<Vec<RouteEntry>>) {
        self.state.lock().routes = routes;
    }

    /// 设置邻居表，`None` 表示不支持
    pub fn set_neighbors(&self, neighbors: Option<Vec<ArpEntry>>) {
        self.state.lock().neighbors = neighbors;
    }

    /// 设置某个协议的套接字
    pub fn set_sockets(&self, proto: SocketProto, sockets: Vec<SocketEntry>) {
        self.state.lock().sockets.insert(proto.into(), sockets);
    }

    /// 添加或替换进程
    pub fn add_process(&self, task: TaskInfo) {
        self.state.lock().processes.insert(task.pid, task);
    }

    /// 移除进程（模拟进程退出）
    pub fn remove_process(&self, pid: u32) {
        let mut state = self.state.lock();
        state.processes.remove(&pid);
        state.environ.remove(&pid);
        state.memory_areas.remove(&pid);
    }

    /// 设置进程的环境变量
    pub fn set_environ(&self, pid: u32, vars: Vec<(String, String)>) {
        let mut state = self.state.lock();
        state.denied_environ.remove(&pid);
        state.environ.insert(pid, vars);
    }

    /// 拒绝读取进程的环境变量
    pub fn deny_environ(&self, pid: u32) {
        self.state.lock().denied_environ.insert(pid);
    }

    /// 设置进程的内存映射
    pub fn set_memory_areas(&self, pid: u32, areas: Vec<MemoryAreaInfo>) {
        self.state.lock().memory_areas.insert(pid, areas);
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().entry(method).or_insert(0) += 1;
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
    }
}

fn supported<T: Clone>(value: &Option<T>) -> Result<T, Unavailable> {
    value.clone().ok_or(Unavailable::NotSupported)
}

impl ProcOps for MockProcOps {
    fn current_pid(&self) -> Result<u32, Unavailable> {
        self.record("current_pid");
        self.state.lock().current_pid.ok_or(Unavailable::NotSupported)
    }

    fn cpus(&self) -> Result<Vec<CpuInfo>, Unavailable> {
        self.record("cpus");
        Ok(self.state.lock().cpus.clone())
    }

    fn memory(&self) -> Result<MemInfo, Unavailable> {
        self.record("memory");
        supported(&self.state.lock().memory)
    }

    fn os_info(&self) -> Result<OsInfo, Unavailable> {
        self.record("os_info");
        Ok(self.state.lock().os_info.clone())
    }

    fn uptime(&self) -> Result<Uptime, Unavailable> {
        self.record("uptime");
        Ok(self.state.lock().uptime)
    }

    fn load_average(&self) -> Result<LoadAverage, Unavailable> {
        self.record("load_average");
        Ok(self.state.lock().load_average)
    }

    fn kernel_stats(&self) -> Result<KernelStats, Unavailable> {
        self.record("kernel_stats");
        Ok(self.state.lock().kernel_stats.clone())
    }

    fn list_mounts(&self) -> Result<Vec<MountInfo>, Unavailable> {
        self.record("list_mounts");
        Ok(self.state.lock().mounts.clone())
    }

    fn filesystems(&self) -> Result<Vec<FilesystemType>, Unavailable> {
        self.record("filesystems");
        Ok(self.state.lock().filesystems.clone())
    }

    fn swaps(&self) -> Result<Vec<SwapInfo>, Unavailable> {
        self.record("swaps");
        supported(&self.state.lock().swaps)
    }

    fn partitions(&self) -> Result<Vec<PartitionInfo>, Unavailable> {
        self.record("partitions");
        Ok(self.state.lock().partitions.clone())
    }

    fn drivers(&self) -> Result<Vec<DriverInfo>, Unavailable> {
        self.record("drivers");
        supported(&self.state.lock().drivers)
    }

    fn net_adapters(&self, cancel: &CancelToken) -> Result<Vec<NetAdapter>, Unavailable> {
        self.record("net_adapters");
        cancel.check()?;
        Ok(self.state.lock().adapters.clone())
    }

    fn routes(&self, cancel: &CancelToken) -> Result<Vec<RouteEntry>, Unavailable> {
        self.record("routes");
        cancel.check()?;
        supported(&self.state.lock().routes)
    }

    fn neighbors(&self, cancel: &CancelToken) -> Result<Vec<ArpEntry>, Unavailable> {
        self.record("neighbors");
        cancel.check()?;
        supported(&self.state.lock().neighbors)
    }

    fn sockets(
        &self,
        proto: SocketProto,
        cancel: &CancelToken,
    ) -> Result<Vec<SocketEntry>, Unavailable> {
        self.record("sockets");
        cancel.check()?;
        Ok(self
            .state
            .lock()
            .sockets
            .get(&proto.into())
            .cloned()
            .unwrap_or_default())
    }

    fn list_process_pids(&self, cancel: &CancelToken) -> Result<Vec<u32>, Unavailable> {
        self.record("list_process_pids");
        cancel.check()?;
        Ok(self.state.lock().processes.keys().copied().collect())
    }

    fn get_task(&self, pid: u32) -> Result<TaskInfo, Unavailable> {
        self.record("get_task");
        self.state
            .lock()
            .processes
            .get(&pid)
            .cloned()
            .ok_or(Unavailable::NoSuchProcess)
    }

    fn task_environ(&self, pid: u32) -> Result<Vec<(String, String)>, Unavailable> {
        self.record("task_environ");
        let state = self.state.lock();
        if !state.processes.contains_key(&pid) {
            return Err(Unavailable::NoSuchProcess);
        }
        if state.denied_environ.contains(&pid) {
            return Err(Unavailable::AccessDenied);
        }
        Ok(state.environ.get(&pid).cloned().unwrap_or_default())
    }

    fn memory_areas(&self, pid: u32) -> Result<Vec<MemoryAreaInfo>, Unavailable> {
        self.record("memory_areas");
        let state = self.state.lock();
        if !state.processes.contains_key(&pid) {
            return Err(Unavailable::NoSuchProcess);
        }
        state
            .memory_areas
            .get(&pid)
            .cloned()
            .ok_or(Unavailable::NotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_calls_and_tracks_processes() {
        let ops = MockProcOps::new();
        assert_eq!(ops.get_task(42).unwrap().name, "worker");
        ops.remove_process(42);
        assert_eq!(ops.get_task(42), Err(Unavailable::NoSuchProcess));
        assert_eq!(ops.calls("get_task"), 2);

        ops.reset_calls();
        assert_eq!(ops.calls("get_task"), 0);
    }

    #[test]
    fn cancelled_enumeration_is_interrupted() {
        let ops = MockProcOps::new();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(
            ops.list_process_pids(&cancel),
            Err(Unavailable::Interrupted(vfs::Interrupt::Cancelled))
        );
    }

    #[test]
    fn environ_access_rules() {
        let ops = MockProcOps::new();
        assert_eq!(ops.task_environ(1), Err(Unavailable::AccessDenied));
        assert_eq!(ops.task_environ(42).unwrap().len(), 1);
        assert_eq!(ops.task_environ(7), Err(Unavailable::NoSuchProcess));
    }
}
