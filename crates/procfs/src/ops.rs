//! 数据源操作 trait 定义
//!
//! 此模块定义了 procfs 需要的外部数据接口 [`ProcOps`]，通过 trait 抽象实现与宿主平台的解耦。
//! 宿主程序实现此 trait 并在构造 [`crate::ProcFS`] 时注入。
//!
//! 每个方法都返回 `Result<T, Unavailable>`：宿主缺少某项能力、拒绝访问或进程已退出时
//! 统一以 [`Unavailable`] 表示，由生成器渲染为占位内容，而不是让读取失败。

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use vfs::{BLKDEV_NAMES, CHRDEV_NAMES, CancelToken, Interrupt};

/// 数据源无法提供数据的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unavailable {
    /// 宿主平台没有这项能力
    #[error("not supported on this host")]
    NotSupported,
    /// 宿主拒绝访问（如读取其它进程的环境变量）
    #[error("access denied")]
    AccessDenied,
    /// 进程不存在或已退出
    #[error("no such process")]
    NoSuchProcess,
    /// 调用方取消或超时
    #[error("interrupted: {0:?}")]
    Interrupted(Interrupt),
}

impl From<Interrupt> for Unavailable {
    fn from(interrupt: Interrupt) -> Self {
        Unavailable::Interrupted(interrupt)
    }
}

/// 数据源操作
///
/// 网络、驱动与内存映射等宿主常常不具备的能力提供了返回
/// [`Unavailable::NotSupported`] 的默认实现。
pub trait ProcOps: Send + Sync {
    // ========== 身份 ==========

    /// 获取调用方进程的 PID（用于 `self` 与 `/cmdline`）
    fn current_pid(&self) -> Result<u32, Unavailable>;

    // ========== 系统信息 ==========

    /// 获取逻辑 CPU 列表
    fn cpus(&self) -> Result<Vec<CpuInfo>, Unavailable>;

    /// 获取内存计数器
    fn memory(&self) -> Result<MemInfo, Unavailable>;

    /// 获取操作系统标识
    fn os_info(&self) -> Result<OsInfo, Unavailable>;

    /// 获取运行时间与空闲时间
    fn uptime(&self) -> Result<Uptime, Unavailable>;

    /// 获取平均负载
    fn load_average(&self) -> Result<LoadAverage, Unavailable>;

    /// 获取内核统计（`/stat`）
    fn kernel_stats(&self) -> Result<KernelStats, Unavailable>;

    // ========== 存储 ==========

    /// 获取挂载点列表
    fn list_mounts(&self) -> Result<Vec<MountInfo>, Unavailable>;

    /// 获取已知的文件系统类型
    fn filesystems(&self) -> Result<Vec<FilesystemType>, Unavailable>;

    /// 获取交换区列表
    fn swaps(&self) -> Result<Vec<SwapInfo>, Unavailable> {
        Err(Unavailable::NotSupported)
    }

    /// 获取分区列表
    fn partitions(&self) -> Result<Vec<PartitionInfo>, Unavailable>;

    /// 获取正在运行的驱动（`/modules`）
    fn drivers(&self) -> Result<Vec<DriverInfo>, Unavailable> {
        Err(Unavailable::NotSupported)
    }

    // ========== 网络（枚举可能较慢，接收取消令牌）==========

    /// 获取网络适配器计数器
    fn net_adapters(&self, cancel: &CancelToken) -> Result<Vec<NetAdapter>, Unavailable>;

    /// 获取 IPv4 路由表
    fn routes(&self, _cancel: &CancelToken) -> Result<Vec<RouteEntry>, Unavailable> {
        Err(Unavailable::NotSupported)
    }

    /// 获取 ARP 邻居表
    fn neighbors(&self, _cancel: &CancelToken) -> Result<Vec<ArpEntry>, Unavailable> {
        Err(Unavailable::NotSupported)
    }

    /// 获取指定协议的套接字列表
    fn sockets(
        &self,
        _proto: SocketProto,
        _cancel: &CancelToken,
    ) -> Result<Vec<SocketEntry>, Unavailable> {
        Err(Unavailable::NotSupported)
    }

    // ========== 设备 ==========

    /// 获取已登记的设备 major 号
    ///
    /// 默认使用 Linux 标准 major 表。
    fn device_majors(&self, kind: DeviceKind) -> Result<Vec<DeviceMajor>, Unavailable> {
        let table = match kind {
            DeviceKind::Character => CHRDEV_NAMES,
            DeviceKind::Block => BLKDEV_NAMES,
        };
        Ok(table
            .iter()
            .map(|&(major, name)| DeviceMajor {
                major,
                name: name.to_string(),
            })
            .collect())
    }

    // ========== 任务管理 ==========

    /// 列出所有进程 PID
    fn list_process_pids(&self, cancel: &CancelToken) -> Result<Vec<u32>, Unavailable>;

    /// 获取指定 PID 的任务信息
    ///
    /// 进程不存在时返回 [`Unavailable::NoSuchProcess`]。
    fn get_task(&self, pid: u32) -> Result<TaskInfo, Unavailable>;

    /// 获取指定进程的环境变量
    fn task_environ(&self, pid: u32) -> Result<Vec<(String, String)>, Unavailable>;

    /// 获取内存区域信息（用于 `/<pid>/maps`）
    fn memory_areas(&self, _pid: u32) -> Result<Vec<MemoryAreaInfo>, Unavailable> {
        Err(Unavailable::NotSupported)
    }
}

/// 单个逻辑 CPU 的描述（用于 `/cpuinfo`）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    /// 厂商标识
    pub vendor_id: String,
    /// CPU family
    pub family: u32,
    /// 型号
    pub model: u32,
    /// 型号名称
    pub model_name: String,
    /// stepping
    pub stepping: u32,
    /// 主频（MHz）
    pub mhz: f64,
    /// 缓存大小（KB）
    pub cache_size_kb: u64,
    /// 物理封装编号
    pub physical_id: u32,
    /// 同一封装内的逻辑 CPU 数
    pub siblings: u32,
    /// 核心编号
    pub core_id: u32,
    /// 同一封装内的物理核心数
    pub cpu_cores: u32,
    /// 特性标志
    pub flags: Vec<String>,
}

/// 内存计数器（单位均为 KB，用于 `/meminfo`）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    /// 物理内存总量
    pub total_kb: u64,
    /// 空闲物理内存
    pub free_kb: u64,
    /// 可用物理内存
    pub available_kb: u64,
    /// 块设备缓冲
    pub buffers_kb: u64,
    /// 页缓存
    pub cached_kb: u64,
    /// 交换区总量
    pub swap_total_kb: u64,
    /// 空闲交换区
    pub swap_free_kb: u64,
    /// 等待写回的脏页
    pub dirty_kb: u64,
    /// 正在写回的页
    pub writeback_kb: u64,
    /// 文件映射
    pub mapped_kb: u64,
    /// 共享内存
    pub shmem_kb: u64,
    /// 可提交上限
    pub commit_limit_kb: u64,
    /// 已提交
    pub committed_as_kb: u64,
}

/// 操作系统标识（用于 `/version` 与 `/sys/kernel/*`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsInfo {
    /// 系统名称
    pub name: String,
    /// 版本号
    pub version: String,
    /// 构建号
    pub build: String,
    /// 体系结构
    pub arch: String,
    /// 主机名
    pub hostname: String,
    /// 系统族标签
    pub os_type: String,
    /// 发行版本字符串
    pub release: String,
}

/// 运行时间
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uptime {
    /// 自启动以来的时间
    pub uptime: Duration,
    /// 所有 CPU 的累计空闲时间
    pub idle: Duration,
}

/// 平均负载（用于 `/loadavg`）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAverage {
    /// 1 分钟平均
    pub one: f64,
    /// 5 分钟平均
    pub five: f64,
    /// 15 分钟平均
    pub fifteen: f64,
    /// 可运行的任务数
    pub running: u32,
    /// 任务总数
    pub total: u32,
    /// 最近分配的 PID
    pub last_pid: u32,
}

/// CPU 时间（时钟滴答数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    /// 用户态
    pub user: u64,
    /// 低优先级用户态
    pub nice: u64,
    /// 内核态
    pub system: u64,
    /// 空闲
    pub idle: u64,
    /// 等待 I/O
    pub iowait: u64,
    /// 硬中断
    pub irq: u64,
    /// 软中断
    pub softirq: u64,
}

/// 内核统计（用于 `/stat`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelStats {
    /// 所有 CPU 合计
    pub total: CpuTimes,
    /// 每个 CPU
    pub per_cpu: Vec<CpuTimes>,
    /// 中断总数
    pub interrupts: u64,
    /// 上下文切换次数
    pub context_switches: u64,
    /// 启动时间（Unix 秒）
    pub boot_time: u64,
    /// 自启动以来创建的进程数
    pub processes: u64,
    /// 正在运行的进程数
    pub procs_running: u32,
    /// 阻塞的进程数
    pub procs_blocked: u32,
}

/// 挂载点信息（用于 `/mounts`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountInfo {
    /// 设备名称
    pub device: String,
    /// 挂载路径
    pub path: String,
    /// 文件系统类型
    pub fs_type: String,
    /// 是否只读
    pub read_only: bool,
}

/// 文件系统类型（用于 `/filesystems`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesystemType {
    /// 类型名称
    pub name: String,
    /// 是否不需要块设备
    pub nodev: bool,
}

/// 交换区（用于 `/swaps`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapInfo {
    /// 文件名或设备名
    pub name: String,
    /// `file` 或 `partition`
    pub kind: String,
    /// 大小（KB）
    pub size_kb: u64,
    /// 已用（KB）
    pub used_kb: u64,
    /// 优先级
    pub priority: i32,
}

/// 分区（用于 `/partitions`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionInfo {
    /// 设备 major 号
    pub major: u32,
    /// 设备 minor 号
    pub minor: u32,
    /// 1 KB 块数
    pub blocks: u64,
    /// 设备名
    pub name: String,
}

/// 驱动（用于 `/modules`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverInfo {
    /// 驱动名称
    pub name: String,
    /// 镜像大小（字节）
    pub size: u64,
}

/// 网络适配器计数器（用于 `/net/dev`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetAdapter {
    /// 接口名
    pub name: String,
    /// 接收字节数
    pub rx_bytes: u64,
    /// 接收包数
    pub rx_packets: u64,
    /// 接收错误数
    pub rx_errors: u64,
    /// 接收丢弃数
    pub rx_dropped: u64,
    /// 接收组播包数
    pub rx_multicast: u64,
    /// 发送字节数
    pub tx_bytes: u64,
    /// 发送包数
    pub tx_packets: u64,
    /// 发送错误数
    pub tx_errors: u64,
    /// 发送丢弃数
    pub tx_dropped: u64,
}

bitflags::bitflags! {
    /// 路由标志（与 Linux `RTF_*` 一致）
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct RouteFlags: u16 {
        /// 路由可用
        const UP = 0x0001;
        /// 目标经由网关
        const GATEWAY = 0x0002;
        /// 主机路由
        const HOST = 0x0004;
        /// 动态创建
        const DYNAMIC = 0x0010;
        /// 被重定向修改
        const MODIFIED = 0x0020;
        /// 拒绝路由
        const REJECT = 0x0200;
    }
}

/// IPv4 路由表项（用于 `/net/route`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// 出接口
    pub iface: String,
    /// 目标网络
    pub destination: Ipv4Addr,
    /// 网关
    pub gateway: Ipv4Addr,
    /// 标志
    pub flags: RouteFlags,
    /// 引用计数
    pub ref_count: u32,
    /// 使用次数
    pub use_count: u32,
    /// 度量值
    pub metric: u32,
    /// 子网掩码
    pub mask: Ipv4Addr,
    /// MTU
    pub mtu: u32,
    /// TCP 窗口
    pub window: u32,
    /// 初始 RTT
    pub irtt: u32,
}

bitflags::bitflags! {
    /// ARP 表项标志（与 Linux `ATF_*` 一致）
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ArpFlags: u32 {
        /// 已解析
        const COMPLETE = 0x02;
        /// 静态表项
        const PERMANENT = 0x04;
        /// 发布表项
        const PUBLISH = 0x08;
    }
}

/// ARP 邻居表项（用于 `/net/arp`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpEntry {
    /// IP 地址
    pub ip: Ipv4Addr,
    /// 硬件类型（以太网为 1）
    pub hw_type: u16,
    /// 标志
    pub flags: ArpFlags,
    /// 硬件地址
    pub hw_addr: [u8; 6],
    /// 掩码，通常为 `*`
    pub mask: String,
    /// 所在接口
    pub device: String,
}

/// 套接字协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketProto {
    /// TCP
    Tcp,
    /// UDP
    Udp,
}

/// 套接字状态（与 Linux `TCP_*` 编号一致）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TcpState {
    /// 已建立
    Established,
    /// 已发送 SYN
    SynSent,
    /// 已收到 SYN
    SynRecv,
    /// FIN-WAIT-1
    FinWait1,
    /// FIN-WAIT-2
    FinWait2,
    /// TIME-WAIT
    TimeWait,
    /// 关闭（UDP 套接字总是此状态）
    #[default]
    Close,
    /// CLOSE-WAIT
    CloseWait,
    /// LAST-ACK
    LastAck,
    /// 监听
    Listen,
    /// CLOSING
    Closing,
}

impl TcpState {
    /// 转换为 Linux 状态码
    pub fn code(self) -> u8 {
        match self {
            TcpState::Established => 0x01,
            TcpState::SynSent => 0x02,
            TcpState::SynRecv => 0x03,
            TcpState::FinWait1 => 0x04,
            TcpState::FinWait2 => 0x05,
            TcpState::TimeWait => 0x06,
            TcpState::Close => 0x07,
            TcpState::CloseWait => 0x08,
            TcpState::LastAck => 0x09,
            TcpState::Listen => 0x0A,
            TcpState::Closing => 0x0B,
        }
    }
}

/// 套接字（用于 `/net/tcp` 与 `/net/udp`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketEntry {
    /// 本地地址
    pub local: SocketAddr,
    /// 远端地址
    pub remote: SocketAddr,
    /// 状态
    pub state: TcpState,
    /// 发送队列长度
    pub tx_queue: u32,
    /// 接收队列长度
    pub rx_queue: u32,
    /// 所有者 UID
    pub uid: u32,
    /// inode 号
    pub inode: u64,
}

/// 设备类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// 字符设备
    Character,
    /// 块设备
    Block,
}

/// 已登记的设备 major 号（用于 `/devices/*`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMajor {
    /// major 号
    pub major: u32,
    /// 驱动名称
    pub name: String,
}

/// 任务状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskState {
    /// 运行中
    Running,
    /// 可中断睡眠
    #[default]
    Interruptible,
    /// 不可中断睡眠
    Uninterruptible,
    /// 已停止
    Stopped,
    /// 僵尸
    Zombie,
}

impl TaskState {
    /// 转换为状态字符
    pub fn to_char(self) -> char {
        match self {
            TaskState::Running => 'R',
            TaskState::Interruptible => 'S',
            TaskState::Uninterruptible => 'D',
            TaskState::Stopped => 'T',
            TaskState::Zombie => 'Z',
        }
    }

    /// 获取状态名称
    pub fn name(self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::Interruptible => "sleeping",
            TaskState::Uninterruptible => "disk sleep",
            TaskState::Stopped => "stopped",
            TaskState::Zombie => "zombie",
        }
    }
}

/// 任务信息（某一时刻的快照）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInfo {
    /// 进程 ID
    pub pid: u32,
    /// 父进程 ID
    pub ppid: u32,
    /// 进程组 ID
    pub pgid: u32,
    /// 进程名称
    pub name: String,
    /// 进程状态
    pub state: TaskState,
    /// 可执行文件路径
    pub exe_path: Option<String>,
    /// 命令行参数
    pub cmdline: Vec<String>,
    /// 用户 ID
    pub uid: u32,
    /// 组 ID
    pub gid: u32,
    /// 线程数
    pub num_threads: usize,
    /// 用户态 CPU 时间（时钟滴答数）
    pub utime: u64,
    /// 内核态 CPU 时间（时钟滴答数）
    pub stime: u64,
    /// 启动时间（自系统启动以来的时钟滴答数）
    pub start_time: u64,
    /// 虚拟内存统计信息
    pub vm: Option<VmStats>,
}

/// 虚拟内存统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmStats {
    /// 代码段大小（字节）
    pub text_bytes: usize,
    /// 数据段、BSS 与堆大小（字节）
    pub data_bytes: usize,
    /// 栈大小（字节）
    pub stack_bytes: usize,
    /// 共享库大小（字节）
    pub lib_bytes: usize,
    /// 页表大小（字节）
    pub pte_bytes: usize,
    /// 被换出的大小（字节）
    pub swap_bytes: usize,
    /// 虚拟地址空间总大小（字节）
    pub vm_bytes: usize,
    /// 常驻内存大小（字节）
    pub rss_bytes: usize,
}

impl VmStats {
    /// 获取虚拟内存大小（KB）
    pub fn vm_size_kb(&self) -> usize {
        self.vm_bytes / 1024
    }

    /// 获取常驻内存大小（KB）
    pub fn rss_kb(&self) -> usize {
        self.rss_bytes / 1024
    }
}

/// 内存区域信息（用于 `/<pid>/maps`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryAreaInfo {
    /// 起始地址
    pub start: usize,
    /// 结束地址
    pub end: usize,
    /// 权限字符串（如 "r-xp"）
    pub perm: String,
    /// 文件偏移
    pub offset: usize,
    /// 设备号
    pub dev: String,
    /// inode 号
    pub inode: usize,
    /// 映射路径
    pub path: Option<String>,
}
