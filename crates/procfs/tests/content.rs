use std::net::Ipv4Addr;
use std::sync::Arc;

use procfs::{
    ArpEntry, ArpFlags, DriverInfo, ProcFS, ProcFsConfig, RouteEntry, RouteFlags, SocketProto,
    SwapInfo, TcpState,
};
use regex::Regex;
use test_support::MockProcOps;
use test_support::mock::fixtures;
use vfs::OpContext;

fn setup() -> (Arc<MockProcOps>, Arc<ProcFS>) {
    let ops = Arc::new(MockProcOps::new());
    let fs = ProcFS::new(ops.clone(), ProcFsConfig::default()).unwrap();
    (ops, fs)
}

fn assert_all_lines(content: &str, pattern: &str) {
    let re = Regex::new(pattern).unwrap();
    for line in content.lines() {
        assert!(re.is_match(line), "line {line:?} does not match {pattern}");
    }
}

#[test]
fn test_meminfo_lines() {
    let (_ops, fs) = setup();
    let meminfo = fs.read("/meminfo").unwrap();
    assert_eq!(meminfo.lines().count(), 13);
    assert_all_lines(&meminfo, r"^\w+:\s+\d+ kB$");
}

#[test]
fn test_meminfo_unavailable_zero_filled() {
    let (ops, fs) = setup();
    ops.set_memory(None);
    let meminfo = fs.read("/meminfo").unwrap();
    assert_all_lines(&meminfo, r"^\w+:\s+0 kB$");
}

#[test]
fn test_cpuinfo_records() {
    let (_ops, fs) = setup();
    let cpuinfo = fs.read("/cpuinfo").unwrap();
    let processors = Regex::new(r"(?m)^processor\t+: (\d+)$").unwrap();
    let ids: Vec<&str> = processors
        .captures_iter(&cpuinfo)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    assert_eq!(ids, vec!["0", "1"]);
    assert!(Regex::new(r"(?m)^cpu MHz\t+: 3192\.000$").unwrap().is_match(&cpuinfo));
    assert!(cpuinfo.ends_with("\n\n"));
}

#[test]
fn test_version_and_kernel_fields() {
    let (_ops, fs) = setup();
    assert_eq!(
        fs.read("/version").unwrap(),
        "Windows version 10.0.19045 (build 19045) x86_64\n"
    );
    assert_eq!(fs.read("/sys/kernel/hostname").unwrap(), "testhost\n");
    assert_eq!(fs.read("/sys/kernel/ostype").unwrap(), "Windows_NT\n");
    assert_eq!(fs.read("/sys/kernel/osrelease").unwrap(), "10.0.19045\n");
    assert_eq!(fs.read("/sys/kernel/version").unwrap(), "Windows 19045\n");
}

#[test]
fn test_loadavg_layout() {
    let (_ops, fs) = setup();
    let loadavg = fs.read("/loadavg").unwrap();
    assert_eq!(loadavg, "0.50 0.25 0.10 1/2 42\n");
    assert_all_lines(&loadavg, r"^\d+\.\d{2} \d+\.\d{2} \d+\.\d{2} \d+/\d+ \d+$");
}

#[test]
fn test_stat_layout() {
    let (_ops, fs) = setup();
    let stat = fs.read("/stat").unwrap();
    let lines: Vec<&str> = stat.lines().collect();
    assert_eq!(lines[0], "cpu  200 0 100 2000 0 0 0");
    assert_eq!(lines[1], "cpu0 100 0 50 1000 0 0 0");
    assert_eq!(lines[2], "cpu1 100 0 50 1000 0 0 0");
    assert!(stat.contains("\nintr 12345\n"));
    assert!(stat.contains("\nctxt 67890\n"));
    assert!(stat.contains("\nbtime 1700000000\n"));
    assert!(stat.ends_with("procs_blocked 0\n"));
}

#[test]
fn test_mounts_and_filesystems() {
    let (_ops, fs) = setup();
    assert_eq!(fs.read("/mounts").unwrap(), "C:: / NTFS rw 0 0\n");
    assert_eq!(fs.read("/filesystems").unwrap(), "\tNTFS\nnodev\ttmpfs\n");
}

#[test]
fn test_cmdline_of_caller() {
    let (_ops, fs) = setup();
    assert_eq!(fs.read("/cmdline").unwrap(), "worker --verbose\n");

    let (_ops, fs) = setup();
    let ctx = OpContext::new().with_caller_pid(1);
    assert_eq!(fs.read_with(&ctx, "/cmdline").unwrap(), "/sbin/init\n");
}

#[test]
fn test_cmdline_without_caller_is_empty() {
    let (ops, fs) = setup();
    ops.set_current_pid(None);
    assert_eq!(fs.read("/cmdline").unwrap(), "");
}

#[test]
fn test_partitions_layout() {
    let (_ops, fs) = setup();
    assert_eq!(
        fs.read("/partitions").unwrap(),
        "major minor  #blocks  name\n\n   8       0  500107608 sda\n"
    );
}

#[test]
fn test_swaps_with_data() {
    let (ops, fs) = setup();
    ops.set_swaps(Some(vec![SwapInfo {
        name: "C:\\pagefile.sys".into(),
        kind: "file".into(),
        size_kb: 1024,
        used_kb: 0,
        priority: -2,
    }]));
    let swaps = fs.read("/swaps").unwrap();
    assert_eq!(swaps.lines().count(), 2);
    assert!(swaps.ends_with("C:\\pagefile.sys\t\tfile\t\t1024\t0\t-2\n"));
}

#[test]
fn test_modules_unsupported_and_supported() {
    let (ops, fs) = setup();
    assert_eq!(fs.read("/modules").unwrap(), "");

    ops.set_drivers(Some(vec![DriverInfo {
        name: "ntfs".into(),
        size: 4096,
    }]));
    assert_eq!(
        fs.force_refresh("/modules").unwrap(),
        "ntfs 4096 0 - Live 0x0000000000000000\n"
    );
}

#[test]
fn test_net_dev_layout() {
    let (_ops, fs) = setup();
    let dev = fs.read("/net/dev").unwrap();
    let lines: Vec<&str> = dev.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Inter-|"));
    assert!(lines[1].starts_with(" face |"));
    let re = Regex::new(r"^\s*eth0:\s*1000000\s+10000(\s+0){6}\s+500000\s+5000(\s+0){6}$").unwrap();
    assert!(re.is_match(lines[2]), "{:?}", lines[2]);
}

#[test]
fn test_net_route_header_only_when_unsupported() {
    let (_ops, fs) = setup();
    assert_eq!(
        fs.read("/net/route").unwrap(),
        "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT\n"
    );
}

#[test]
fn test_net_route_entries() {
    let (ops, fs) = setup();
    ops.set_routes(Some(vec![RouteEntry {
        iface: "eth0".into(),
        destination: Ipv4Addr::UNSPECIFIED,
        gateway: Ipv4Addr::new(192, 168, 1, 1),
        flags: RouteFlags::UP | RouteFlags::GATEWAY,
        ref_count: 0,
        use_count: 0,
        metric: 100,
        mask: Ipv4Addr::UNSPECIFIED,
        mtu: 0,
        window: 0,
        irtt: 0,
    }]));
    let route = fs.read("/net/route").unwrap();
    let lines: Vec<&str> = route.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("eth0\t00000000\t0101A8C0\t0003\t"));
}

#[test]
fn test_net_arp_entries() {
    let (ops, fs) = setup();
    ops.set_neighbors(Some(vec![ArpEntry {
        ip: Ipv4Addr::new(192, 168, 1, 1),
        hw_type: 1,
        flags: ArpFlags::COMPLETE,
        hw_addr: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        mask: "*".into(),
        device: "eth0".into(),
    }]));
    let arp = fs.read("/net/arp").unwrap();
    let lines: Vec<&str> = arp.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("IP address"));
    assert!(lines[1].starts_with("192.168.1.1"));
    assert!(lines[1].contains("0x1"));
    assert!(lines[1].contains("0x2"));
    assert!(lines[1].contains("00:11:22:33:44:55"));
    assert!(lines[1].ends_with("eth0"));
}

#[test]
fn test_net_tcp_one_line_per_socket() {
    let (ops, fs) = setup();
    ops.set_sockets(
        SocketProto::Tcp,
        vec![
            fixtures::ipv4_socket(80, None, TcpState::Listen),
            fixtures::ipv4_socket(
                50000,
                Some((Ipv4Addr::new(10, 0, 0, 1), 443)),
                TcpState::Established,
            ),
            fixtures::ipv6_socket(8080, TcpState::Listen),
        ],
    );
    let tcp = fs.read("/net/tcp").unwrap();
    let lines: Vec<&str> = tcp.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("  sl  local_address rem_address   st"));
    assert!(lines[1].starts_with("   0: 0100007F:0050 00000000:0000 0A "));
    assert!(lines[2].starts_with("   1: 0100007F:C350 0100000A:01BB 01 "));
    assert!(lines[3].starts_with(
        "   2: 00000000000000000000000001000000:1F90 00000000000000000000000000000000:0000 0A "
    ));
}

#[test]
fn test_net_udp_header_only_when_empty() {
    let (ops, fs) = setup();
    assert_eq!(fs.read("/net/udp").unwrap().lines().count(), 1);

    ops.set_sockets(
        SocketProto::Udp,
        vec![fixtures::ipv4_socket(53, None, TcpState::Close)],
    );
    let udp = fs.force_refresh("/net/udp").unwrap();
    assert_eq!(udp.lines().count(), 2);
    assert!(udp.lines().nth(1).unwrap().starts_with("   0: 0100007F:0035 00000000:0000 07 "));
}

#[test]
fn test_devices_tables() {
    let (_ops, fs) = setup();
    let block = fs.read("/devices/block").unwrap();
    assert!(block.starts_with("Block devices:\n"));
    assert!(block.contains("\n  8 sd\n"));
    assert_all_lines(
        block.strip_prefix("Block devices:\n").unwrap(),
        r"^\s{0,2}\d{1,3} \S+$",
    );

    let character = fs.read("/devices/character").unwrap();
    assert!(character.starts_with("Character devices:\n"));
    assert!(character.contains("\n  1 mem\n"));
}

#[test]
fn test_status_layout() {
    let (_ops, fs) = setup();
    let status = fs.read("/42/status").unwrap();
    let keys: Vec<&str> = status
        .lines()
        .map(|l| l.split(':').next().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "Name", "State", "Tgid", "Pid", "PPid", "TracerPid", "Uid", "Gid", "Threads",
            "VmSize", "VmRSS", "VmStk", "VmData", "VmExe", "VmLib", "VmPTE", "VmSwap",
        ]
    );
    assert!(status.contains("State:\tS (sleeping)\n"));
    assert!(status.contains("VmSize:\t   16384 kB\n"));
    assert_all_lines(
        &status[status.find("VmSize").unwrap()..],
        r"^Vm\w+:\t\s*\d+ kB$",
    );
}
