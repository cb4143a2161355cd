//! 标准设备号表
//!
//! 宿主系统没有 Linux 的设备号概念，`/devices` 与 `/partitions` 使用这里硬编码的
//! Linux 标准 major 号表。

use crate::dev::makedev;

/// 标准字符设备 major 号
pub mod chrdev_major {
    /// /dev/null, /dev/zero 等
    pub const MEM: u32 = 1;
    /// 伪终端主设备
    pub const PTY_MASTER: u32 = 2;
    /// 伪终端从设备
    pub const PTY_SLAVE: u32 = 3;
    /// /dev/tty*, /dev/ttyS*
    pub const TTY: u32 = 4;
    /// /dev/console
    pub const CONSOLE: u32 = 5;
    /// 并口打印机
    pub const LP: u32 = 6;
    /// 虚拟控制台捕获
    pub const VCS: u32 = 7;
    /// /dev/misc/* (rtc=135)
    pub const MISC: u32 = 10;
    /// /dev/input/*
    pub const INPUT: u32 = 13;
    /// 声卡
    pub const SOUND: u32 = 14;
    /// 帧缓冲
    pub const FB: u32 = 29;
    /// Unix98 PTY 从设备
    pub const PTS: u32 = 136;
    /// USB 设备
    pub const USB: u32 = 180;
}

/// 标准块设备 major 号
pub mod blkdev_major {
    /// /dev/ram*
    pub const RAMDISK: u32 = 1;
    /// /dev/fd*
    pub const FLOPPY: u32 = 2;
    /// /dev/hd*
    pub const IDE0: u32 = 3;
    /// /dev/loop*
    pub const LOOP: u32 = 7;
    /// /dev/sd*
    pub const SCSI_DISK: u32 = 8;
    /// /dev/md*
    pub const MD: u32 = 9;
    /// /dev/sr*
    pub const SCSI_CDROM: u32 = 11;
    /// /dev/mmcblk*
    pub const MMC: u32 = 179;
    /// /dev/vd*
    pub const VIRTIO_BLK: u32 = 254;
    /// /dev/nvme*
    pub const NVME: u32 = 259;
}

/// 已登记的字符设备 (major, 名称)，按 major 升序
pub const CHRDEV_NAMES: &[(u32, &str)] = &[
    (chrdev_major::MEM, "mem"),
    (chrdev_major::PTY_MASTER, "pty"),
    (chrdev_major::PTY_SLAVE, "ttyp"),
    (chrdev_major::TTY, "/dev/vc/0"),
    (chrdev_major::TTY, "tty"),
    (chrdev_major::CONSOLE, "/dev/tty"),
    (chrdev_major::CONSOLE, "/dev/console"),
    (chrdev_major::LP, "lp"),
    (chrdev_major::VCS, "vcs"),
    (chrdev_major::MISC, "misc"),
    (chrdev_major::INPUT, "input"),
    (chrdev_major::SOUND, "sound"),
    (chrdev_major::FB, "fb"),
    (chrdev_major::PTS, "pts"),
    (chrdev_major::USB, "usb"),
];

/// 已登记的块设备 (major, 名称)，按 major 升序
pub const BLKDEV_NAMES: &[(u32, &str)] = &[
    (blkdev_major::RAMDISK, "ramdisk"),
    (blkdev_major::FLOPPY, "fd"),
    (blkdev_major::IDE0, "ide0"),
    (blkdev_major::LOOP, "loop"),
    (blkdev_major::SCSI_DISK, "sd"),
    (blkdev_major::MD, "md"),
    (blkdev_major::SCSI_CDROM, "sr"),
    (blkdev_major::MMC, "mmc"),
    (blkdev_major::VIRTIO_BLK, "virtblk"),
    (blkdev_major::NVME, "blkext"),
];

/// 为第 `index` 块磁盘的第 `part` 个分区分配 SCSI 设备号
///
/// `part == 0` 表示整块磁盘。每块磁盘最多 15 个分区，超出的部分返回 `None`。
pub fn scsi_disk_devno(index: usize, part: usize) -> Option<u64> {
    if part > 15 {
        return None;
    }
    let minor = u32::try_from(index.checked_mul(16)?.checked_add(part)?).ok()?;
    Some(makedev(blkdev_major::SCSI_DISK, minor))
}
