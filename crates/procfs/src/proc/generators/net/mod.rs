//! /net/* 生成器

pub mod arp;
pub mod dev;
pub mod route;
pub mod sockets;

pub use arp::NetArpGenerator;
pub use dev::NetDevGenerator;
pub use route::NetRouteGenerator;
pub use sockets::NetSocketsGenerator;

use std::net::Ipv4Addr;

/// Linux 在小端主机上按内存顺序打印 IPv4 地址的十六进制形式
pub(crate) fn ipv4_hex(addr: Ipv4Addr) -> String {
    format!("{:08X}", u32::from_le_bytes(addr.octets()))
}
