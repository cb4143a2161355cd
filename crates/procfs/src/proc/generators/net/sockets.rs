//! /net/tcp 与 /net/udp 生成器

use std::fmt::Write;
use std::net::{IpAddr, SocketAddr};

use vfs::Interrupt;

use super::ipv4_hex;
use crate::ops::{SocketEntry, SocketProto};
use crate::proc::generators::{ContentGenerator, GenContext};

/// 套接字表内容生成器，协议由构造参数决定。
pub struct NetSocketsGenerator(pub SocketProto);

impl ContentGenerator for NetSocketsGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let what = match self.0 {
            SocketProto::Tcp => "net/tcp",
            SocketProto::Udp => "net/udp",
        };
        let sockets = cx.fetch(what, cx.ops().sockets(self.0, cx.cancel()))?;
        Ok(render(&sockets))
    }
}

const HEADER: &str = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode\n";

/// IPv4 为 8 位、IPv6 为 32 位十六进制（每 4 字节一组按小端打印）
fn addr_hex(addr: &SocketAddr) -> String {
    match addr.ip() {
        IpAddr::V4(v4) => ipv4_hex(v4),
        IpAddr::V6(v6) => v6
            .octets()
            .chunks_exact(4)
            .map(|word| format!("{:08X}", u32::from_le_bytes([word[0], word[1], word[2], word[3]])))
            .collect(),
    }
}

/// 表头加每个套接字恰好一行
pub fn render(sockets: &[SocketEntry]) -> String {
    let mut out = String::from(HEADER);
    for (idx, s) in sockets.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}: {}:{:04X} {}:{:04X} {:02X} {:08X}:{:08X} 00:00000000 00000000 {:>5} {:>8} {}",
            idx,
            addr_hex(&s.local),
            s.local.port(),
            addr_hex(&s.remote),
            s.remote.port(),
            s.state.code(),
            s.tx_queue,
            s.rx_queue,
            s.uid,
            0,
            s.inode,
        );
    }
    out
}
