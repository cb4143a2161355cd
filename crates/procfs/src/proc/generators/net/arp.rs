//! /net/arp 生成器

use std::fmt::Write;

use vfs::Interrupt;

use crate::ops::ArpEntry;
use crate::proc::generators::{ContentGenerator, GenContext};

/// `/net/arp` 内容生成器。
pub struct NetArpGenerator;

impl ContentGenerator for NetArpGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let neighbors = cx.fetch("net/arp", cx.ops().neighbors(cx.cancel()))?;
        Ok(render(&neighbors))
    }
}

const HEADER: &str =
    "IP address       HW type     Flags       HW address            Mask     Device\n";

fn mac(addr: &[u8; 6]) -> String {
    addr.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// 表头加每个邻居一行
pub fn render(neighbors: &[ArpEntry]) -> String {
    let mut out = String::from(HEADER);
    for n in neighbors {
        let _ = writeln!(
            out,
            "{:<16} 0x{:<10x}0x{:<10x}{:<17}     {:<8} {}",
            n.ip.to_string(),
            n.hw_type,
            n.flags.bits(),
            mac(&n.hw_addr),
            n.mask,
            n.device,
        );
    }
    out
}
