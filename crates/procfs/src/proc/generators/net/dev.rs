//! /net/dev 生成器

use std::fmt::Write;

use vfs::Interrupt;

use crate::ops::NetAdapter;
use crate::proc::generators::{ContentGenerator, GenContext};

/// `/net/dev` 内容生成器。
pub struct NetDevGenerator;

impl ContentGenerator for NetDevGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let adapters = cx.fetch("net/dev", cx.ops().net_adapters(cx.cancel()))?;
        Ok(render(&adapters))
    }
}

const HEADER: &str = "Inter-|   Receive                                                |  Transmit\n \
                      face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n";

/// 两行表头加每个适配器一行，宿主没有的列写 0
pub fn render(adapters: &[NetAdapter]) -> String {
    let mut out = String::from(HEADER);
    for a in adapters {
        let _ = writeln!(
            out,
            "{:>6}:{:>8} {:>7} {:>4} {:>4} {:>4} {:>5} {:>10} {:>9} {:>8} {:>7} {:>4} {:>4} {:>4} {:>5} {:>7} {:>10}",
            a.name,
            a.rx_bytes,
            a.rx_packets,
            a.rx_errors,
            a.rx_dropped,
            0,
            0,
            0,
            a.rx_multicast,
            a.tx_bytes,
            a.tx_packets,
            a.tx_errors,
            a.tx_dropped,
            0,
            0,
            0,
            0,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_plus_adapter_lines() {
        let eth = NetAdapter {
            name: "eth0".into(),
            rx_bytes: 1000,
            rx_packets: 10,
            tx_bytes: 2000,
            tx_packets: 20,
            ..NetAdapter::default()
        };
        let out = render(&[eth]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Inter-|"));
        assert!(lines[1].starts_with(" face |bytes"));
        assert!(lines[2].starts_with("  eth0:    1000      10"));
        let columns: Vec<&str> = lines[2].split(':').nth(1).unwrap().split_whitespace().collect();
        assert_eq!(columns.len(), 16);
        assert_eq!(columns[8], "2000");
    }
}
