//! /net/route 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::ipv4_hex;
use crate::ops::RouteEntry;
use crate::proc::generators::{ContentGenerator, GenContext};

/// `/net/route` 内容生成器。
pub struct NetRouteGenerator;

impl ContentGenerator for NetRouteGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let routes = cx.fetch("net/route", cx.ops().routes(cx.cancel()))?;
        Ok(render(&routes))
    }
}

const HEADER: &str =
    "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT\n";

/// 表头加每条路由一行，地址为小端十六进制
pub fn render(routes: &[RouteEntry]) -> String {
    let mut out = String::from(HEADER);
    for r in routes {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{:04X}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.iface,
            ipv4_hex(r.destination),
            ipv4_hex(r.gateway),
            r.flags.bits(),
            r.ref_count,
            r.use_count,
            r.metric,
            ipv4_hex(r.mask),
            r.mtu,
            r.window,
            r.irtt,
        );
    }
    out
}
