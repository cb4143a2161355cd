//! /swaps 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::SwapInfo;

/// `/swaps` 内容生成器。
pub struct SwapsGenerator;

impl ContentGenerator for SwapsGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let swaps = cx.fetch("swaps", cx.ops().swaps())?;
        Ok(render(&swaps))
    }
}

const HEADER: &str = "Filename\t\t\t\tType\t\tSize\tUsed\tPriority\n";

/// 表头加每个交换区一行
pub fn render(swaps: &[SwapInfo]) -> String {
    let mut out = String::from(HEADER);
    for swap in swaps {
        let _ = writeln!(
            out,
            "{}\t\t{}\t\t{}\t{}\t{}",
            swap.name, swap.kind, swap.size_kb, swap.used_kb, swap.priority
        );
    }
    out
}
