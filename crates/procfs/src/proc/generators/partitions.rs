//! /partitions 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::PartitionInfo;

/// `/partitions` 内容生成器。
pub struct PartitionsGenerator;

impl ContentGenerator for PartitionsGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let parts = cx.fetch("partitions", cx.ops().partitions())?;
        Ok(render(&parts))
    }
}

const HEADER: &str = "major minor  #blocks  name\n\n";

/// 表头、空行，然后每个分区一行
pub fn render(parts: &[PartitionInfo]) -> String {
    let mut out = String::from(HEADER);
    for part in parts {
        let _ = writeln!(
            out,
            "{:>4} {:>7} {:>10} {}",
            part.major, part.minor, part.blocks, part.name
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_widths() {
        let part = PartitionInfo {
            major: 8,
            minor: 1,
            blocks: 1_048_576,
            name: "sda1".into(),
        };
        assert_eq!(
            render(&[part]),
            "major minor  #blocks  name\n\n   8       1    1048576 sda1\n"
        );
    }
}
