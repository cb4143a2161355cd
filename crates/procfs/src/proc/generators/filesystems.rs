//! /filesystems 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::FilesystemType;

/// `/filesystems` 内容生成器。
pub struct FilesystemsGenerator;

impl ContentGenerator for FilesystemsGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let types = cx.fetch("filesystems", cx.ops().filesystems())?;
        Ok(render(&types))
    }
}

/// `nodev` 或空列，制表符，类型名
pub fn render(types: &[FilesystemType]) -> String {
    types
        .iter()
        .map(|fs| format!("{}\t{}\n", if fs.nodev { "nodev" } else { "" }, fs.name))
        .collect()
}
