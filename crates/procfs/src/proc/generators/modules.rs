//! /modules 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::DriverInfo;

/// `/modules` 内容生成器。
pub struct ModulesGenerator;

impl ContentGenerator for ModulesGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let drivers = cx.fetch("modules", cx.ops().drivers())?;
        Ok(render(&drivers))
    }
}

/// 引用计数与加载地址没有宿主对应物，使用固定占位
pub fn render(drivers: &[DriverInfo]) -> String {
    drivers
        .iter()
        .map(|d| format!("{} {} 0 - Live 0x0000000000000000\n", d.name, d.size))
        .collect()
}
