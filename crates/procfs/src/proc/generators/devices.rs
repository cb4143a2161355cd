//! /devices/* 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::{DeviceKind, DeviceMajor};

/// `/devices/block` 与 `/devices/character` 内容生成器。
pub struct DevicesGenerator(pub DeviceKind);

impl ContentGenerator for DevicesGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let majors = cx.fetch("devices", cx.ops().device_majors(self.0))?;
        Ok(render(self.0, &majors))
    }
}

/// 表头加 `{major:>3} {name}` 行
pub fn render(kind: DeviceKind, majors: &[DeviceMajor]) -> String {
    let mut out = String::from(match kind {
        DeviceKind::Character => "Character devices:\n",
        DeviceKind::Block => "Block devices:\n",
    });
    for dev in majors {
        let _ = writeln!(out, "{:>3} {}", dev.major, dev.name);
    }
    out
}
