//! /mounts 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::MountInfo;

/// `/mounts` 内容生成器。
pub struct MountsGenerator;

impl ContentGenerator for MountsGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let mounts = cx.fetch("mounts", cx.ops().list_mounts())?;
        Ok(render(&mounts))
    }
}

/// `device: root fs_type rw|ro 0 0`，设备名为空时写作 `none`
pub fn render(mounts: &[MountInfo]) -> String {
    let mut content = String::new();

    for mount in mounts {
        let device = if mount.device.is_empty() {
            "none"
        } else {
            &mount.device
        };
        let options = if mount.read_only { "ro" } else { "rw" };

        let _ = writeln!(
            content,
            "{}: {} {} {} 0 0",
            device, mount.path, mount.fs_type, options
        );
    }

    content
}
