//! /uptime 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::Uptime;

/// `/uptime` 内容生成器。
pub struct UptimeGenerator;

impl ContentGenerator for UptimeGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let uptime = cx.fetch("uptime", cx.ops().uptime())?;
        Ok(render(&uptime))
    }
}

/// 秒数保留两位小数
pub fn render(uptime: &Uptime) -> String {
    format!(
        "{}.{:02} {}.{:02}\n",
        uptime.uptime.as_secs(),
        uptime.uptime.subsec_millis() / 10,
        uptime.idle.as_secs(),
        uptime.idle.subsec_millis() / 10
    )
}
