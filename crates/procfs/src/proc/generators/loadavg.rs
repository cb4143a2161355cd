//! /loadavg 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::LoadAverage;

/// `/loadavg` 内容生成器。
pub struct LoadavgGenerator;

impl ContentGenerator for LoadavgGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let load = cx.fetch("loadavg", cx.ops().load_average())?;
        Ok(render(&load))
    }
}

/// `load1 load5 load15 running/total last_pid`
pub fn render(load: &LoadAverage) -> String {
    format!(
        "{:.2} {:.2} {:.2} {}/{} {}\n",
        load.one, load.five, load.fifteen, load.running, load.total, load.last_pid
    )
}
