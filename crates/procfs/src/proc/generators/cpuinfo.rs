//! /cpuinfo 生成器

use std::fmt::Write;

use vfs::Interrupt;

use super::{ContentGenerator, GenContext};
use crate::ops::CpuInfo;

/// `/cpuinfo` 内容生成器。
pub struct CpuinfoGenerator;

impl ContentGenerator for CpuinfoGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let cpus = cx.fetch("cpuinfo", cx.ops().cpus())?;
        Ok(render(&cpus))
    }
}

/// 每个逻辑 CPU 一条记录，记录之间以空行分隔
pub fn render(cpus: &[CpuInfo]) -> String {
    let mut out = String::new();

    for (processor, cpu) in cpus.iter().enumerate() {
        let _ = write!(
            out,
            "processor\t: {}\n\
             vendor_id\t: {}\n\
             cpu family\t: {}\n\
             model\t\t: {}\n\
             model name\t: {}\n\
             stepping\t: {}\n\
             cpu MHz\t\t: {:.3}\n\
             cache size\t: {} KB\n\
             physical id\t: {}\n\
             siblings\t: {}\n\
             core id\t\t: {}\n\
             cpu cores\t: {}\n\
             flags\t\t: {}\n\n",
            processor,
            cpu.vendor_id,
            cpu.family,
            cpu.model,
            cpu.model_name,
            cpu.stepping,
            cpu.mhz,
            cpu.cache_size_kb,
            cpu.physical_id,
            cpu.siblings,
            cpu.core_id,
            cpu.cpu_cores,
            cpu.flags.join(" "),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_record_per_cpu() {
        let cpu = CpuInfo {
            vendor_id: "GenuineIntel".into(),
            model_name: "Test CPU".into(),
            mhz: 2400.5,
            cache_size_kb: 8192,
            siblings: 2,
            cpu_cores: 2,
            flags: vec!["fpu".into(), "sse2".into()],
            ..CpuInfo::default()
        };
        let second = CpuInfo {
            core_id: 1,
            ..cpu.clone()
        };
        let out = render(&[cpu, second]);

        let records: Vec<&str> = out.split("\n\n").filter(|r| !r.is_empty()).collect();
        assert_eq!(records.len(), 2);
        assert!(records[1].starts_with("processor\t: 1\n"));
        assert!(out.contains("cpu MHz\t\t: 2400.500\n"));
        assert!(out.contains("cache size\t: 8192 KB\n"));
        assert!(out.contains("flags\t\t: fpu sse2\n"));
        assert!(out.ends_with("\n\n"));
        assert_eq!(records[0].lines().count(), 13);
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
