//! /version 与 /sys/kernel/* 生成器

use vfs::Interrupt;

use super::{ContentGenerator, GenContext, line};
use crate::ops::OsInfo;

/// `/version` 内容生成器。
pub struct VersionGenerator;

impl ContentGenerator for VersionGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let info = cx.fetch("version", cx.ops().os_info())?;
        Ok(render_version(&info))
    }
}

/// `/sys/kernel` 下的单值文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelField {
    /// 主机名
    Hostname,
    /// 系统族标签
    OsType,
    /// 发行版本
    OsRelease,
    /// 名称与构建号
    Version,
}

/// `/sys/kernel/*` 内容生成器。
pub struct KernelGenerator(pub KernelField);

impl ContentGenerator for KernelGenerator {
    fn generate(&self, cx: &GenContext<'_>) -> Result<String, Interrupt> {
        let info = cx.fetch("sys/kernel", cx.ops().os_info())?;
        Ok(render_field(&info, self.0))
    }
}

/// `{name} version {version} (build {build}) {arch}`，系统名未知时为空
pub fn render_version(info: &OsInfo) -> String {
    if info.name.is_empty() {
        return String::new();
    }
    format!(
        "{} version {} (build {}) {}\n",
        info.name, info.version, info.build, info.arch
    )
}

/// 单值文件，值为空时内容为空
pub fn render_field(info: &OsInfo, field: KernelField) -> String {
    match field {
        KernelField::Hostname => line(&info.hostname),
        KernelField::OsType => line(&info.os_type),
        KernelField::OsRelease => line(&info.release),
        KernelField::Version => {
            if info.name.is_empty() {
                String::new()
            } else {
                line(format!("{} {}", info.name, info.build).trim_end())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OsInfo {
        OsInfo {
            name: "Windows".into(),
            version: "10.0".into(),
            build: "19045".into(),
            arch: "x86_64".into(),
            hostname: "build-box".into(),
            os_type: "Windows_NT".into(),
            release: "10.0.19045".into(),
        }
    }

    #[test]
    fn version_line() {
        assert_eq!(
            render_version(&sample()),
            "Windows version 10.0 (build 19045) x86_64\n"
        );
        assert_eq!(render_version(&OsInfo::default()), "");
    }

    #[test]
    fn kernel_fields() {
        let info = sample();
        assert_eq!(render_field(&info, KernelField::Hostname), "build-box\n");
        assert_eq!(render_field(&info, KernelField::OsType), "Windows_NT\n");
        assert_eq!(render_field(&info, KernelField::OsRelease), "10.0.19045\n");
        assert_eq!(render_field(&info, KernelField::Version), "Windows 19045\n");
        assert_eq!(
            render_field(&OsInfo::default(), KernelField::Hostname),
            ""
        );
    }
}
