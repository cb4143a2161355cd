//! ProcFS 配置

use std::time::Duration;

/// ProcFS 的运行时配置
///
/// 默认值：缓存永不过期（只有强制刷新会替换缓存内容），名称比较遵循宿主约定
/// （Windows 上不区分大小写，其它平台区分）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcFsConfig {
    /// Cached 条目的存活时间，`None` 表示不按时间过期
    pub cache_ttl: Option<Duration>,
    /// 名称比较是否忽略大小写
    pub case_insensitive: bool,
}

impl Default for ProcFsConfig {
    fn default() -> Self {
        Self {
            cache_ttl: None,
            case_insensitive: cfg!(windows),
        }
    }
}

impl ProcFsConfig {
    /// 设置缓存存活时间
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// 设置名称比较是否忽略大小写
    #[must_use]
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// 按配置的大小写约定比较两个名称
    pub fn names_equal(&self, a: &str, b: &str) -> bool {
        if self.case_insensitive {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_host_convention() {
        let config = ProcFsConfig::default();
        assert_eq!(config.cache_ttl, None);
        assert_eq!(config.case_insensitive, cfg!(windows));
    }

    #[test]
    fn names_equal_respects_case_setting() {
        let sensitive = ProcFsConfig::default().with_case_insensitive(false);
        assert!(sensitive.names_equal("meminfo", "meminfo"));
        assert!(!sensitive.names_equal("MemInfo", "meminfo"));

        let insensitive = sensitive.with_case_insensitive(true);
        assert!(insensitive.names_equal("MemInfo", "meminfo"));
    }
}
