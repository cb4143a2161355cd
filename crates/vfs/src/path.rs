//! 路径解析引擎
//!
//! 该模块实现了 VFS 的路径解析功能，负责将路径字符串转换为 Inode。
//!
//! 支持的典型语义：
//!
//! - 分隔符采用宿主约定：所有平台都接受 `/`，Windows 上同时接受 `\`
//! - 空段被忽略；`.` 表示当前目录，解析时跳过
//! - `..` 在遍历中逐段处理，返回上一级已解析的节点，在根处被吸收
//! - 命名空间只有一个根，相对路径同样从根开始解析
//! - 不做通配符展开，也没有符号链接

use std::mem;
use std::path::is_separator;
use std::sync::Arc;

use log::debug;

use crate::{FsError, Inode, InodeType, OpContext};

/// 路径组件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// 根目录 "/"
    Root,
    /// 当前目录 "."
    Current,
    /// 父目录 ".."
    Parent,
    /// 正常的文件名
    Normal(String),
}

/// 将路径字符串解析为组件列表
pub fn parse_path(path: &str) -> Vec<PathComponent> {
    let mut components = Vec::new();

    // 绝对路径以 Root 开始
    if path.starts_with(is_separator) {
        components.push(PathComponent::Root);
    }

    // 分割路径并解析每个部分
    for part in path.split(is_separator).filter(|s| !s.is_empty()) {
        let component = match part {
            "." => PathComponent::Current,
            ".." => PathComponent::Parent,
            name => PathComponent::Normal(String::from(name)),
        };
        components.push(component);
    }

    components
}

/// 从指定的根节点开始解析路径
///
/// 每个非末尾段（包括 `.` 和 `..`）都必须解析到目录：
///
/// - 某段没有匹配的子项 → [`FsError::NotFound`]
/// - 中间段是叶子节点 → [`FsError::NotDirectory`]
///
/// `..` 只回到已经查找成功的上一级，因此 `/meminfo/..` 和 `/<不存在>/..` 都会失败。
/// 每一段处理之前都会检查取消令牌。
pub fn vfs_lookup_from(
    root: Arc<dyn Inode>,
    path: &str,
    ctx: &OpContext,
) -> Result<Arc<dyn Inode>, FsError> {
    let mut ancestors: Vec<Arc<dyn Inode>> = Vec::new();
    let mut current = root;

    for component in parse_path(path) {
        if component == PathComponent::Root {
            continue;
        }
        ctx.checkpoint()?;

        if current.metadata()?.inode_type != InodeType::Directory {
            return Err(FsError::NotDirectory);
        }

        match component {
            PathComponent::Root | PathComponent::Current => {}
            PathComponent::Parent => {
                if let Some(parent) = ancestors.pop() {
                    current = parent;
                }
            }
            PathComponent::Normal(name) => {
                let next = current.lookup(&name, ctx)?;
                ancestors.push(mem::replace(&mut current, next));
            }
        }
    }

    debug!("vfs: resolved '{}' -> '{}'", path, current.full_path());
    Ok(current)
}
