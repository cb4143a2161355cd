use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use vfs::{
    CancelToken, DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType, OpContext,
    PathComponent, parse_path, vfs_lookup_from,
};

#[test]
fn test_parse_path_components() {
    let components = parse_path("/foo/bar");
    assert_eq!(components.len(), 3);
    assert_eq!(components[0], PathComponent::Root);
    assert_eq!(components[1], PathComponent::Normal("foo".to_string()));
    assert_eq!(components[2], PathComponent::Normal("bar".to_string()));

    let components = parse_path("foo/./bar/../baz");
    assert_eq!(components.len(), 5);
    assert_eq!(components[0], PathComponent::Normal("foo".to_string()));
    assert_eq!(components[1], PathComponent::Current);
    assert_eq!(components[2], PathComponent::Normal("bar".to_string()));
    assert_eq!(components[3], PathComponent::Parent);
    assert_eq!(components[4], PathComponent::Normal("baz".to_string()));
}

#[test]
fn test_parse_path_ignores_empty_segments() {
    assert_eq!(parse_path("///foo///bar///").len(), 3);
    assert!(parse_path("").is_empty());
}

#[cfg(windows)]
#[test]
fn test_backslash_is_separator_on_windows() {
    assert_eq!(
        parse_path(r"\net\dev"),
        vec![
            PathComponent::Root,
            PathComponent::Normal("net".to_string()),
            PathComponent::Normal("dev".to_string()),
        ]
    );
}

#[cfg(not(windows))]
#[test]
fn test_backslash_is_a_name_character_elsewhere() {
    assert_eq!(parse_path(r"\net"), vec![PathComponent::Normal(r"\net".to_string())]);
}

/// 测试用的内存树节点
struct TreeNode {
    name: String,
    ino: usize,
    children: Option<BTreeMap<String, Arc<TreeNode>>>,
}

impl TreeNode {
    fn leaf(name: &str, ino: usize) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            ino,
            children: None,
        })
    }

    fn dir(name: &str, ino: usize, children: Vec<Arc<TreeNode>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            ino,
            children: Some(children.into_iter().map(|c| (c.name.clone(), c)).collect()),
        })
    }
}

impl Inode for TreeNode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        let (inode_type, mode) = match self.children {
            Some(_) => (InodeType::Directory, FileMode::read_only_dir()),
            None => (InodeType::File, FileMode::read_only_file()),
        };
        Ok(InodeMetadata {
            inode_no: self.ino,
            inode_type,
            mode,
            size: 0,
            nlinks: 1,
        })
    }

    fn read_all(&self, _ctx: &OpContext) -> Result<String, FsError> {
        match self.children {
            Some(_) => Err(FsError::IsDirectory),
            None => Ok(format!("content of {}\n", self.name)),
        }
    }

    fn lookup(&self, name: &str, _ctx: &OpContext) -> Result<Arc<dyn Inode>, FsError> {
        let children = self.children.as_ref().ok_or(FsError::NotDirectory)?;
        children
            .get(name)
            .cloned()
            .map(|c| c as Arc<dyn Inode>)
            .ok_or(FsError::NotFound)
    }

    fn readdir(&self, _ctx: &OpContext) -> Result<Vec<DirEntry>, FsError> {
        let children = self.children.as_ref().ok_or(FsError::NotDirectory)?;
        Ok(children
            .values()
            .map(|c| DirEntry {
                name: c.name.clone(),
                inode_no: c.ino,
                inode_type: if c.children.is_some() {
                    InodeType::Directory
                } else {
                    InodeType::File
                },
            })
            .collect())
    }

    fn full_path(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn sample_tree() -> Arc<dyn Inode> {
    TreeNode::dir(
        "/",
        1,
        vec![
            TreeNode::leaf("meminfo", 2),
            TreeNode::dir("net", 3, vec![TreeNode::leaf("dev", 4)]),
        ],
    )
}

#[test]
fn test_lookup_walks_segments() {
    let ctx = OpContext::new();
    let node = vfs_lookup_from(sample_tree(), "/net/dev", &ctx).unwrap();
    assert_eq!(node.metadata().unwrap().inode_no, 4);
    assert_eq!(node.read_all(&ctx).unwrap(), "content of dev\n");

    let root = vfs_lookup_from(sample_tree(), "/", &ctx).unwrap();
    assert_eq!(root.metadata().unwrap().inode_no, 1);
}

#[test]
fn test_lookup_parent_returns_to_resolved_directory() {
    let ctx = OpContext::new();
    let node = vfs_lookup_from(sample_tree(), "/net/../../meminfo", &ctx).unwrap();
    assert_eq!(node.metadata().unwrap().inode_no, 2);

    let node = vfs_lookup_from(sample_tree(), "net/./dev/", &ctx).unwrap();
    assert_eq!(node.metadata().unwrap().inode_no, 4);

    let root = vfs_lookup_from(sample_tree(), "/net/..", &ctx).unwrap();
    assert_eq!(root.metadata().unwrap().inode_no, 1);
}

#[test]
fn test_lookup_parent_checks_every_segment() {
    let ctx = OpContext::new();
    assert_eq!(
        vfs_lookup_from(sample_tree(), "/meminfo/../net", &ctx).err(),
        Some(FsError::NotDirectory)
    );
    assert_eq!(
        vfs_lookup_from(sample_tree(), "/meminfo/.", &ctx).err(),
        Some(FsError::NotDirectory)
    );
    assert_eq!(
        vfs_lookup_from(sample_tree(), "/missing/../meminfo", &ctx).err(),
        Some(FsError::NotFound)
    );
}

#[test]
fn test_lookup_errors() {
    let ctx = OpContext::new();
    assert_eq!(
        vfs_lookup_from(sample_tree(), "/nope", &ctx).err(),
        Some(FsError::NotFound)
    );
    assert_eq!(
        vfs_lookup_from(sample_tree(), "/meminfo/x", &ctx).err(),
        Some(FsError::NotDirectory)
    );
}

#[test]
fn test_lookup_honours_cancellation() {
    let token = CancelToken::new();
    token.cancel();
    let ctx = OpContext::new().with_cancel(token);
    assert_eq!(
        vfs_lookup_from(sample_tree(), "/net/dev", &ctx).err(),
        Some(FsError::Cancelled)
    );
}

#[test]
fn test_lookup_result_downcasts() {
    let ctx = OpContext::new();
    let node = vfs_lookup_from(sample_tree(), "/meminfo", &ctx).unwrap();
    assert!(node.downcast_ref::<TreeNode>().is_some());
}
