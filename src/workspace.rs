//! File-backed store of named ThetaCode buffers.
//!
//! Buffers are addressed by relative, `/`-separated paths such as
//! `bots/support.tc`. Folders are created on demand when a buffer is written.

use crate::error::StorageError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Directory name that marks a workspace root.
pub const WORKSPACE_DIR: &str = ".theta";

pub struct Workspace {
    root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the workspace for the current process.
    ///
    /// `THETA_WORKSPACE` wins if set. Otherwise search upwards from the
    /// current directory for a `.theta` folder, stopping at the home directory
    /// or the filesystem root, and fall back to `./.theta`.
    pub fn discover() -> Self {
        if let Some(root) = std::env::var_os("THETA_WORKSPACE") {
            return Self::new(root);
        }

        let Ok(start) = std::env::current_dir() else {
            return Self::new(WORKSPACE_DIR);
        };

        let home_dir = get_home_dir();
        let mut current_dir = start.clone();
        loop {
            let candidate = current_dir.join(WORKSPACE_DIR);
            if candidate.is_dir() {
                return Self::new(candidate);
            }

            if home_dir.as_deref() == Some(current_dir.as_path()) {
                break;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => break,
            }
        }

        Self::new(start.join(WORKSPACE_DIR))
    }

    /// Write a buffer, creating parent folders as needed.
    pub fn create(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        info!(path, bytes = content.len(), "saved buffer");
        Ok(())
    }

    /// Create an empty buffer, refusing to touch one that already exists.
    pub fn create_new(&self, path: &str) -> Result<(), StorageError> {
        if self.exists(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        self.create(path, "")
    }

    pub fn read(&self, path: &str) -> Result<String, StorageError> {
        let target = self.resolve(path)?;
        if !target.is_file() {
            return Err(StorageError::NotFound(path.to_string()));
        }
        Ok(fs::read_to_string(target)?)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Remove every buffer and folder in the workspace.
    pub fn delete_all(&self) -> Result<(), StorageError> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        info!(root = %self.root.display(), "deleted all buffers");
        Ok(())
    }

    /// Folder/file tree of the workspace, children sorted by name.
    pub fn tree(&self) -> Result<Node, StorageError> {
        let children = if self.root.is_dir() {
            read_children(&self.root)?
        } else {
            Vec::new()
        };
        Ok(Node {
            name: "workspace".to_string(),
            kind: NodeKind::Folder,
            children,
        })
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let valid = !path.trim().is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !valid {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

fn read_children(dir: &Path) -> Result<Vec<Node>, StorageError> {
    let mut nodes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let node = if entry.file_type()?.is_dir() {
            Node {
                name,
                kind: NodeKind::Folder,
                children: read_children(&entry.path())?,
            }
        } else {
            Node {
                name,
                kind: NodeKind::File,
                children: Vec::new(),
            }
        };
        nodes.push(node);
    }
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(nodes)
}

/// Indented text rendering of a tree, one node per line.
pub fn render_tree(node: &Node) -> String {
    let mut lines = Vec::new();
    render_node(node, 0, &mut lines);
    lines.join("\n")
}

fn render_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let marker = match node.kind {
        NodeKind::Folder => "📁",
        NodeKind::File => "📄",
    };
    lines.push(format!("{}{} {}", "  ".repeat(depth), marker, node.name));
    for child in &node.children {
        render_node(child, depth + 1, lines);
    }
}

/// Get the user's home directory in a cross-platform way.
fn get_home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
