//! Reconstruction of the archive's directory tree
//!

use tracing::{debug, warn};

use crate::names::NameTable;
use crate::types::{Arc0DirectoryRecord, Arc0FileRecord, HashRecord};

/// One node of the reconstructed archive tree.
///
/// The root is synthetic (`is_directory`, named `"root"`) and owns the
/// directory nodes in directory-table order; each directory owns its file
/// nodes in file-table order. The tree is rebuilt from scratch on every
/// parse and is a plain owned snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveNode {
    /// Resolved, case-folded name of this node
    pub name: String,

    /// Whether this node is the root or a directory
    pub is_directory: bool,

    /// Child nodes, in on-disk record order
    pub children: Vec<ArchiveNode>,

    /// Global file index for file nodes, used for extraction.
    ///
    /// Synthesized `file_<index>` names carry no guarantee of matching any
    /// real archive name; the index is the authoritative identity.
    pub file_index: Option<usize>,
}

impl ArchiveNode {
    fn directory(name: String) -> ArchiveNode {
        ArchiveNode {
            name,
            is_directory: true,
            children: Vec::new(),
            file_index: None,
        }
    }

    fn file(name: String, file_index: usize) -> ArchiveNode {
        ArchiveNode {
            name,
            is_directory: false,
            children: Vec::new(),
            file_index: Some(file_index),
        }
    }

    /// Whether this node is a file.
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// Find a direct child by name, case-insensitively.
    pub fn child(&self, name: &str) -> Option<&ArchiveNode> {
        let folded = name.to_lowercase();
        self.children.iter().find(|c| c.name == folded)
    }
}

/// Outcome of one name-resolution attempt.
///
/// The format carries two resolution schemes (hash-indexed and raw-offset);
/// resolution is attempted hash-first for every entry, and the tag records
/// which strategy produced the name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NameResolution {
    /// The hash table had a matching entry
    Resolved(String),
    /// The fallback path produced a usable name
    Fallback(String),
    /// Neither strategy produced a name
    Unresolved,
}

impl NameResolution {
    fn into_name(self) -> String {
        match self {
            NameResolution::Resolved(name) | NameResolution::Fallback(name) => name.to_lowercase(),
            NameResolution::Unresolved => String::new(),
        }
    }
}

fn hash_lookup(hashes: &[HashRecord], index: u32) -> Option<&HashRecord> {
    hashes.iter().find(|h| h.index == index)
}

/// Resolve a directory's name: hash table at the synthetic index
/// `first_file_index - 1`, then the raw name offset stored in the record.
pub(crate) fn resolve_directory_name(
    record: &Arc0DirectoryRecord,
    hashes: &[HashRecord],
    names: &NameTable,
) -> NameResolution {
    if let Some(hit) = record
        .synthetic_index()
        .and_then(|index| hash_lookup(hashes, index))
    {
        // A stale hash offset resolves to an empty string; treat that as a
        // miss so the raw-offset strategy still gets a try.
        let name = names.resolve(hit.name_offset);
        if !name.is_empty() {
            return NameResolution::Resolved(name);
        }
    }

    let name = names.resolve_clamped(record.directory_name_offset);
    if name.is_empty() {
        NameResolution::Unresolved
    } else {
        NameResolution::Fallback(name)
    }
}

/// Resolve a file's name: hash table at its global index, then a synthesized
/// placeholder embedding the index. A missing name never aborts the build.
pub(crate) fn resolve_file_name(
    file_index: usize,
    hashes: &[HashRecord],
    names: &NameTable,
) -> NameResolution {
    if let Some(hit) = hash_lookup(hashes, file_index as u32) {
        let name = names.resolve(hit.name_offset);
        if !name.is_empty() {
            return NameResolution::Resolved(name);
        }
    }

    NameResolution::Fallback(format!("file_{file_index}"))
}

/// Rebuild the directory/file tree from the decoded tables.
///
/// Per-entry resolution failures degrade to fallback names; file indices
/// pointing outside the file table are skipped. Neither is fatal, since the
/// record tables and the hash table can disagree in hand-edited archives.
pub(crate) fn build_tree(
    directories: &[Arc0DirectoryRecord],
    files: &[Arc0FileRecord],
    hashes: &[HashRecord],
    names: &NameTable,
) -> ArchiveNode {
    let mut root = ArchiveNode::directory("root".into());

    for record in directories {
        let resolution = resolve_directory_name(record, hashes, names);
        debug!(?resolution, "directory name");
        let mut node = ArchiveNode::directory(resolution.into_name());

        for i in 0..record.file_count.max(0) as usize {
            let file_index = usize::from(record.first_file_index) + i;
            if file_index >= files.len() {
                warn!(file_index, "file index outside the file table, skipping");
                continue;
            }

            let name = resolve_file_name(file_index, hashes, names).into_name();
            node.children.push(ArchiveNode::file(name, file_index));
        }

        root.children.push(node);
    }

    root
}
