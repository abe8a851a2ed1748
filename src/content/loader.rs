//! Content loader - reads the markdown post collection from disk

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{frontmatter, PostData};
use crate::error::{ContentError, Result};

/// A parsed collection entry, before normalization
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// Path relative to the collection root, without extension
    /// (`notes/hello-world.md` becomes `notes/hello-world`)
    pub id: String,
    pub data: PostData,
    /// Markdown after the front-matter block
    pub body: String,
}

/// A directory of markdown files with YAML front-matter
#[derive(Debug, Clone)]
pub struct DirectoryCollection {
    root: PathBuf,
}

impl DirectoryCollection {
    /// Create a collection rooted at `root`
    ///
    /// A missing directory is an empty collection; a path that exists but is
    /// not a directory is rejected.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if root.exists() && !root.is_dir() {
            return Err(ContentError::InvalidContentDir(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every entry on a blocking worker
    pub async fn load(&self) -> Result<Vec<RawEntry>> {
        let collection = self.clone();
        tokio::task::spawn_blocking(move || collection.load_sync())
            .await
            .map_err(|e| ContentError::Io(std::io::Error::other(e)))?
    }

    /// Load every entry, in file-name order
    pub fn load_sync(&self) -> Result<Vec<RawEntry>> {
        if !self.root.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::Io(std::io::Error::other(e)))?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                entries.push(self.load_entry(path)?);
            }
        }

        tracing::debug!("Loaded {} entries from {:?}", entries.len(), self.root);
        Ok(entries)
    }

    /// Load a single entry from a file
    fn load_entry(&self, path: &Path) -> Result<RawEntry> {
        let id = entry_id(&self.root, path);
        let content = fs::read_to_string(path)?;
        let (data, body) = frontmatter::parse(&content)
            .map_err(|message| ContentError::InvalidEntry {
                id: id.clone(),
                message,
            })?;

        Ok(RawEntry {
            id,
            data,
            body: body.to_string(),
        })
    }
}

/// Relative path with `/` separators and no extension
fn entry_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown" || e == "mdx")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const POST: &str = "---\ntitle: First\nimage: a.png\ndate: 2024-01-01\ncategory: Tech\n---\nBody text\n";

    #[test]
    fn test_load_entries_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.md", POST);
        write(dir.path(), "a.markdown", POST);
        write(dir.path(), "nested/c.md", POST);
        write(dir.path(), "notes.txt", "ignored");

        let collection = DirectoryCollection::new(dir.path()).unwrap();
        let entries = collection.load_sync().unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "nested/c"]);
        assert_eq!(entries[0].body, "Body text\n");
        assert_eq!(entries[0].data.title, "First");
    }

    #[test]
    fn test_entry_id_drops_extension() {
        let root = Path::new("/blog/posts");
        assert_eq!(entry_id(root, &root.join("hello-world.md")), "hello-world");
        assert_eq!(entry_id(root, &root.join("notes/deep.mdx")), "notes/deep");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let collection = DirectoryCollection::new(dir.path().join("absent")).unwrap();
        assert!(collection.load_sync().unwrap().is_empty());
    }

    #[test]
    fn test_file_as_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "file.md", POST);
        let err = DirectoryCollection::new(dir.path().join("file.md")).unwrap_err();
        assert!(matches!(err, ContentError::InvalidContentDir(_)));
    }

    #[test]
    fn test_invalid_entry_fails_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.md", POST);
        write(dir.path(), "bad.md", "---\ntitle: Missing fields\n---\n");

        let collection = DirectoryCollection::new(dir.path()).unwrap();
        match collection.load_sync() {
            Err(ContentError::InvalidEntry { id, .. }) => assert_eq!(id, "bad"),
            other => panic!("expected invalid entry, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_async_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "post.md", POST);
        let collection = DirectoryCollection::new(dir.path()).unwrap();
        assert_eq!(collection.load().await.unwrap().len(), 1);
    }
}
