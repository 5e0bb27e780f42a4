use crate::areas::repository::Repository;
use crate::areas::workspace::EntryKind;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::path::Path;

impl Repository {
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let tree_id = self.build_tree(Path::new(""))?;

        writeln!(self.writer(), "{}", tree_id)?;

        Ok(())
    }

    /// Build the tree object graph for one directory, depth-first post-order
    ///
    /// Every descendant blob and sub-tree is persisted before the directory's
    /// own tree object, so the returned identifier always names a complete
    /// graph. The control directory is skipped; symbolic links and special
    /// files are not tracked.
    pub fn build_tree(&self, dir_path: &Path) -> anyhow::Result<ObjectId> {
        let mut tree = Tree::default();

        for child in self.workspace().list_dir(dir_path)? {
            let name = child
                .file_name()
                .and_then(|name| name.to_str())
                .context("Invalid file name")?
                .to_string();

            match self.workspace().entry_kind(&child)? {
                EntryKind::Directory => {
                    let oid = self.build_tree(&child)?;
                    tree.add_directory(&name, oid);
                }
                EntryKind::File => {
                    let blob = Blob::new(self.workspace().read_file(&child)?);
                    let oid = self.database().store(blob)?;
                    tree.add_file(&name, oid);
                }
                EntryKind::Other => {}
            }
        }

        Ok(self.database().store(tree)?)
    }
}
