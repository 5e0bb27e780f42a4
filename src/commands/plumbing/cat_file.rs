use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn cat_file(&mut self, object_sha: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_sha.to_string())?;

        // blob content is written byte for byte; trees and commits in their
        // display form
        match self.database().parse_object(&oid)? {
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            ObjectBox::Tree(tree) => writeln!(self.writer(), "{}", tree.display())?,
            ObjectBox::Commit(commit) => write!(self.writer(), "{}", commit.display())?,
        }

        Ok(())
    }
}
