use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit_tree(
        &mut self,
        tree_sha: &str,
        parent_sha: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_oid = ObjectId::try_parse(tree_sha.to_string())?;
        let parents = match parent_sha {
            Some(parent_sha) => vec![ObjectId::try_parse(parent_sha.to_string())?],
            None => vec![],
        };

        let author = Author::load_from_env()?;
        let commit = Commit::new(parents, tree_oid, author, message.to_string());

        let commit_id = self.database().store(commit)?;

        writeln!(self.writer(), "{}", commit_id)?;

        Ok(())
    }
}
