use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn ls_tree(&mut self, object_sha: &str, name_only: bool) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_sha.to_string())?;

        // a commit id is accepted and resolved to its root tree
        let oid = match self.database().parse_object_as_commit(&oid)? {
            Some(commit) => commit.tree_oid().clone(),
            None => oid,
        };

        let tree = self
            .database()
            .parse_object_as_tree(&oid)?
            .ok_or_else(|| anyhow::anyhow!("not a tree object: {}", oid))?;

        for (name, entry) in tree.entries() {
            if name_only {
                writeln!(self.writer(), "{}", name)?;
            } else {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.mode.object_type().as_str(),
                    entry.oid.as_ref(),
                    name
                )?;
            }
        }

        Ok(())
    }
}
