use anyhow::Result;
use clap::{Parser, Subcommand};
use mit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "mit",
    version = "0.1.0",
    about = "A minimal git object database",
    long_about = "This is a minimal implementation of git's object layer, written in Rust. \
    It is not meant to be a full replacement for git, \
    but rather a learning project to understand how git stores content under the hood.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the decoded content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes an object file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree object. \
        A commit SHA is accepted and resolved to its root tree."
    )]
    LsTree {
        #[arg(long = "name-only", help = "Print only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree SHA to list")]
        sha: String,
    },
    #[command(
        name = "write-tree",
        about = "Write the working directory as tree objects",
        long_about = "This command records the current working directory as a graph of blob and tree \
        objects and prints the SHA of the root tree."
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object for a tree",
        long_about = "This command creates a commit object referencing the given tree, with the author \
        taken from the GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL environment variables."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA to commit")]
        tree: String,
        #[arg(short, long, help = "The SHA of the parent commit")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::CatFile { sha } => {
            let mut repository = open_repository()?;

            repository.cat_file(sha)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = open_repository()?;

            repository.hash_object(file, *write)?
        }
        Commands::LsTree { name_only, sha } => {
            let mut repository = open_repository()?;

            repository.ls_tree(sha, *name_only)?
        }
        Commands::WriteTree => {
            let mut repository = open_repository()?;

            repository.write_tree()?
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            let mut repository = open_repository()?;

            repository.commit_tree(tree, parent.as_deref(), message)?
        }
    }

    Ok(())
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}
