use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "reqres")]
#[command(about = "A CLI for the reqres.in demo user API", version)]
#[command(after_help = "EXAMPLES:
    reqres users                      List the first page of users
    reqres users --page 2             List the second page
    reqres user show 2                Show a user and fetch their avatar
    reqres user avatar 2 -o face.jpg  Save a user's avatar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log requests and show error causes
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users, one page at a time
    #[command(after_help = "EXAMPLES:
    reqres users
    reqres users --page 2 --json")]
    Users(UsersArgs),
    /// Inspect a single user
    #[command(after_help = "EXAMPLES:
    reqres user show 2
    reqres user show 2 --avatar-out janet.jpg
    reqres user avatar 2 -o janet.jpg")]
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    reqres completions bash > ~/.bash_completion.d/reqres
    reqres completions zsh > ~/.zfunc/_reqres
    reqres completions fish > ~/.config/fish/completions/reqres.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    reqres init")]
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Show a user's name and email, then fetch their avatar
    Show(UserShowArgs),
    /// Download a user's avatar to a file
    Avatar(AvatarArgs),
}

#[derive(Args, Clone)]
pub struct UsersArgs {
    /// Page number; values of 1 or less request the first page
    #[arg(long, short, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,
}

#[derive(Args, Clone)]
pub struct UserShowArgs {
    /// User ID
    #[arg(allow_negative_numbers = true)]
    pub id: i64,

    /// Save the avatar here when it is a recognizable image
    #[arg(long)]
    pub avatar_out: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct AvatarArgs {
    /// User ID
    #[arg(allow_negative_numbers = true)]
    pub id: i64,

    /// Destination file
    #[arg(long, short)]
    pub output: PathBuf,
}
