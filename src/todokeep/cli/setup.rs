use clap::{Parser, Subcommand};
use todokeep::model::TodoFilter;

#[derive(Parser, Debug)]
#[command(name = "todokeep", bin_name = "todokeep", version)]
#[command(about = "A todo list that keeps what you delete for a week", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set your display name
    #[command(display_order = 1)]
    Name {
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Add a todo
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Todo text (words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// List todos
    #[command(alias = "ls", display_order = 3)]
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: TodoFilter,
    },

    /// Toggle completion of one or more todos
    #[command(alias = "t", display_order = 4)]
    Toggle {
        /// Indexes of the todos (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Change the text of a todo
    #[command(alias = "e", display_order = 5)]
    Edit {
        /// Index of the todo
        index: String,

        /// New text
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Move todos to recently deleted
    #[command(alias = "rm", display_order = 6)]
    Delete {
        /// Indexes of the todos (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Move every completed todo to recently deleted
    #[command(display_order = 7)]
    ClearCompleted,

    /// List recently deleted todos
    #[command(display_order = 10)]
    Trash,

    /// Bring recently deleted todos back
    #[command(display_order = 11)]
    Restore {
        /// Indexes of deleted todos (e.g. d1 d2-d4)
        indexes: Vec<String>,

        /// Restore everything in recently deleted
        #[arg(long, conflicts_with = "indexes")]
        all: bool,
    },

    /// Permanently delete recently deleted todos (all when no index is given)
    #[command(display_order = 12)]
    Purge {
        /// Indexes of deleted todos (e.g. d1 d2-d4)
        indexes: Vec<String>,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Drop expired entries from recently deleted now
    #[command(display_order = 13)]
    Sweep,

    /// Show storage statistics
    #[command(display_order = 20)]
    Status,

    /// Remove your name, all todos and recently deleted
    #[command(display_order = 21)]
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or set configuration
    #[command(display_order = 22)]
    Config {
        /// Configuration key (e.g. trash-capacity)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
