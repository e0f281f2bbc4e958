use clap::Subcommand;

/// Teacher account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TeacherCommands {
    /// Register a teacher.
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// male or female
        #[arg(long)]
        gender: String,
    },
    /// List teachers by name.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a teacher by ID.
    Get { id: String },
    /// Delete a teacher. Their courses become unassigned.
    Delete { id: String },
}
