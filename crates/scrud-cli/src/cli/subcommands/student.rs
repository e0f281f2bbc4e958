use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Student account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Register a student.
    Add(StudentAddArgs),
    /// List students by name.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a student by ID.
    Get { id: String },
    /// Update profile fields.
    Update {
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },
    /// Delete a student and their enrollments.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct StudentAddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: NaiveDate,
    /// male or female
    #[arg(long)]
    pub gender: String,
    /// Level code (defaults to `general.default_level`)
    #[arg(long)]
    pub level: Option<String>,
}
