use clap::Subcommand;

/// Course catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// Add a course to the catalog.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        ects: f32,
        #[arg(long)]
        level: String,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List courses, optionally for one level or teacher.
    List {
        #[arg(long, conflicts_with = "teacher")]
        level: Option<String>,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a course by ID.
    Get {
        id: String,
        /// Include enrolled students
        #[arg(long)]
        students: bool,
    },
    /// Assign or unassign the course's teacher.
    Assign {
        id: String,
        #[arg(long, conflicts_with = "unassign", required_unless_present = "unassign")]
        teacher: Option<String>,
        #[arg(long)]
        unassign: bool,
    },
    /// Delete a course and its enrollments.
    Delete { id: String },
}
