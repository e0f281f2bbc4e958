use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CourseCommands, ReportCommands, StudentCommands, TeacherCommands, WatchCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Student accounts.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Teacher accounts.
    Teacher {
        #[command(subcommand)]
        action: TeacherCommands,
    },
    /// Course catalog.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Enroll a student in a course.
    Enroll(EnrollmentArgs),
    /// Remove a student from a course.
    Unenroll(EnrollmentArgs),
    /// Record a student's score in a course.
    Grade(GradeArgs),
    /// Check credentials and print the resolved identity.
    Login(LoginArgs),
    /// List level codes used by the catalog.
    Levels,
    /// Derived reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Stream a derived view until interrupted.
    Watch {
        #[command(subcommand)]
        action: WatchCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct EnrollmentArgs {
    pub student_id: String,
    pub course_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct GradeArgs {
    pub student_id: String,
    pub course_id: String,
    #[arg(allow_negative_numbers = true)]
    pub score: f32,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// student or teacher
    #[arg(long, default_value = "student")]
    pub role: String,
}
