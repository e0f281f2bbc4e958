mod course;
mod report;
mod student;
mod teacher;
mod watch;

pub use course::CourseCommands;
pub use report::ReportCommands;
pub use student::{StudentAddArgs, StudentCommands};
pub use teacher::TeacherCommands;
pub use watch::WatchCommands;
