pub mod course;
pub mod dispatch;
pub mod enrollment;
pub mod levels;
pub mod login;
pub mod report;
pub mod shared;
pub mod student;
pub mod teacher;
pub mod watch;
