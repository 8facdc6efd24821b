pub mod grades;
pub mod init;
pub mod levels;
pub mod report;
pub mod validate;
