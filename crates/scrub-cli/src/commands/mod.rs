pub mod completions;
pub mod init;
pub mod scan;
