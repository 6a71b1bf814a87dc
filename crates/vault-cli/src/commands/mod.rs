pub mod init;
pub mod secrets;
pub mod shell;
