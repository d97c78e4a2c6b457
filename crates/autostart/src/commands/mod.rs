pub mod add;
pub mod backend;
pub mod groups;
pub mod init;
pub mod list;
pub mod remove;
pub mod state;
