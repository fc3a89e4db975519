pub mod init;
pub mod state_vector;
