pub mod choices;
pub mod config;
pub mod init;
pub mod resolve;
pub mod run;
