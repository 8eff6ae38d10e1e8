pub mod add;
pub mod config;
pub mod list;
pub mod login;
pub mod logout;
pub mod remind;
pub mod remove;
pub mod settings;
pub mod update;
pub mod watch;
pub mod whoami;
