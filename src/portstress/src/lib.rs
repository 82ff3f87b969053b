pub mod config;
pub mod connect;
pub mod error;
pub mod port_bank;
pub mod process;
pub mod session;
pub mod stop;

pub use config::Config;
pub use error::{Error, Result};
