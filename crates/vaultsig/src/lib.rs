pub mod cmd;
pub mod common;
pub mod logging;

mod utils;
