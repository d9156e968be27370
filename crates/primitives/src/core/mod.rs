pub mod recovery;
pub mod signature;

pub mod util;
