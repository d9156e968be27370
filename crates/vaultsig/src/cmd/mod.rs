pub mod address;
pub mod canonicalize;
pub mod recover_id;
pub mod sign;
