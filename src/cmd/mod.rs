pub mod crack;
pub mod encrypt;
