pub mod calc;
pub mod eval;
pub mod init;
pub mod validate;
