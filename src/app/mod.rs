pub mod formatter;
pub mod session;
