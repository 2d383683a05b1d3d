pub mod board;
pub mod interaction;
pub mod session;
