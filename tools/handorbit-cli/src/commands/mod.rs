pub mod config;
pub mod live;
pub mod preview;
pub mod replay;
