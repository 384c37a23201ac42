pub mod diagram;
pub mod legend;
pub mod mount;
pub mod network;
