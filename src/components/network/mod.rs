mod component;
mod render;
mod state;
mod types;

pub use component::WalletNetworkCanvas;
pub use types::LayoutMode;
