mod component;
mod dom;
mod export;

pub use component::PaymentsDiagram;
pub use export::ExportButton;
