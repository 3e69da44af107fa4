pub mod registry;

pub use registry::DenomRegistry;
