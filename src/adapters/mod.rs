// Adapters layer: concrete implementations of the domain ports on top of
// third-party engines.

pub mod address;
pub mod mjml;
pub mod template;

pub use address::LettreAddressParser;
pub use mjml::MrmlCompiler;
pub use template::MiniJinjaRenderer;
