pub mod account;
pub mod filters;
pub mod settings;
pub mod trade;

pub use account::*;
pub use filters::*;
pub use settings::*;
pub use trade::*;
