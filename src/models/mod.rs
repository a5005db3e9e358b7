pub mod settings;

pub use settings::{Settings, NO_PALETTE};
