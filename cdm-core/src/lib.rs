// cdm-core/src/lib.rs
pub mod extract;
pub mod installer;
pub mod platform;

pub use extract::ExtractOutcome;
pub use installer::Installer;
pub use platform::Platform;
