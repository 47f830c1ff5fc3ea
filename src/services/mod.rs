pub use collections::*;
pub use credentials::*;
pub use editor::*;
pub use stats::*;
pub use uploads::*;

mod collections;
mod credentials;
mod editor;
mod stats;
mod uploads;
