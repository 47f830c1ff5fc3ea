pub use format::*;
pub use product::*;
pub use product_category::*;
pub use product_unit::*;
pub use quote::*;
pub use quote_status::*;
pub use record::*;
pub use stats::*;
pub use user::*;

mod format;
mod product;
mod product_category;
mod product_unit;
mod quote;
mod quote_status;
mod record;
mod stats;
mod user;
