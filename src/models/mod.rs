pub mod item;
pub mod coupon;
pub mod profile;

pub use item::*;
pub use coupon::*;
pub use profile::*;
