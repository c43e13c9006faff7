pub mod price_calculator;
pub mod cart_service;
pub mod checkout;

pub use price_calculator::*;
pub use cart_service::*;
pub use checkout::*;
