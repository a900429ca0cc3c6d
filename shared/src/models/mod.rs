//! Data models shared between the BRMS service and its clients

pub mod finance;
pub mod kitchen;
pub mod order;
pub mod restaurant;

pub use finance::*;
pub use kitchen::*;
pub use order::*;
pub use restaurant::*;
