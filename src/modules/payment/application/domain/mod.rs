pub mod amount;
pub mod entities;
pub mod order_reference;
