pub mod carts;
pub mod items;
