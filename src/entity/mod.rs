pub mod cart_items;
pub mod carts;

pub mod prelude {
    pub use super::cart_items::Entity as CartItems;
    pub use super::carts::Entity as Carts;
}
