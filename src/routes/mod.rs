//! Route modules for the Inventario server

pub mod books;
pub mod extract;
pub mod ui;
