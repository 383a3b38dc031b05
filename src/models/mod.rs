mod client;
mod phone;

pub use client::{Client, ClientUpdate, ClientWithPhones, NewClient};
pub use phone::Phone;
