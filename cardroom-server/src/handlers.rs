#![expect(clippy::missing_docs_in_private_items)]

pub mod health;
pub mod login;
