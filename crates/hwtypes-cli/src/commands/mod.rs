pub mod check;
pub mod dump;
pub mod schema;
pub mod schema_loader;

#[cfg(test)]
mod schema_tests;
