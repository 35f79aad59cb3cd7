pub mod date;
pub mod logging;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;
