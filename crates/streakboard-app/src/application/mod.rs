pub mod dtos;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use utils::ResultExt;
