#[cfg(test)]
pub mod error_test;
#[cfg(test)]
mod export;
