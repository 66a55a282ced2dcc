pub mod api;
pub mod config;
pub mod db;
pub mod schema;
#[cfg(test)]
pub mod test_utils;
