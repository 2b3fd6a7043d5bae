pub mod config;
pub mod db;
pub mod load;
pub mod pipeline;
pub mod process;
pub mod schema;

#[cfg(test)]
mod test_support;
