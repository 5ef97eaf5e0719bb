// Library modules for moodtunes
// The binary and the tests both go through these

pub mod api;
pub mod config;
pub mod models;
pub mod resolvers;
pub mod session;
pub mod spotify;

#[cfg(test)]
pub mod test_utils;
