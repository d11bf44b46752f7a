pub mod env_utils;

pub use env_utils::{read_env, read_env_bool};
