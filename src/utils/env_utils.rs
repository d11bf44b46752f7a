use log::debug;
use std::env;

/// Read an environment variable with fallback to a default value
///
/// Variables are looked up with the TRICOL_ prefix first, then bare,
/// so `TRICOL_API_URL` wins over `API_URL` when both are set.
pub fn read_env(key: &str, default: &str) -> String {
    let env_var = env::var(format!("TRICOL_{}", key)).or_else(|_| env::var(key));

    let value = env_var.unwrap_or_else(|_| default.to_string());

    debug!("Environment variable {} resolved to: {}", key, value);
    value
}

/// Read an environment variable with boolean conversion
pub fn read_env_bool(key: &str, default: bool) -> bool {
    let value = read_env(key, if default { "true" } else { "false" });

    // Convert to boolean - "true", "1", "yes", "y" are considered true
    let lower_value = value.to_lowercase();
    lower_value == "true" || lower_value == "1" || lower_value == "yes" || lower_value == "y"
}
