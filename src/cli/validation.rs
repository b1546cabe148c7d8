//! `value_parser` functions for CLI arguments.

use std::fs;
use std::path::PathBuf;

use validator::ValidateEmail;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_USERNAME_LEN: usize = 150;

pub fn validate_port(raw: &str) -> Result<u16, String> {
    let port: u16 = raw
        .parse()
        .map_err(|_| format!("Port must be a number between 1 and 65535, got: '{}'", raw))?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// The file must exist and be readable.
pub fn validate_config_file_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);

    if !path.is_file() {
        return Err(format!("Configuration file does not exist: '{}'", raw));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", raw, e))
}

pub fn validate_rollback_steps(raw: &str) -> Result<u32, String> {
    let steps: u32 = raw
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{}'", raw))?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }
    if steps > 100 {
        return Err("Rollback steps cannot exceed 100".to_string());
    }

    Ok(steps)
}

/// Hostnames pass through; dotted-quad input must be a real IPv4 address.
pub fn validate_host_address(raw: &str) -> Result<String, String> {
    let host = raw.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }
    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host
            .parse::<std::net::Ipv4Addr>()
            .map(|_| host.to_string())
            .map_err(|_| format!("Invalid IPv4 address: '{}'", raw));
    }

    Ok(host.to_string())
}

pub fn validate_username(raw: &str) -> Result<String, String> {
    let username = raw.trim();
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username must be between 1 and {} characters",
            MAX_USERNAME_LEN
        ));
    }
    Ok(username.to_string())
}

pub fn validate_email(raw: &str) -> Result<String, String> {
    if raw.validate_email() {
        Ok(raw.to_string())
    } else {
        Err(format!("Invalid email address: '{}'", raw))
    }
}

pub fn validate_password(raw: &str) -> Result<String, String> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports() {
        for ok in ["1", "80", "3000", "65535"] {
            assert!(validate_port(ok).is_ok(), "{}", ok);
        }
        for bad in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_hosts() {
        for ok in ["localhost", "127.0.0.1", "0.0.0.0", "catalog.internal"] {
            assert!(validate_host_address(ok).is_ok(), "{}", ok);
        }
        let long = "x".repeat(300);
        for bad in ["", "   ", "two words", "999.1.1.1", "1.2.3", long.as_str()] {
            assert!(validate_host_address(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_rollback_steps() {
        assert_eq!(validate_rollback_steps("3"), Ok(3));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        for bad in ["0", "101", "abc", ""] {
            assert!(validate_rollback_steps(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_config_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(validate_config_file_path(path).is_ok());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_user_fields() {
        assert_eq!(validate_username("  mod  ").as_deref(), Ok("mod"));
        assert!(validate_username(" ").is_err());
        assert!(validate_email("mod@example.com").is_ok());
        assert!(validate_email("mod.example.com").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }
}
