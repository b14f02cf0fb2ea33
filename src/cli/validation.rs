//! Value parsers for CLI arguments.
//!
//! Used as clap `value_parser`s, so errors are plain strings shown to the
//! user as-is.

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

/// Longest DNS name accepted for `--host`
const MAX_HOSTNAME_LEN: usize = 253;

/// Port in 1..=65535
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    match port_str.trim().parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )),
    }
}

/// Existing, readable regular file
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// IP address (v4 or v6) or hostname
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }

    // dotted digits that failed to parse as an IP are a typo, not a hostname
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOSTNAME_LEN
        ));
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(format!("Invalid hostname: '{}'", host_str));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        for port in ["1", "80", "8100", "65535", " 9000 "] {
            assert!(validate_port(port).is_ok(), "Port {} should be valid", port);
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "Port '{}' should be invalid", port);
        }
    }

    #[test]
    fn test_host_validation_valid_hosts() {
        for host in [
            "localhost",
            "127.0.0.1",
            "0.0.0.0",
            "::",
            "::1",
            "192.168.1.1",
            "my-server.local",
        ] {
            assert!(validate_host_address(host).is_ok(), "Host {} should be valid", host);
        }
    }

    #[test]
    fn test_host_validation_invalid_hosts() {
        let long = "x".repeat(300);
        for host in ["", "   ", "host with spaces", "999.999.999.999", "a_b", long.as_str()] {
            assert!(
                validate_host_address(host).is_err(),
                "Host '{}' should be invalid",
                host
            );
        }
    }

    #[test]
    fn test_config_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_config_file_path(file.path().to_str().unwrap()).is_ok());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
