//! Helpers for reading backend settings from an environment lookup.

use std::env;

use crate::traits::{StoreError, StoreResult};

/// Reads process environment variables, treating unset and non-UTF-8 values
/// alike.
pub(crate) fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Returns the trimmed value of `name`, skipping blank values.
pub(crate) fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub(crate) fn port<F>(lookup: &F, name: &str) -> StoreResult<Option<u16>>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name)
        .map(|raw| {
            raw.parse::<u16>().map_err(|err| {
                StoreError::configuration(format!(
                    "{name} must be a port number, got `{raw}`: {err}"
                ))
            })
        })
        .transpose()
}

pub(crate) fn flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "PORT" => Some("8500".to_owned()),
            "BAD_PORT" => Some("eighty".to_owned()),
            "BLANK" => Some("  ".to_owned()),
            "SSL" => Some("TRUE".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn parses_ports() {
        assert_eq!(port(&lookup, "PORT").unwrap(), Some(8500));
        assert_eq!(port(&lookup, "MISSING").unwrap(), None);
        assert_eq!(port(&lookup, "BLANK").unwrap(), None);
        assert!(matches!(
            port(&lookup, "BAD_PORT"),
            Err(StoreError::Configuration { .. })
        ));
    }

    #[test]
    fn flags_are_case_insensitive() {
        assert!(flag(&lookup, "SSL"));
        assert!(!flag(&lookup, "MISSING"));
        assert!(!flag(&lookup, "PORT"));
    }
}
