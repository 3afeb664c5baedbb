//! City field collection and validation.

use super::error::ClientError;
use std::fmt;

/// Message written to the display region when the field is empty.
pub const PROMPT_MESSAGE: &str = "Please enter a city name.";

/// Where the city text comes from ("read text from field X").
pub trait InputSource: Send + Sync {
    fn read(&self) -> String;
}

impl InputSource for str {
    fn read(&self) -> String {
        self.to_string()
    }
}

impl InputSource for String {
    fn read(&self) -> String {
        self.clone()
    }
}

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the field, trim it, reject empty input.
pub fn collect(source: &(impl InputSource + ?Sized)) -> Result<City, ClientError> {
    let raw = source.read();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation);
    }
    Ok(City(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let city = collect("  Nashik \n").unwrap();
        assert_eq!(city.as_str(), "Nashik");
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(collect("New Delhi").unwrap().as_str(), "New Delhi");
    }

    #[test]
    fn rejects_empty_and_blank() {
        for raw in ["", "   ", "\t\n"] {
            assert!(collect(raw).unwrap_err().is_validation(), "{raw:?}");
        }
    }

    #[test]
    fn reads_from_owned_string() {
        let field = String::from(" Pune ");
        assert_eq!(collect(&field).unwrap().to_string(), "Pune");
    }
}
