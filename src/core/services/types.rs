use crate::error::CliError;
use std::fmt;
use std::str::FromStr;

/// Which customer attribute a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Id,
    Email,
    Name,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Id => "id",
            SearchType::Email => "email",
            SearchType::Name => "name",
        }
    }
}

impl FromStr for SearchType {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SearchType::Id),
            "email" => Ok(SearchType::Email),
            "name" => Ok(SearchType::Name),
            other => Err(CliError::InvalidArguments(format!(
                "Unknown search type: {}. Use 'id', 'email' or 'name'",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
