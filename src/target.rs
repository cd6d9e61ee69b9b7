use std::{fmt, str::FromStr};

use crate::Error;

/// A single repository, as given on the command line: `OWNER/REPO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub name: String,
}

impl RepoTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoTarget { owner: owner.into(), name: name.into() }
    }
}

/// GitHub restricts owner and repository names to ASCII letters, digits,
/// `.`, `-` and `_`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

impl FromStr for RepoTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split('/').collect();
        match components[..] {
            [owner, name] if is_valid_name(owner) && is_valid_name(name) => {
                Ok(RepoTarget::new(owner, name))
            }
            _ => Err(Error::InvalidTarget(s.to_string())),
        }
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
