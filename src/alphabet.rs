use std::fmt::{self, Display};

/// One letter of the fingerspelling alphabet. Always stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(char);

impl Letter {
    pub fn all() -> impl Iterator<Item = Letter> {
        ('A'..='Z').map(Letter)
    }

    /// lowercase, used for filenames and url templates
    pub fn stem(&self) -> char {
        self.0.to_ascii_lowercase()
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.stem())
    }
}

impl TryFrom<char> for Letter {
    type Error = anyhow::Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_alphabetic() {
            Ok(Letter(c.to_ascii_uppercase()))
        } else {
            Err(anyhow::anyhow!("`{c}` is not a letter"))
        }
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
