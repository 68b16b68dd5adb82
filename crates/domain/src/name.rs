use derive_more::{AsRef, Display};

/// Free-text exercise name as entered in the add form.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Keeps the text as typed, but rejects a blank name.
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.trim().is_empty() {
            return Err(NameError::Empty);
        }

        Ok(Name(name.to_string()))
    }

    /// Name as stored by the backing service, which is not restricted.
    #[must_use]
    pub fn from_stored(name: String) -> Self {
        Name(name)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
}
