// Category Entity

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let category = Self {
            id: 0,
            name: name.into(),
            created_at: None,
            updated_at: None,
        };
        category.validate()?;
        Ok(category)
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        if !name.is_empty() {
            self.name = name.to_owned();
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let len = self.name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            return Err(Error::validation(format!(
                "category name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
            )));
        }
        Ok(())
    }
}
