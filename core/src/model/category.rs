use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories the title extractor can infer. Tasks themselves store category as free text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Work,
    Finance,
    Health,
    Study,
    Personal,
}

impl Default for Category {
    fn default() -> Self {
        Category::Personal
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Finance => "Finance",
            Category::Health => "Health",
            Category::Study => "Study",
            Category::Personal => "Personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
