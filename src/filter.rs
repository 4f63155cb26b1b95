/// Select values that mean "no filter".
const ALL_KEYWORDS: [&str; 3] = ["all", "todos", "todas"];

/// A select-box filter: everything, or one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// `true` for `All`, otherwise whatever `test` says about the value.
    pub fn allows(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(value) => test(value),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T: From<String>> Choice<T> {
    /// Parses a select value; blank and "all"/"todos"/"todas" mean `All`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || ALL_KEYWORDS.contains(&trimmed.to_lowercase().as_str()) {
            Choice::All
        } else {
            Choice::Only(T::from(trimmed.to_string()))
        }
    }
}

/// Case-insensitive substring test. The needle is trimmed first, and an
/// empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
