//! Patterns deciding which call heads are eligible for rewriting.

/// The matching rule applied to a call's head symbol.
///
/// Matching is exact symbol equality or an explicit allow-list. A looser
/// substring test would also hit plain variables that merely contain the
/// function name, which is exactly the ambiguity [`AmbiguousTarget`]
/// guards against.
///
/// [`AmbiguousTarget`]: crate::error::RewriteError::AmbiguousTarget
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// The head must equal this name
    Exact(String),
    /// The head must equal one of these names
    AnyOf(Vec<String>),
}

impl Target {
    pub fn exact(name: impl Into<String>) -> Self {
        Target::Exact(name.into())
    }

    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target::AnyOf(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if a call whose head symbol is `head` should be rewritten.
    pub fn matches(&self, head: &str) -> bool {
        match self {
            Target::Exact(name) => name == head,
            Target::AnyOf(names) => names.iter().any(|name| name == head),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::exact(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Target;

    #[test]
    fn exact_matches_only_the_full_name() {
        let target = Target::exact("cut");
        assert!(target.matches("cut"));
        assert!(!target.matches("cut2"));
        assert!(!target.matches("uncut"));
        assert!(!target.matches("c"));
    }

    #[test]
    fn allow_list_matches_any_member() {
        let target = Target::any_of(["cut", "bin"]);
        assert!(target.matches("cut"));
        assert!(target.matches("bin"));
        assert!(!target.matches("log"));
    }

    #[test]
    fn from_str_is_exact() {
        assert_eq!(Target::from("cut"), Target::exact("cut"));
    }
}
