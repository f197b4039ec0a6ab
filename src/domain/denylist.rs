use std::collections::HashSet;

/// Tag names excluded from the catalog for content-policy reasons.
///
/// Exact-name membership only; aliases resolve to canonical names before the
/// catalog is built, so no fuzzy matching is needed here. A post carrying any
/// of these tokens is rejected wholesale during preview assignment.
pub const DEFAULT_DENYLIST: &[&str] = &[
    // sexual violence
    "rape",
    "forced",
    "noncon",
    // death / graphic harm
    "death",
    "gore",
    "snuff",
    "necrophilia",
    // underage
    "young",
    "cub",
    "loli",
    "shota",
    "toddlercon",
];

/// Membership set for policy-excluded tag names.
#[derive(Debug, Clone)]
pub struct Denylist {
    names: HashSet<String>,
}

impl Denylist {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Empty denylist, for tests that want the policy filter out of the way.
    pub fn none() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True if any whitespace-separated token of `tag_list` is denylisted.
    pub fn matches_any_token(&self, tag_list: &str) -> bool {
        tag_list
            .split_whitespace()
            .any(|token| self.names.contains(token))
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}
