use std::collections::BTreeSet;

/// A named configuration context, selectable as the active profile.
///
/// Groups are opaque compatibility tags: two profiles sharing any group id
/// cannot be active and secondary at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub groups: BTreeSet<u32>,
}

impl Profile {
    pub fn new<I>(name: String, groups: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self {
            name,
            groups: groups.into_iter().collect(),
        }
    }

    /// Legacy flat profile lists carry names only; those profiles belong to
    /// no group and are compatible with everything.
    pub fn ungrouped(name: String) -> Self {
        Self {
            name,
            groups: BTreeSet::new(),
        }
    }

    pub fn shares_group(&self, other: &Profile) -> bool {
        !self.groups.is_disjoint(&other.groups)
    }
}
