use crate::models::{Profile, Selection};

/// One entry in the secondary-profile picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryChoice {
    /// The synthetic "(none)" entry that heads a non-empty option list.
    None,
    Profile(String),
}

impl SecondaryChoice {
    pub fn label(&self) -> &str {
        match self {
            SecondaryChoice::None => "(none)",
            SecondaryChoice::Profile(name) => name,
        }
    }
}

/// Derives which profiles may be chosen as secondary alongside the active
/// one, memoizing the last computed list.
///
/// A group stands for a physical zone that cannot be double-assigned, so a
/// candidate qualifies only if it shares no group with the active profile.
#[derive(Debug, Default)]
pub struct ProfileSelector {
    options: Vec<SecondaryChoice>,
}

impl ProfileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized option list, in profile-list order. Empty means the
    /// picker is hidden.
    pub fn options(&self) -> &[SecondaryChoice] {
        &self.options
    }

    pub fn hidden(&self) -> bool {
        self.options.is_empty()
    }

    pub fn recompute(&mut self, profiles: &[Profile], active: Option<&str>) {
        self.options = secondary_options(profiles, active);
    }

    /// The choice the picker should display: the confirmed secondary if it
    /// is currently offered, otherwise "(none)". `None` when the picker is
    /// hidden.
    pub fn displayed(&self, selection: &Selection) -> Option<&SecondaryChoice> {
        if self.options.is_empty() {
            return None;
        }
        if let Some(name) = selection.secondary.as_deref() {
            if let Some(choice) = self
                .options
                .iter()
                .find(|choice| matches!(choice, SecondaryChoice::Profile(n) if n.as_str() == name))
            {
                return Some(choice);
            }
        }
        self.options.first()
    }
}

/// Pure computation of the secondary-eligible list. Idempotent: the same
/// inputs always yield the same ordered list.
pub fn secondary_options(profiles: &[Profile], active: Option<&str>) -> Vec<SecondaryChoice> {
    let Some(active) = active.and_then(|name| profiles.iter().find(|p| p.name == name)) else {
        // No active profile, or it no longer exists in the list.
        return Vec::new();
    };

    let candidates: Vec<SecondaryChoice> = profiles
        .iter()
        .filter(|candidate| candidate.name != active.name && !candidate.shares_group(active))
        .map(|candidate| SecondaryChoice::Profile(candidate.name.clone()))
        .collect();

    if candidates.is_empty() {
        // Nothing valid to choose; a forced "(none)" alone would be noise.
        return Vec::new();
    }

    let mut options = Vec::with_capacity(candidates.len() + 1);
    options.push(SecondaryChoice::None);
    options.extend(candidates);
    options
}
