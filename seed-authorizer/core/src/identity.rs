/// The user-name prefix carried by every seed identity.
pub const SEED_USER_NAME_PREFIX: &str = "gardener.cloud:system:seed:";

/// The group claim carried by every seed identity.
pub const SEEDS_GROUP: &str = "gardener.cloud:system:seeds";

/// The name used by shared or bootstrap credentials that are not bound to a single seed.
pub const AMBIGUOUS_SEED_NAME: &str = "<ambiguous>";

/// Identifies which seed a caller acts for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SeedIdentity {
    /// The caller is the gardenlet of the named seed.
    Named(String),

    /// The caller is a seed, but it cannot be determined which one.
    Ambiguous,
}

/// Determines whether a caller is a seed.
///
/// Returns `None` unless the caller's name carries the seed prefix _and_ its groups include the
/// seeds group.
pub fn identify<S: AsRef<str>>(name: &str, groups: &[S]) -> Option<SeedIdentity> {
    let seed = name.strip_prefix(SEED_USER_NAME_PREFIX)?;
    if !groups.iter().any(|g| g.as_ref() == SEEDS_GROUP) {
        return None;
    }

    if seed == AMBIGUOUS_SEED_NAME {
        return Some(SeedIdentity::Ambiguous);
    }
    Some(SeedIdentity::Named(seed.to_string()))
}

// === impl SeedIdentity ===

impl SeedIdentity {
    /// Returns the seed's name, if known.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Ambiguous => None,
        }
    }
}

impl std::fmt::Display for SeedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Ambiguous => f.write_str(AMBIGUOUS_SEED_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_seed() {
        assert_eq!(
            identify("gardener.cloud:system:seed:seed-1", &[SEEDS_GROUP]),
            Some(SeedIdentity::Named("seed-1".to_string()))
        );
    }

    #[test]
    fn ambiguous_seed() {
        let id = identify(
            "gardener.cloud:system:seed:<ambiguous>",
            &["system:authenticated", SEEDS_GROUP],
        )
        .expect("must be a seed");
        assert_eq!(id, SeedIdentity::Ambiguous);
        assert_eq!(id.name(), None);
    }

    #[test]
    fn missing_group() {
        assert_eq!(
            identify("gardener.cloud:system:seed:seed-1", &["system:authenticated"]),
            None
        );
        assert_eq!(identify::<&str>("gardener.cloud:system:seed:seed-1", &[]), None);
    }

    #[test]
    fn missing_prefix() {
        assert_eq!(identify("system:admin", &[SEEDS_GROUP]), None);
        assert_eq!(identify("seed-1", &[SEEDS_GROUP]), None);
    }
}
