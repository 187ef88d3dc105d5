//! Whether vimgolf.com accepts entries from this client.

use std::cmp::Ordering;

/// Client version vimgolf.com declares when it accepts our entries.
pub const COMPLIANCE_VERSION: &str = "0.5.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compliance {
    Compliant,
    /// The service expects a newer client.
    Upgrade,
    /// The service expects an older client.
    Downgrade,
    /// The declared version could not be compared.
    Update,
}

impl Compliance {
    /// Compare the `client` field of a challenge with [`COMPLIANCE_VERSION`].
    pub fn check(declared: Option<&str>) -> Self {
        let Some(declared) = declared else {
            return Compliance::Update;
        };
        if declared == COMPLIANCE_VERSION {
            return Compliance::Compliant;
        }
        match (parse_version(declared), parse_version(COMPLIANCE_VERSION)) {
            (Some(theirs), Some(ours)) => match theirs.cmp(&ours) {
                Ordering::Greater => Compliance::Upgrade,
                Ordering::Less => Compliance::Downgrade,
                // e.g. `0.5` against `0.5.0`
                Ordering::Equal => Compliance::Update,
            },
            _ => Compliance::Update,
        }
    }

    pub fn is_compliant(self) -> bool {
        self == Compliance::Compliant
    }

    /// What the user should do about it, for messages like
    /// "Please upgrade vimgolf to a compliant version".
    pub fn action(self) -> Option<&'static str> {
        match self {
            Compliance::Compliant => None,
            Compliance::Upgrade => Some("upgrade"),
            Compliance::Downgrade => Some("downgrade"),
            Compliance::Update => Some("update"),
        }
    }
}

fn parse_version(version: &str) -> Option<Vec<u64>> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}
