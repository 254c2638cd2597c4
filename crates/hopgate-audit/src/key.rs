use hopgate_core::Slug;
use hopgate_flake::RecordId;
use std::fmt::Display;

/// Stands in for the slug when the request carried none. The `.` keeps it
/// out of the valid slug charset, so no real slug shares its key prefix.
pub const NO_SLUG_PLACEHOLDER: &str = ".none";

/// Layout of audit storage keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySchema {
    /// `<slug>:<id>`, written by early deployments.
    Legacy,
    /// `<slug>:entries:<id>`, keeps audit keys apart from the mapping key.
    #[default]
    Entries,
}

impl KeySchema {
    /// Common prefix of every audit key for `slug`, usable for range scans.
    pub fn prefix(&self, slug: Option<&Slug>) -> String {
        let slug = slug.map(Slug::as_str).unwrap_or(NO_SLUG_PLACEHOLDER);
        match self {
            KeySchema::Legacy => format!("{slug}:"),
            KeySchema::Entries => format!("{slug}:entries:"),
        }
    }
}

/// Storage key of one audit record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuditKey(String);

impl AuditKey {
    pub fn new(schema: KeySchema, slug: Option<&Slug>, id: &RecordId) -> Self {
        Self(format!("{}{}", schema.prefix(slug), id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AuditKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
