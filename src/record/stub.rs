use std::fmt;
use url::Url;

/// Lightweight reference to a mayor's detail page
///
/// `group` is the region name and `subgroup` the town, both non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordStub {
    /// Region the listing page belongs to
    pub group: String,

    /// Town parsed from the listing entry
    pub subgroup: String,

    /// Mayor's name, from the link text
    pub label: String,

    /// Absolute URL of the mayor's page
    pub detail_link: Url,
}

impl RecordStub {
    pub fn new(
        group: impl Into<String>,
        subgroup: impl Into<String>,
        label: impl Into<String>,
        detail_link: Url,
    ) -> Self {
        Self {
            group: group.into(),
            subgroup: subgroup.into(),
            label: label.into(),
            detail_link,
        }
    }
}

impl fmt::Display for RecordStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} <{}>",
            self.group, self.subgroup, self.label, self.detail_link
        )
    }
}
