use facet::Facet;

/// Options fixed for the lifetime of one [`wrap`](crate::wrap) call and
/// shared by every node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
pub struct WatchOptions {
    /// Count (and keep tracking below) only properties defined directly on
    /// the object being read. Inherited reads pass through untracked.
    ///
    /// Defaults to `true`.
    pub only_own_property: bool,

    /// Collapse every index access on an array into a single `[]` segment
    /// instead of one `[<index>]` segment per index.
    ///
    /// Defaults to `true`.
    pub compact: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            only_own_property: true,
            compact: true,
        }
    }
}

impl WatchOptions {
    /// The defaults: own properties only, compact paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for [`WatchOptions::only_own_property`].
    pub fn only_own_property(mut self, flag: bool) -> Self {
        self.only_own_property = flag;
        self
    }

    /// Builder-style setter for [`WatchOptions::compact`].
    pub fn compact(mut self, flag: bool) -> Self {
        self.compact = flag;
        self
    }
}

/// A bare `bool` selects [`WatchOptions::only_own_property`] and keeps the
/// other defaults.
impl From<bool> for WatchOptions {
    fn from(only_own_property: bool) -> Self {
        Self::default().only_own_property(only_own_property)
    }
}
