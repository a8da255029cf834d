use std::fmt;

/// Data source a document request targets.
///
/// The recognized set is closed; anything else falls back to [`Source::Local`].
/// Callers never see an error for an unrecognized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Source {
    #[default]
    Local,
    Cloud,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Local, Source::Cloud];

    /// Silent coercion: unrecognized identifiers map to the default source.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "local" => Source::Local,
            "cloud" => Source::Cloud,
            _ => Source::Local,
        }
    }

    /// Directory name under the data root.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Local => "local",
            Source::Cloud => "cloud",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
