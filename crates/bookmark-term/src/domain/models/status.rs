#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// One-line message shown under the list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: &str) -> StatusMessage {
        return StatusMessage {
            kind: StatusKind::Info,
            text: text.to_string(),
        };
    }

    pub fn error(text: &str) -> StatusMessage {
        return StatusMessage {
            kind: StatusKind::Error,
            text: text.to_string(),
        };
    }
}
