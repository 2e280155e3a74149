//! Transient, dismissable messages surfaced next to the wizard, one per
//! gateway failure in addition to the failure's field error.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
    /// Rate-limit messages stay visible longer than the default since the
    /// user has to wait before retrying.
    pub extended: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            message: message.into(),
            extended: false,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            message: message.into(),
            extended: false,
        }
    }

    pub fn error(message: impl Into<String>, extended: bool) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
            extended,
        }
    }
}
