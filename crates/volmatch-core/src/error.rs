use std::fmt;

/// Machine-readable error codes for scripts and agents driving `vm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidArgument,
    InvalidNumber,
    EventNotFound,
    VolunteerNotFound,
    DuplicateName,
    VolunteerUnavailable,
    AlreadyMatched,
    DateConflict,
    CapacityReached,
    MatchNotFound,
    SnapshotLineInvalid,
    SnapshotNotFound,
    SnapshotIoFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidArgument => "E2001",
            Self::InvalidNumber => "E2002",
            Self::EventNotFound => "E3001",
            Self::VolunteerNotFound => "E3002",
            Self::DuplicateName => "E3003",
            Self::VolunteerUnavailable => "E4001",
            Self::AlreadyMatched => "E4002",
            Self::DateConflict => "E4003",
            Self::CapacityReached => "E4004",
            Self::MatchNotFound => "E4005",
            Self::SnapshotLineInvalid => "E5001",
            Self::SnapshotNotFound => "E5002",
            Self::SnapshotIoFailed => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidArgument => "Invalid argument",
            Self::InvalidNumber => "Value is not a number",
            Self::EventNotFound => "Event not found",
            Self::VolunteerNotFound => "Volunteer not found",
            Self::DuplicateName => "Name already in use",
            Self::VolunteerUnavailable => "Volunteer unavailable on event date",
            Self::AlreadyMatched => "Volunteer already matched to event",
            Self::DateConflict => "Volunteer already booked on that date",
            Self::CapacityReached => "Event is full",
            Self::MatchNotFound => "Match not found",
            Self::SnapshotLineInvalid => "Invalid snapshot line",
            Self::SnapshotNotFound => "Snapshot file not found",
            Self::SnapshotIoFailed => "Snapshot file I/O failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .volmatch/config.toml and retry."),
            Self::InvalidArgument => Some("Dates run from 1 to 30; names must not be blank or padded with spaces."),
            Self::InvalidNumber => Some("Pass dates and limits as plain integers."),
            Self::EventNotFound => Some("List events with `vm events`."),
            Self::VolunteerNotFound => Some("List volunteers with `vm volunteers`."),
            Self::DuplicateName => Some("Names are compared case-insensitively."),
            Self::VolunteerUnavailable => {
                Some("Add the event date to the volunteer's availability first.")
            }
            Self::AlreadyMatched | Self::SnapshotLineInvalid => None,
            Self::DateConflict => Some("Unmatch the volunteer from the other event on that date."),
            Self::CapacityReached => Some("Unmatch a volunteer or pick another event."),
            Self::MatchNotFound => Some("Check the event's matched volunteers with `vm events`."),
            Self::SnapshotNotFound => Some("Check the path or pass --file."),
            Self::SnapshotIoFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
