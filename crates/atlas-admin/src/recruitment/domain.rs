use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for a candidate's application to one role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppliedRoleId(pub String);

impl fmt::Display for AppliedRoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

/// Recruitment pipeline stage of an applied role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Accepted,
    Offered,
    Pending,
    Interviewed,
    Rejected,
}

/// Display metadata for one status, as rendered in the status popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSwatch {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub aria_label: &'static str,
    pub color: &'static str,
}

const ACCEPTED: StatusSwatch = StatusSwatch {
    status: ApplicationStatus::Accepted,
    label: "Accepted",
    aria_label: "accepted status",
    color: "#46FFDE",
};

const OFFERED: StatusSwatch = StatusSwatch {
    status: ApplicationStatus::Offered,
    label: "Offered",
    aria_label: "offered status",
    color: "#0038FF",
};

const PENDING: StatusSwatch = StatusSwatch {
    status: ApplicationStatus::Pending,
    label: "Pending Review",
    aria_label: "pending review status",
    color: "#FFBD3C",
};

const INTERVIEWED: StatusSwatch = StatusSwatch {
    status: ApplicationStatus::Interviewed,
    label: "Interviewed",
    aria_label: "interviewed status",
    color: "#CE44FF",
};

const REJECTED: StatusSwatch = StatusSwatch {
    status: ApplicationStatus::Rejected,
    label: "Rejected",
    aria_label: "rejected status",
    color: "#FF0000",
};

/// Status palette in presentation order.
pub static STATUS_SWATCHES: [StatusSwatch; 5] =
    [ACCEPTED, OFFERED, PENDING, INTERVIEWED, REJECTED];

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Accepted,
        ApplicationStatus::Offered,
        ApplicationStatus::Pending,
        ApplicationStatus::Interviewed,
        ApplicationStatus::Rejected,
    ];

    pub fn swatch(self) -> &'static StatusSwatch {
        match self {
            ApplicationStatus::Accepted => &ACCEPTED,
            ApplicationStatus::Offered => &OFFERED,
            ApplicationStatus::Pending => &PENDING,
            ApplicationStatus::Interviewed => &INTERVIEWED,
            ApplicationStatus::Rejected => &REJECTED,
        }
    }

    pub fn color(self) -> &'static str {
        self.swatch().color
    }

    pub fn label(self) -> &'static str {
        self.swatch().label
    }

    /// Rejections commit straight away; every other choice goes through a confirmation dialog.
    pub const fn requires_confirmation(self) -> bool {
        !matches!(self, ApplicationStatus::Rejected)
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Offered => "OFFERED",
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Interviewed => "INTERVIEWED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One candidate's application to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRole {
    pub id: AppliedRoleId,
    pub status: ApplicationStatus,
    pub candidate_id: CandidateId,
    pub role_id: RoleId,
}
