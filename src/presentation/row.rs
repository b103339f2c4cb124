use std::fmt;

use crate::domain::message::sanitize;
use crate::domain::walker::AcceptedCommit;
use crate::utils::{fmt_date, fmt_time, short_id};

pub const SHORT_ID_LEN: usize = 7;
pub const HEADER: [&str; 5] = ["Short Commit ID", "Author", "Message", "Date", "Time"];

/// Display projection of one accepted commit. Rebuilt on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub short_id: String,
    pub author: String,
    pub message: String,
    pub date: String,
    pub time: String,
}

impl ReportRow {
    pub fn fields(&self) -> [&str; 5] {
        [
            self.short_id.as_str(),
            self.author.as_str(),
            self.message.as_str(),
            self.date.as_str(),
            self.time.as_str(),
        ]
    }
}

impl From<&AcceptedCommit> for ReportRow {
    fn from(accepted: &AcceptedCommit) -> Self {
        let commit = &accepted.commit;
        Self {
            short_id: short_id(&commit.commit_id, SHORT_ID_LEN).to_string(),
            author: commit.author.name.clone(),
            message: sanitize(&commit.message),
            date: fmt_date(accepted.authored),
            time: fmt_time(accepted.authored),
        }
    }
}

/// Console form: fields joined by `", "`, unquoted.
impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(", "))
    }
}
