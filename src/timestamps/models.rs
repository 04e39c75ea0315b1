use crate::cue::models::MSF;

/// One line of a timestamp list: where the track starts and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub position: MSF,
    pub title: String,
}
