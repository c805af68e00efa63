pub mod daily;
pub mod movers;
pub mod quote;
pub mod search;

use serde::Deserialize;

/// Refusal fields the provider mixes into an otherwise-normal payload.
///
/// Rate limits and malformed requests come back as HTTP 200 with one of these
/// prose fields set and the data section absent.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct Refusal {
    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Information")]
    information: Option<String>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

impl Refusal {
    pub(crate) fn into_message(self) -> Option<String> {
        self.note.or(self.information).or(self.error_message)
    }
}
