//! JSON dump of the page record sequence

use crate::output::traits::{ArtifactFormat, ArtifactKind, CrawlSession, OutputResult};

/// Pretty-printed array of every page record
pub struct JsonDump;

impl ArtifactFormat for JsonDump {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Json
    }

    fn render(&self, session: &CrawlSession) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(&session.pages)?)
    }
}
