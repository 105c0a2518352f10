//! Intake storage
//!
//! Each completed intake gets a directory named after its session id:
//! - `intake.json` - the [`IntakeRecord`], pretty printed
//! - `transcript.jsonl` - the final agent's history, one item per line

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::core::{FrameworkError, FrameworkResult};
use crate::history::HistoryItem;

use super::metadata::IntakeRecord;

const RECORD_FILE: &str = "intake.json";
const TRANSCRIPT_FILE: &str = "transcript.jsonl";

/// Writes and reads completed intakes under one root directory
#[derive(Debug, Clone)]
pub struct IntakeStorage {
    root: PathBuf,
}

impl IntakeStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn intake_dir(&self, session_id: &str) -> PathBuf {
        self.root.join(session_id)
    }

    /// Persist a completed intake with the transcript it ended on
    ///
    /// Both files are replaced when the intake was saved before.
    pub fn save(&self, record: &IntakeRecord, transcript: &[HistoryItem]) -> FrameworkResult<()> {
        let dir = self.intake_dir(&record.session_id);
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(RECORD_FILE), serde_json::to_vec_pretty(record)?)?;

        let lines = transcript
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let mut body = lines.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(dir.join(TRANSCRIPT_FILE), body)?;

        tracing::info!(
            "[IntakeStorage] Saved intake {} from '{}' ({} transcript items)",
            record.session_id,
            record.final_agent,
            transcript.len()
        );
        Ok(())
    }

    /// Load a stored record, `SessionNotFound` when the intake was never saved
    pub fn load_record(&self, session_id: &str) -> FrameworkResult<IntakeRecord> {
        let path = self.intake_dir(session_id).join(RECORD_FILE);
        let raw = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FrameworkError::SessionNotFound(session_id.to_string()),
            _ => e.into(),
        })?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Load a stored transcript; empty when none was written
    pub fn load_transcript(&self, session_id: &str) -> FrameworkResult<Vec<HistoryItem>> {
        let path = self.intake_dir(session_id).join(TRANSCRIPT_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(FrameworkError::from))
            .collect()
    }

    /// Session ids of every stored intake, sorted
    pub fn list_records(&self) -> FrameworkResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.join(RECORD_FILE).is_file() {
                continue;
            }
            if let Some(id) = path.file_name().and_then(|n| n.to_str()) {
                ids.push(id.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }
}
