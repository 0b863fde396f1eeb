//! Scenario provider.
//!
//! Chooses the scenario document for one render pass from an explicit [`Session`]:
//! the built-in sample when the toggle is on, otherwise the uploaded document if there is one,
//! otherwise nothing. Uploaded bytes are decoded as JSON but not checked against the scenario
//! schema; that happens during extraction in the presenter.

use crate::config::CoreConfig;
use crate::constants::UPLOAD_EXTENSION;
use crate::sample::sample_case;
use crate::{ScenarioError, ScenarioResult};
use serde_json::Value;
use std::path::Path;

/// A user-supplied scenario document, as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    /// Client-side file name, when the transport provides one.
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    /// Read an upload from a local file, keeping its file name.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Io` if the file cannot be read.
    pub fn from_path(path: &Path) -> ScenarioResult<Self> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|os| os.to_str())
            .map(str::to_string);
        Ok(Self { filename, bytes })
    }

    /// The uploaded bytes as text, for carrying the document between actions.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Selection state for one render pass.
///
/// Passed explicitly from the surface (HTTP form, JSON API, CLI) through provider and
/// presenter; nothing is kept between passes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// "Use Sample Case" toggle. Takes precedence over any upload.
    pub use_sample: bool,
    pub upload: Option<Upload>,
    /// Whether "Run Agent Diagnosis" was triggered in this pass.
    pub run_diagnosis: bool,
}

impl Session {
    /// A fresh session with the toggle in its configured default state.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            use_sample: cfg.default_use_sample(),
            upload: None,
            run_diagnosis: false,
        }
    }
}

/// Supplies zero or one scenario document per session.
#[derive(Clone, Debug)]
pub struct ScenarioProvider {
    max_upload_bytes: usize,
}

impl ScenarioProvider {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            max_upload_bytes: cfg.max_upload_bytes(),
        }
    }

    /// Select and decode the scenario for `session`.
    ///
    /// # Returns
    /// * `Ok(Some(_))` - the sample, or the decoded upload
    /// * `Ok(None)` - toggle off and nothing uploaded
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `ScenarioError::InvalidInput` if the upload is too large or not a `.json` file,
    /// - `ScenarioError::Parse` if the upload is not well-formed JSON.
    pub fn provide(&self, session: &Session) -> ScenarioResult<Option<Value>> {
        if session.use_sample {
            tracing::info!("using built-in sample scenario");
            return Ok(Some(sample_case()));
        }

        let Some(upload) = session.upload.as_ref() else {
            tracing::info!("no scenario selected");
            return Ok(None);
        };

        let document = self.decode(upload)?;
        tracing::info!(
            "using uploaded scenario {}",
            upload.filename.as_deref().unwrap_or("<unnamed>")
        );
        Ok(Some(document))
    }

    /// Check an upload's name and size, then decode it as JSON.
    ///
    /// A leading UTF-8 byte-order mark is skipped.
    ///
    /// # Errors
    ///
    /// See [`ScenarioProvider::provide`].
    pub fn decode(&self, upload: &Upload) -> ScenarioResult<Value> {
        if let Some(name) = upload.filename.as_deref() {
            validate_upload_filename(name)?;
        }

        if upload.bytes.len() > self.max_upload_bytes {
            return Err(ScenarioError::InvalidInput(format!(
                "upload exceeds maximum size of {} bytes",
                self.max_upload_bytes
            )));
        }

        let bytes = upload
            .bytes
            .strip_prefix(UTF8_BOM)
            .unwrap_or(upload.bytes.as_slice());

        serde_json::from_slice::<Value>(bytes).map_err(|e| {
            tracing::warn!("failed to parse uploaded scenario: {}", e);
            ScenarioError::Parse(e)
        })
    }
}

/// UTF-8 byte-order mark some editors write at the start of text files.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Accept only file names with the uploader's extension, ignoring case.
fn validate_upload_filename(name: &str) -> ScenarioResult<()> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    if ext.as_deref() == Some(UPLOAD_EXTENSION) {
        Ok(())
    } else {
        Err(ScenarioError::InvalidInput(format!(
            "uploaded file '{name}' is not a .{UPLOAD_EXTENSION} file"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn provider() -> ScenarioProvider {
        ScenarioProvider::new(&CoreConfig::default())
    }

    fn upload(bytes: &[u8]) -> Upload {
        Upload::new(Some("case.json".into()), bytes.to_vec())
    }

    #[test]
    fn sample_takes_precedence_over_upload() {
        let session = Session {
            use_sample: true,
            upload: Some(upload(b"not json")),
            run_diagnosis: false,
        };
        let document = provider().provide(&session).unwrap().expect("scenario");
        assert_eq!(document, sample_case());
    }

    #[test]
    fn nothing_selected_yields_none() {
        let session = Session::default();
        assert!(provider().provide(&session).unwrap().is_none());
    }

    #[test]
    fn upload_is_decoded_without_schema_checks() {
        let session = Session {
            use_sample: false,
            upload: Some(upload(br#"{"unexpected": [1, 2, 3]}"#)),
            run_diagnosis: false,
        };
        let document = provider().provide(&session).unwrap().expect("scenario");
        assert_eq!(document["unexpected"][2], 3);
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend(serde_json::to_vec(&sample_case()).unwrap());
        let session = Session {
            use_sample: false,
            upload: Some(upload(&bytes)),
            run_diagnosis: false,
        };
        let document = provider().provide(&session).unwrap().expect("scenario");
        assert_eq!(document, sample_case());
    }

    #[test]
    fn byte_order_mark_alone_is_still_a_parse_error() {
        let err = provider()
            .decode(&upload(&[0xEF, 0xBB, 0xBF]))
            .expect_err("should fail");
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn large_integers_keep_every_digit() {
        let bytes = br#"{"Heart_Rate": 123456789012345678901234567890}"#;
        let document = provider().decode(&upload(bytes)).unwrap();
        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            r#"{"Heart_Rate":123456789012345678901234567890}"#
        );
    }

    #[test]
    fn truncated_upload_is_a_parse_error() {
        let session = Session {
            use_sample: false,
            upload: Some(upload(br#"{"OSCE_Examination": {"Objective_for_Doctor": "#)),
            run_diagnosis: false,
        };
        let err = provider().provide(&session).expect_err("should fail");
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn non_json_extension_is_rejected() {
        let bad = Upload::new(Some("case.txt".into()), b"{}".to_vec());
        let err = provider().decode(&bad).expect_err("should reject");
        assert!(matches!(err, ScenarioError::InvalidInput(msg) if msg.contains("case.txt")));

        let upper = Upload::new(Some("CASE.JSON".into()), b"{}".to_vec());
        assert!(provider().decode(&upper).is_ok());

        let unnamed = Upload::new(None, b"{}".to_vec());
        assert!(provider().decode(&unnamed).is_ok());
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let cfg = CoreConfig::new(false, 4).unwrap();
        let err = ScenarioProvider::new(&cfg)
            .decode(&upload(b"{\"a\": 1}"))
            .expect_err("should reject");
        assert!(matches!(err, ScenarioError::InvalidInput(msg) if msg.contains("maximum size")));
    }

    #[test]
    fn upload_from_path_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("station4.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{}").unwrap();

        let up = Upload::from_path(&path).unwrap();
        assert_eq!(up.filename.as_deref(), Some("station4.json"));
        assert_eq!(up.text(), "{}");
    }

    #[test]
    fn upload_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Upload::from_path(&dir.path().join("missing.json")).expect_err("missing");
        assert!(matches!(err, ScenarioError::Io(_)));
    }
}
