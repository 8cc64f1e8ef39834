use std::io::Write;
use std::process::Command;

use crate::analysis::{AnalysisResponse, DocumentAnalyzer};
use crate::error::ExtractError;

/// Region the analysis service is called in.
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// Analysis backend shelling out to `aws textract analyze-document`.
///
/// The aws CLI handles credentials and request signing, so the crate
/// carries no SDK dependency. One blocking call per page image.
pub struct AwsCliAnalyzer {
    region: String,
}

impl AwsCliAnalyzer {
    pub fn new(region: impl Into<String>) -> Self {
        AwsCliAnalyzer {
            region: region.into(),
        }
    }

    /// Check if the aws CLI is available on the system.
    pub fn is_available() -> bool {
        Command::new("aws")
            .arg("--version")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for AwsCliAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl DocumentAnalyzer for AwsCliAnalyzer {
    fn analyze(&self, image_bytes: &[u8]) -> Result<AnalysisResponse, ExtractError> {
        // Write the page image to a temp file the CLI can read back.
        let mut tmpfile = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| ExtractError::Analyze(e.to_string()))?;
        tmpfile
            .write_all(image_bytes)
            .map_err(|e| ExtractError::Analyze(e.to_string()))?;

        let document_arg = format!("Bytes=fileb://{}", tmpfile.path().display());
        let output = Command::new("aws")
            .args(["textract", "analyze-document"])
            .arg("--document")
            .arg(&document_arg)
            .args(["--feature-types", "TABLES"])
            .args(["--region", &self.region])
            .args(["--cli-binary-format", "raw-in-base64-out"])
            .args(["--output", "json"])
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractError::AwsCliNotFound
                } else {
                    ExtractError::Analyze(format!("aws textract failed: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ExtractError::AnalyzeFailed { code, stderr });
        }

        let response: AnalysisResponse = serde_json::from_slice(&output.stdout)?;
        Ok(response)
    }

    fn backend_name(&self) -> &str {
        "aws-cli"
    }
}
