//! Report writers.

use std::fs;
use std::path::Path;

use serde::Serialize;

use pos52_core::error::{CoreError, CoreResult};

/// Writes a serialisable report as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonReportWriter {
    pretty: bool,
}

impl Default for JsonReportWriter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonReportWriter {
    /// Pretty-printing writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line writer.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Writes `report` to `path`, creating missing parent directories.
    ///
    /// The report is serialised fully before the file is touched, so a
    /// serialisation failure leaves any existing file in place.
    pub fn write<T>(&self, path: impl AsRef<Path>, report: &T) -> CoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();
        let name = path.display().to_string();

        let mut text = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
        .map_err(|e| CoreError::io(&name, e))?;
        text.push('\n');

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CoreError::io(parent.display().to_string(), e))?;
        }
        fs::write(path, text).map_err(|e| CoreError::io(&name, e))?;

        log::info!("wrote {name}");
        Ok(())
    }
}
