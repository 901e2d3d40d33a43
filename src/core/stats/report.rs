//! Plain-text results report.
//!
//! ```text
//! Resource Usage Times:
//! machines: 812.5 time units
//! Resource Waiting Times:
//! machines: 40 time units
//! Total finished products: 193
//! ProductA: 193 units
//! ```

use super::statistics::Statistics;
use crate::core::errors::ReportError;
use log::info;
use std::fmt::Write as _;
use std::path::Path;

impl Statistics {
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Resource Usage Times:");
        for (class, time) in &self.usage_time {
            let _ = writeln!(out, "{}: {} time units", class, time);
        }
        let _ = writeln!(out, "Resource Waiting Times:");
        for (class, time) in &self.waiting_time {
            let _ = writeln!(out, "{}: {} time units", class, time);
        }
        let _ = writeln!(out, "Total finished products: {}", self.finished_count);
        for (product_type, count) in &self.finished_by_type {
            let _ = writeln!(out, "{}: {} units", product_type, count);
        }
        out
    }

    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        std::fs::write(path, self.render_report()).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("report written to {}", path.display());
        Ok(())
    }
}
