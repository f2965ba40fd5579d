// Wed Aug 19 2026 - Alex
//
// Plain-text report writer. One file per analyzed object, grouped in a
// directory named after the sanitized type name.

use crate::analysis::{AnalysisResult, RootPath};
use crate::report::ExportError;
use crate::utils::{strings, time};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const REPORT_WIDTH: usize = 80;

pub struct TextReportWriter {
    output_dir: PathBuf,
}

impl TextReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory the report for `result` lands in, one per type name.
    pub fn report_dir(&self, result: &AnalysisResult) -> PathBuf {
        self.output_dir
            .join(strings::sanitize_type_name(&result.type_name))
    }

    pub fn report_path(&self, result: &AnalysisResult) -> PathBuf {
        self.report_dir(result)
            .join(format!("{}.txt", result.address))
    }

    /// Render the complete report body.
    pub fn generate(&self, result: &AnalysisResult) -> String {
        let mut report = String::new();

        report.push_str(&banner("ROOT PATH ANALYSIS"));
        report.push_str(&format!("Object type:  {}\n", result.type_name));
        report.push_str(&format!("Address:      {}\n", result.address));
        report.push_str(&format!(
            "Analyzed:     {}\n",
            time::format_timestamp(result.analyzed_at)
        ));
        report.push_str(&format!("Root paths:   {}\n", result.root_path_count()));
        report.push('\n');

        if result.is_orphaned() {
            report.push_str("No root paths found: orphaned object awaiting finalization.\n\n");
        } else {
            for path in &result.root_paths {
                report.push_str(&self.generate_path_section(path));
            }
        }

        report.push_str(&"=".repeat(REPORT_WIDTH));
        report.push('\n');
        report
    }

    fn generate_path_section(&self, path: &RootPath) -> String {
        let mut section = String::new();

        section.push_str(&"-".repeat(REPORT_WIDTH));
        section.push('\n');
        section.push_str(&format!("ROOT PATH #{}\n", path.number));
        section.push_str(&"-".repeat(REPORT_WIDTH));
        section.push('\n');
        section.push_str(&format!("Root: {} @ {}\n", path.root_kind, path.root_address));

        for link in &path.links {
            let indent = " ".repeat(link.depth * 2);
            section.push_str(&format!(
                "{}[{}] {} @ {}\n",
                indent, link.depth, link.type_name, link.address
            ));
        }

        if path.has_circular_dependency {
            section.push_str("! chain terminated: circular reference detected\n");
        }
        if path.max_depth_reached {
            section.push_str("! chain terminated: maximum depth reached\n");
        }

        section.push('\n');
        section
    }

    /// Write the report to its place under the output directory and return
    /// the path of the written file.
    pub fn write(&self, result: &AnalysisResult) -> Result<PathBuf, ExportError> {
        let dir = self.report_dir(result);
        fs::create_dir_all(&dir)?;

        let path = self.report_path(result);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.generate(result).as_bytes())?;
        writer.flush()?;

        log::debug!("wrote report {}", path.display());
        Ok(path)
    }
}

fn banner(title: &str) -> String {
    let mut banner = String::new();
    banner.push_str(&"=".repeat(REPORT_WIDTH));
    banner.push('\n');
    banner.push_str(&format!("{:^width$}\n", title, width = REPORT_WIDTH));
    banner.push_str(&"=".repeat(REPORT_WIDTH));
    banner.push('\n');
    banner
}
