//! Summary of the files written by a run.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One output file and the bitmap sizes it holds.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name inside the output directory
    pub name: String,

    /// Pixel dimensions of every frame, in file order
    pub dimensions: Vec<(u32, u32)>,

    /// Size on disk after writing
    pub bytes: u64,
}

/// Everything a successful run produced.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
}

impl Report {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Table lines of the human summary, one per file.
    pub fn summary_lines(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|file| {
                let size_kb = file.bytes as f64 / 1024.0;
                format!("  - {:30} {:>6.1} KB", file.name, size_kb)
            })
            .collect()
    }

    pub fn print_summary(&self) {
        println!(
            "\n✓ Generated {} icon files in {}",
            self.files.len(),
            self.output_dir.display()
        );
        println!("\nFiles created:");
        for line in self.summary_lines() {
            println!("{line}");
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
