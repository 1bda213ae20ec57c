use clap::Args;
use fa_arc0::Arc0Archive;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct ListArgs {
    /// An input ARC0 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let archive = Arc0Archive::new(&mut f)?;

        for dir in &archive.root().children {
            println!("{}/", dir.name.blue().bold());
            for entry in &dir.children {
                let size = entry
                    .file_index
                    .and_then(|i| archive.metadata_for_index(i))
                    .map_or(0, |m| m.size);
                println!("  {} {}", entry.name, format!("({size} bytes)").dimmed());
            }
        }

        println!(
            "{} directories, {} files, {} bytes",
            archive.root().children.len(),
            archive.len(),
            archive.total_size().unwrap_or(0)
        );

        Ok(())
    }
}
