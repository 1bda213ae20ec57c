use clap::Args;
use fa_arc0::Arc0Archive;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Cursor, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct InjectNamesArgs {
    /// An input ARC0 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The replacement name-table region
    #[arg(short, long, value_name = "FILE")]
    names: PathBuf,

    /// The patched archive to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

impl InjectNamesArgs {
    pub fn handle(&self) -> Result<()> {
        let image = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let (name_offset, data_offset) = {
            let archive = Arc0Archive::new(Cursor::new(&image))?;
            let header = archive.header();
            (header.name_offset as usize, header.data_offset as usize)
        };

        let replacement = std::fs::read(&self.names)
            .into_diagnostic()
            .context(format!("path: {}", &self.names.display()))?;

        // The header offsets are left untouched, so the replacement must fill
        // the region exactly.
        let original = data_offset - name_offset;
        if replacement.len() != original {
            miette::bail!(
                "replacement name table is {} bytes, the original region is {original} bytes",
                replacement.len()
            );
        }

        let mut patched = Vec::with_capacity(image.len());
        patched.extend_from_slice(&image[..name_offset]);
        patched.extend_from_slice(&replacement);
        patched.extend_from_slice(&image[data_offset..]);

        std::fs::write(&self.output, &patched)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;
        info!("wrote patched archive to {}", self.output.display());

        Ok(())
    }
}
