use clap::Args;
use fa_arc0::Arc0Archive;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::PathBuf,
};
use tracing::info;

#[derive(Args)]
pub struct ExportNamesArgs {
    /// An input ARC0 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The file to write the name-table region to
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Decompress the region instead of copying it verbatim
    #[arg(long, default_value_t = false)]
    decompress: bool,
}

impl ExportNamesArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let (name_offset, data_offset) = {
            let archive = Arc0Archive::new(&mut f)?;
            let header = archive.header();
            (header.name_offset as u64, header.data_offset as u64)
        };

        f.seek(SeekFrom::Start(name_offset)).into_diagnostic()?;
        let mut region = vec![0u8; (data_offset - name_offset) as usize];
        f.read_exact(&mut region).into_diagnostic()?;

        let bytes = if self.decompress {
            fa_lz10::decompress(&region)?
        } else {
            region
        };

        std::fs::write(&self.output, &bytes)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;
        info!("wrote {} bytes to {}", bytes.len(), self.output.display());

        Ok(())
    }
}
