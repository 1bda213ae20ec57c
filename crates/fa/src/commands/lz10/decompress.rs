use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct DecompressArgs {
    /// An input LZ10 stream
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The file to write the decompressed bytes to
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

impl DecompressArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let decompressed = fa_lz10::decompress(&data)?;
        info!(
            "decompressed {} bytes into {} bytes",
            data.len(),
            decompressed.len()
        );

        std::fs::write(&self.output, &decompressed)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;

        Ok(())
    }
}
