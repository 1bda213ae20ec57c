use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct CompressArgs {
    /// An input file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The LZ10 stream to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

impl CompressArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let compressed = fa_lz10::compress(&data)?;
        info!(
            "compressed {} bytes into {} bytes",
            data.len(),
            compressed.len()
        );

        std::fs::write(&self.output, &compressed)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;

        Ok(())
    }
}
