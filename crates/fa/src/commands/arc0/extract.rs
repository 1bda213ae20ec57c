use clap::Args;
use fa_arc0::Arc0Archive;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input ARC0 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Only extract the entry with this "directory/file" path
    #[arg(short, long, value_name = "PATH")]
    path: Option<String>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let mut archive = Arc0Archive::new(&mut f)?;

        let targets: Vec<String> = match &self.path {
            Some(path) => vec![path.clone()],
            None => archive.file_paths().map(str::to_owned).collect(),
        };

        for entry in targets {
            let mut f_arc = archive.by_path(&entry)?;

            let p = self.directory.join(f_arc.path().unwrap_or(&entry));
            info!("writing {}", p.display());

            let _ = std::fs::create_dir_all(p.parent().unwrap());
            let mut out = if !self.overwrite {
                File::create_new(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            } else {
                File::create(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            };

            std::io::copy(&mut f_arc, &mut out).into_diagnostic()?;
        }

        Ok(())
    }
}
