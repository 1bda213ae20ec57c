pub mod export_names;
pub mod extract;
pub mod inject_names;
pub mod list;

#[derive(clap::Subcommand)]
pub enum Arc0Commands {
    /// List the directory tree of an archive
    List(list::ListArgs),
    /// Extract an archive into a directory
    Extract(extract::ExtractArgs),
    /// Copy the raw name-table region out of an archive
    ExportNames(export_names::ExportNamesArgs),
    /// Replace the raw name-table region of an archive
    InjectNames(inject_names::InjectNamesArgs),
}

impl Arc0Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Arc0Commands::List(list) => list.handle(),
            Arc0Commands::Extract(extract) => extract.handle(),
            Arc0Commands::ExportNames(export) => export.handle(),
            Arc0Commands::InjectNames(inject) => inject.handle(),
        }
    }
}
