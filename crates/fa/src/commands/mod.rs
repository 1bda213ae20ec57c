pub mod arc0;
pub mod lz10;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle ARC0 (.fa) archives
    Arc0 {
        #[command(subcommand)]
        command: arc0::Arc0Commands,
    },
    /// Handle raw LZ10 streams
    Lz10 {
        #[command(subcommand)]
        command: lz10::Lz10Commands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Arc0 { command } => command.handle(),
            Commands::Lz10 { command } => command.handle(),
        }
    }
}
