pub mod compress;
pub mod decompress;

#[derive(clap::Subcommand)]
pub enum Lz10Commands {
    /// Compress a file into an LZ10 stream
    Compress(compress::CompressArgs),
    /// Decompress an LZ10 stream into a file
    Decompress(decompress::DecompressArgs),
}

impl Lz10Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Lz10Commands::Compress(compress) => compress.handle(),
            Lz10Commands::Decompress(decompress) => decompress.handle(),
        }
    }
}
