use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;
use uwmf_wad::MapDescriptor;

#[derive(Args)]
pub struct CreateArgs {
    /// Width of the map in tiles
    #[arg(long)]
    width: u32,

    /// Height of the map in tiles
    #[arg(long)]
    height: u32,

    /// Size of the square tiles in pixels
    #[arg(long, default_value_t = 64)]
    tile_size: u32,

    /// A target WAD file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl CreateArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let map = MapDescriptor::builder()
            .tile_width(self.tile_size)
            .tile_height(self.tile_size)
            .width(self.width)
            .height(self.height)
            .build();

        let wad = uwmf_wad::convert(&map)?;

        super::create_output(&self.file, self.overwrite)?
            .write_all(&wad)
            .into_diagnostic()
            .context(format!("writing {}", &self.file.display()))?;

        Ok(())
    }
}
