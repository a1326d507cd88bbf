use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};
use uwmf_wad::WadArchive;

#[derive(Args)]
pub struct InfoArgs {
    /// An input WAD file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let wad = WadArchive::new(f).context(format!("reading {}", &self.file.display()))?;

        println!(
            "{} with {} lumps, directory at {:#X}",
            wad.kind().bold(),
            wad.len(),
            wad.directory_offset()
        );

        for lump in wad.lumps() {
            if lump.is_marker() {
                println!("  {:<8} {}", lump.name.blue(), "marker".dimmed());
            } else {
                println!(
                    "  {:<8} {:>#10X} {:>10} bytes",
                    lump.name.green(),
                    lump.offset,
                    lump.size
                );
            }
        }

        if wad.index_for_name(uwmf_wad::write::TEXTMAP).is_some() {
            let textmap = super::read_textmap(&self.file)?;
            println!();
            println!("{}", super::diff::split_statements(&textmap));
        }

        Ok(())
    }
}
