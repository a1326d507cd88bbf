use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::Path};

pub mod convert;
pub mod create;
pub mod diff;
pub mod info;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Convert Tiled JSON maps into WAD files
    Convert(convert::ConvertArgs),
    /// Create a blank map WAD file
    Create(create::CreateArgs),
    /// Compare the text maps of two WAD files
    Diff(diff::DiffArgs),
    /// List the contents of a WAD file
    Info(info::InfoArgs),
}

impl Commands {
    pub fn handle(&self) -> Result<()> {
        match self {
            Commands::Convert(convert) => convert.handle(),
            Commands::Create(create) => create.handle(),
            Commands::Diff(diff) => diff.handle(),
            Commands::Info(info) => info.handle(),
        }
    }
}

/// Open a file for writing, refusing to replace an existing one unless asked to
pub(crate) fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    }
}

/// Read the text map lump out of a WAD file
pub(crate) fn read_textmap(path: &Path) -> Result<String> {
    use std::io::Read;

    let f = File::open(path)
        .into_diagnostic()
        .context(format!("opening {}", path.display()))?;
    let mut wad = uwmf_wad::WadArchive::new(f).context(format!("reading {}", path.display()))?;

    let mut textmap = String::new();
    wad.by_name(uwmf_wad::write::TEXTMAP)?
        .read_to_string(&mut textmap)
        .into_diagnostic()
        .context(format!("reading TEXTMAP from {}", path.display()))?;

    Ok(textmap)
}
