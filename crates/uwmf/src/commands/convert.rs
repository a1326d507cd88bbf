use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use uwmf_wad::MapDescriptor;
use walkdir::WalkDir;

#[derive(Args)]
pub struct ConvertArgs {
    /// A Tiled JSON map, or a directory of them
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// A target WAD file, or a directory when converting a directory
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

fn is_tiled_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == "tmj" || ext == "json")
}

impl ConvertArgs {
    fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        info!("converting {} to {}", input.display(), output.display());

        let f = File::open(input)
            .into_diagnostic()
            .context(format!("opening {}", input.display()))?;
        let map = MapDescriptor::from_tiled_json(f)
            .context(format!("reading map from {}", input.display()))?;

        let wad = uwmf_wad::convert(&map).context(format!("converting {}", input.display()))?;

        let mut out = super::create_output(output, self.overwrite)?;
        out.write_all(&wad)
            .into_diagnostic()
            .context(format!("writing {}", output.display()))?;

        Ok(())
    }

    pub fn handle(&self) -> Result<()> {
        if !self.input.is_dir() {
            let output = self
                .output
                .clone()
                .unwrap_or_else(|| self.input.with_extension("wad"));
            return self.convert_file(&self.input, &output);
        }

        let files = WalkDir::new(&self.input)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir() && is_tiled_json(e.path()))
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("no maps found in {}", self.input.display()));
        }

        let mut failures = 0;
        for file in files {
            let output = match &self.output {
                Some(dir) => {
                    let name = file
                        .path()
                        .strip_prefix(&self.input)
                        .into_diagnostic()?
                        .with_extension("wad");
                    let target = dir.join(name);
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)
                            .into_diagnostic()
                            .context(format!("creating {}", parent.display()))?;
                    }
                    target
                }
                None => file.path().with_extension("wad"),
            };

            if let Err(e) = self.convert_file(file.path(), &output) {
                warn!("skipping {}: {:?}", file.path().display(), e);
                failures += 1;
            }
        }

        if failures > 0 {
            return Err(miette!("{} map(s) could not be converted", failures));
        }

        Ok(())
    }
}
