//! Types for writing WAD archives
//!

use binrw::BinWrite;
use bon::Builder;
use std::io::{self, Cursor, Seek, Write};
use tracing::{debug, instrument, Level};

use crate::error::{Error, Result};
use crate::textmap::MAP_NAME;
use crate::types::{LumpName, WadHeader, WadKind, WadLump, HEADER_SIZE, LUMP_SIZE};

/// Name of the lump holding the text map
pub const TEXTMAP: &str = "TEXTMAP";

/// Name of the marker closing a map
pub const ENDMAP: &str = "ENDMAP";

/// Options for how the WAD file should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct WadWriterOptions {
    /// The kind of WAD written in the header
    #[builder(default)]
    pub kind: WadKind,
}

#[derive(Debug, Clone, Copy)]
struct OpenLump {
    name: LumpName,
    start: usize,
}

/// WAD archive generator
///
/// Lump data is laid out in the order lumps are started, directly after the header. The directory
/// follows the data and lists lumps and markers in the order they were added.
///
/// ```
/// # fn doit() -> uwmf_wad::error::Result<()>
/// # {
/// use std::io::Write;
/// use uwmf_wad::write::{WadWriter, WadWriterOptions};
///
/// // We use a buffer here, though you'd normally use a `File`
/// let mut wad = WadWriter::new(std::io::Cursor::new(Vec::new()), WadWriterOptions::default());
///
/// wad.add_marker("MAP01")?;
/// wad.start_lump("TEXTMAP")?;
/// wad.write_all(b"namespace=\"Wolf3D\";")?;
/// wad.add_marker("ENDMAP")?;
///
/// // Apply the changes you've made.
/// let wad = wad.finish()?;
/// assert_eq!(&wad.get_ref()[..4], b"PWAD");
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct WadWriter<W: Write + Seek> {
    inner: W,
    header: WadHeader,
    data_block: Vec<u8>,
    directory: Vec<WadLump>,
    current_lump: Option<OpenLump>,
}

impl<W: Write + Seek> WadWriter<W> {
    /// Initializes the archive.
    ///
    /// Before writing to this object, the [`WadWriter::start_lump`] function should be called.
    pub fn new(inner: W, options: WadWriterOptions) -> WadWriter<W> {
        WadWriter {
            inner,
            header: WadHeader {
                kind: options.kind,
                lumps: 0,
                directory_offset: HEADER_SIZE,
            },
            data_block: Vec::new(),
            directory: Vec::new(),
            current_lump: None,
        }
    }

    /// Returns true if a lump is currently open for writing.
    pub const fn is_writing_lump(&self) -> bool {
        self.current_lump.is_some()
    }

    /// Start a new lump, closing the previous one.
    #[instrument(skip(self, name), fields(lump = %LumpName::new(name.as_ref())), err)]
    pub fn start_lump(&mut self, name: impl AsRef<[u8]>) -> Result<()> {
        self.finish_lump()?;

        self.current_lump = Some(OpenLump {
            name: LumpName::new(name),
            start: self.data_block.len(),
        });

        Ok(())
    }

    /// Add an entry without any data, closing the open lump.
    #[instrument(skip(self, name), fields(lump = %LumpName::new(name.as_ref())), err)]
    pub fn add_marker(&mut self, name: impl AsRef<[u8]>) -> Result<()> {
        self.finish_lump()?;
        self.push_entry(WadLump::marker(name))
    }

    fn finish_lump(&mut self) -> Result<()> {
        let Some(lump) = self.current_lump.take() else {
            return Ok(());
        };

        let offset = file_offset(lump.start)?;
        let size = self.data_block.len() - lump.start;
        let size = u32::try_from(size).map_err(|_| Error::LumpTooLarge(size))?;

        debug!(name = %lump.name, offset, size, "finished lump");
        self.push_entry(WadLump {
            offset,
            size,
            name: lump.name,
        })
    }

    fn push_entry(&mut self, lump: WadLump) -> Result<()> {
        self.directory.push(lump);
        self.header.lumps = u32::try_from(self.directory.len())
            .map_err(|_| Error::CustomError("too many lumps for a wad directory".into()))?;
        Ok(())
    }

    /// Finish the last lump and write the header, lump data and directory
    ///
    /// This will return the writer, but one should normally not append any data to the end of the file.
    #[instrument(skip(self), err)]
    pub fn finish(mut self) -> Result<W> {
        self.finish_lump()?;

        self.header.directory_offset = file_offset(self.data_block.len())?;

        self.header.write(&mut self.inner)?;
        self.inner.write_all(&self.data_block)?;
        for lump in &self.directory {
            lump.write(&mut self.inner)?;
        }

        debug!(
            lumps = self.header.lumps,
            directory_offset = self.header.directory_offset,
            total = u64::from(self.header.directory_offset)
                + u64::from(self.header.lumps) * u64::from(LUMP_SIZE),
            "finished wad"
        );

        Ok(self.inner)
    }
}

impl<W: Write + Seek> Write for WadWriter<W> {
    #[instrument(skip_all, err, ret(level = Level::TRACE), fields(size=buf.len()) )]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.is_writing_lump() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "No lump has been started",
            ));
        }
        io::Write::write(&mut self.data_block, buf)
    }

    #[instrument(skip(self), err)]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn file_offset(data_position: usize) -> Result<u32> {
    data_position
        .checked_add(HEADER_SIZE as usize)
        .and_then(|offset| u32::try_from(offset).ok())
        .ok_or(Error::LumpTooLarge(data_position))
}

/// Wrap an encoded text map into a map archive.
///
/// The archive always holds three lumps: a `MAP01` marker, the `TEXTMAP` lump directly after the
/// header, and an `ENDMAP` marker.
#[instrument(skip_all, err, fields(size = payload.len()))]
pub fn write_map(payload: &[u8]) -> Result<Vec<u8>> {
    let capacity = (HEADER_SIZE + 3 * LUMP_SIZE) as usize + payload.len();
    let mut wad = WadWriter::new(
        Cursor::new(Vec::with_capacity(capacity)),
        WadWriterOptions::builder().kind(WadKind::Pwad).build(),
    );

    wad.add_marker(MAP_NAME)?;
    wad.start_lump(TEXTMAP)?;
    wad.write_all(payload)?;
    wad.add_marker(ENDMAP)?;

    Ok(wad.finish()?.into_inner())
}
