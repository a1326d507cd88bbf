//! Types for reading WAD archives
//!

use binrw::BinRead;
use std::{
    borrow::Cow,
    fmt::{self, Debug},
    io::{self, Read, Seek, SeekFrom},
};

use crate::{
    error::{Error, LumpNotFoundError, Result},
    types::{LumpName, WadHeader, WadKind, WadLump},
};

/// A struct for reading a lump from a WAD file
pub struct WadFile<'a, R: Read + Seek> {
    lump: WadLump,
    reader: io::Take<&'a mut R>,
}

impl<R: Read + Seek> Debug for WadFile<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WadFile({:#?})", self.lump)
    }
}

/// Methods for retrieving information on WAD lumps
impl<R: Read + Seek> WadFile<'_, R> {
    /// Get the name of the lump without padding
    pub fn name(&self) -> Cow<'_, str> {
        self.lump.name.as_str()
    }

    /// Get the name of the lump, as the raw 8 byte field.
    pub fn name_raw(&self) -> &[u8] {
        self.lump.name.as_raw()
    }

    /// Get the size of the lump data, in bytes
    pub fn size(&self) -> u64 {
        self.lump.size as u64
    }

    /// Get the starting offset of the lump data
    pub fn offset(&self) -> u64 {
        self.lump.offset as u64
    }

    /// Whether this entry only marks a position in the directory
    pub fn is_marker(&self) -> bool {
        self.lump.is_marker()
    }
}

impl<R: Read + Seek> Read for WadFile<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

/// WAD archive reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_wad_contents(reader: impl Read + Seek) -> uwmf_wad::error::Result<()> {
///     let mut wad = uwmf_wad::WadArchive::new(reader)?;
///
///     for i in 0..wad.len() {
///         let mut lump = wad.by_index(i)?;
///         println!("Lump: {}", lump.name());
///         std::io::copy(&mut lump, &mut std::io::stdout())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct WadArchive<R> {
    reader: R,
    header: WadHeader,
    lumps: Vec<WadLump>,
}

impl<R> WadArchive<R> {
    /// Number of entries contained in the directory.
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    /// Whether the directory contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the magic this archive was identified with.
    pub fn kind(&self) -> WadKind {
        self.header.kind
    }

    /// Returns the offset of the directory from the start of the file.
    pub fn directory_offset(&self) -> u32 {
        self.header.directory_offset
    }

    /// Returns the directory entries in file order.
    pub fn lumps(&self) -> &[WadLump] {
        &self.lumps
    }

    /// Returns an iterator over all the lump names in directory order.
    pub fn lump_names(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.lumps.iter().map(|l| l.name.as_str())
    }

    /// Get the index of the first lump with the given name, if it's present.
    ///
    /// Names are compared after truncation to 8 bytes, as they would be stored.
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        let name = LumpName::new(name);
        self.lumps.iter().position(|l| l.name == name)
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> WadArchive<R> {
    /// Read a WAD archive collecting its directory.
    pub fn new(mut reader: R) -> Result<WadArchive<R>> {
        if let Ok((header, lumps)) = Self::get_metadata(&mut reader) {
            return Ok(WadArchive {
                reader,
                header,
                lumps,
            });
        }

        Err(Error::InvalidArchive)
    }

    /// Search for a lump by name
    pub fn by_name(&mut self, name: &str) -> Result<WadFile<'_, R>> {
        let Some(index) = self.index_for_name(name) else {
            return Err(Error::LumpNotFound(LumpNotFoundError::Name(name.to_owned())));
        };
        self.by_index(index)
    }

    /// Get a contained lump by index
    pub fn by_index(&mut self, index: usize) -> Result<WadFile<'_, R>> {
        let lump = *self
            .lumps
            .get(index)
            .ok_or(Error::LumpNotFound(LumpNotFoundError::Index(index)))?;

        self.reader.seek(SeekFrom::Start(lump.offset as u64))?;

        Ok(WadFile {
            lump,
            reader: self.reader.by_ref().take(lump.size as u64),
        })
    }

    fn get_metadata(reader: &mut R) -> Result<(WadHeader, Vec<WadLump>)> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.rewind()?;

        let header = WadHeader::read(reader)?;

        reader.seek(SeekFrom::Start(header.directory_offset as u64))?;
        let lumps = (0..header.lumps)
            .map(|_| WadLump::read(reader).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;

        if let Some(lump) = lumps
            .iter()
            .find(|l| l.offset as u64 + l.size as u64 > file_size)
        {
            return Err(Error::CustomError(format!(
                "lump {} extends past the end of the file",
                lump.name
            )));
        }

        Ok((header, lumps))
    }
}
