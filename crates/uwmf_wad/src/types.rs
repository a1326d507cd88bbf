//! Base types for structure of WAD file.

use binrw::{BinRead, BinWrite};
use std::borrow::Cow;
use std::fmt;

/// Size of [`WadHeader`] on disk, lump data starts right after it
pub const HEADER_SIZE: u32 = 12;

/// Size of a single [`WadLump`] directory entry on disk
pub const LUMP_SIZE: u32 = 16;

/// Width of the name field of a directory entry
pub const LUMP_NAME_SIZE: usize = 8;

/// Identifies what kind of WAD a file is
///
/// Map archives produced by this crate are always [`WadKind::Pwad`].
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub enum WadKind {
    /// "Internal" WAD holding a complete game's data
    #[brw(magic = b"IWAD")]
    Iwad,

    /// "Patch" WAD loaded on top of a game's data
    #[default]
    #[brw(magic = b"PWAD")]
    Pwad,
}

impl fmt::Display for WadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WadKind::Iwad => f.pad("IWAD"),
            WadKind::Pwad => f.pad("PWAD"),
        }
    }
}

/// WAD file header
///
/// Defines the header of the WAD file which always starts with either "IWAD" or "PWAD".
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct WadHeader {
    /// The magic identifying the WAD variant
    pub kind: WadKind,

    /// The number of entries in the directory
    pub lumps: u32,

    /// The offset from the beginning of the file where the directory starts
    pub directory_offset: u32,
}

/// Name of a lump, stored as 8 bytes padded with NUL
#[derive(BinRead, BinWrite, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct LumpName([u8; LUMP_NAME_SIZE]);

impl LumpName {
    /// Create a name from its raw bytes.
    ///
    /// Names longer than eight bytes keep their first eight bytes, shorter names are padded with NUL.
    ///
    /// ```
    /// use uwmf_wad::types::LumpName;
    ///
    /// assert_eq!(LumpName::new("TEXTMAP").as_raw(), b"TEXTMAP\0");
    /// assert_eq!(LumpName::new("BEHAVIOUR").as_raw(), b"BEHAVIOU");
    /// ```
    pub fn new(name: impl AsRef<[u8]>) -> LumpName {
        let name = name.as_ref();
        let len = name.len().min(LUMP_NAME_SIZE);

        let mut raw = [0u8; LUMP_NAME_SIZE];
        raw[..len].copy_from_slice(&name[..len]);
        LumpName(raw)
    }

    /// The full field as stored on disk, including padding
    pub fn as_raw(&self) -> &[u8; LUMP_NAME_SIZE] {
        &self.0
    }

    /// The name without its trailing padding
    pub fn as_bytes(&self) -> &[u8] {
        let end = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(LUMP_NAME_SIZE);
        &self.0[..end]
    }

    /// The name decoded as text, invalid bytes are replaced
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_str())
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumpName({:?})", self.as_str())
    }
}

/// WAD directory entry
///
/// Locates the data of a single lump within the file. Marker lumps carry no data and are stored with
/// an offset and size of zero.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct WadLump {
    /// The offset to the data for this lump from the start of the file
    pub offset: u32,

    /// The size of this lump's data
    pub size: u32,

    /// The name of this lump
    pub name: LumpName,
}

impl WadLump {
    pub fn new(offset: u32, size: u32, name: impl AsRef<[u8]>) -> WadLump {
        WadLump {
            offset,
            size,
            name: LumpName::new(name),
        }
    }

    /// An entry without data, used to delimit groups of lumps
    pub fn marker(name: impl AsRef<[u8]>) -> WadLump {
        WadLump::new(0, 0, name)
    }

    pub fn is_marker(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{LumpName, WadHeader, WadKind, WadLump};

    #[test]
    fn read_pwad_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x50, 0x57, 0x41, 0x44,
            0x03, 0x00, 0x00, 0x00,
            0x8A, 0x00, 0x00, 0x00,
        ]);

        let expected = WadHeader {
            kind: WadKind::Pwad,
            lumps: 3,
            directory_offset: 138,
        };

        assert_eq!(WadHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_iwad_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x49, 0x57, 0x41, 0x44,
            0x00, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
        ]);

        let expected = WadHeader {
            kind: WadKind::Iwad,
            lumps: 0,
            directory_offset: 12,
        };

        assert_eq!(WadHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_invalid_header() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x57, 0x41, 0x44, 0x32,
            0x00, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
        ]);

        assert!(WadHeader::read(&mut input).is_err());
    }

    #[test]
    fn write_pwad_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x50, 0x57, 0x41, 0x44,
            0x03, 0x00, 0x00, 0x00,
            0x8A, 0x00, 0x00, 0x00,
        ];

        let header = WadHeader {
            kind: WadKind::Pwad,
            lumps: 3,
            directory_offset: 138,
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn write_lump() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x0C, 0x00, 0x00, 0x00,
            0x7E, 0x00, 0x00, 0x00,
            0x54, 0x45, 0x58, 0x54, 0x4D, 0x41, 0x50, 0x00,
        ];

        let lump = WadLump::new(12, 126, "TEXTMAP");

        let mut actual = Vec::new();
        lump.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn write_lump_with_long_name() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x4C, 0x4F, 0x4E, 0x47, 0x4C, 0x55, 0x4D, 0x50,
        ];

        let mut actual = Vec::new();
        WadLump::new(0, 0, "LONGLUMPNAME").write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual.len(), 16);
        assert_eq!(&actual[8..], b"LONGLUMP");
        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn write_marker() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x4D, 0x41, 0x50, 0x30, 0x31, 0x00, 0x00, 0x00,
        ];

        let mut actual = Vec::new();
        WadLump::marker("MAP01").write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_lump() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x45, 0x4E, 0x44, 0x4D, 0x41, 0x50, 0x00, 0x00,
        ]);

        let lump = WadLump::read(&mut input)?;
        assert_eq!(lump, WadLump::marker("ENDMAP"));
        assert!(lump.is_marker());
        assert_eq!(lump.name.to_string(), "ENDMAP");

        Ok(())
    }

    #[test]
    fn long_names_keep_eight_bytes() {
        let name = LumpName::new("LONGLUMPNAME");

        assert_eq!(name.as_raw(), b"LONGLUMP");
        assert_eq!(name.as_bytes().len(), 8);
        assert_eq!(name.as_str(), "LONGLUMP");
    }

    #[test]
    fn exact_names_are_not_truncated() {
        assert_eq!(LumpName::new("BLOCKMAP").as_raw(), b"BLOCKMAP");
    }

    #[test]
    fn short_names_are_padded() {
        let name = LumpName::new("MAP01");

        assert_eq!(name.as_raw(), b"MAP01\0\0\0");
        assert_eq!(name.as_bytes(), b"MAP01");
    }

    #[test]
    fn empty_name() {
        assert_eq!(LumpName::new("").as_raw(), &[0u8; 8]);
        assert_eq!(LumpName::default().as_str(), "");
    }
}
