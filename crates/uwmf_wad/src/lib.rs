//! This library converts tile maps into **UWMF** map archives for *Wolfenstein 3D* source ports.
//!
//! # UWMF Map Archive Documentation
//!
//! A map is stored as a text lump (`TEXTMAP`) inside a **WAD** container. WAD files are the
//! archives used by id Software's engines and are typically identified with the `.wad` extension.
//!
//! ## File Structure
//!
//! A WAD file consists of a header, followed by the lump data, followed by the lump directory.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "PWAD" (or "IWAD")                                |
//! | 0x0004         | Lump Count             | 4 bytes: Number of entries in the directory                |
//! | 0x0008         | Directory Offset       | 4 bytes: Offset to the directory                           |
//!
//! ### Lump Data
//!
//! Lump data is stored directly after the header. Map archives generated by this crate contain a
//! single data lump, the text map, so it always starts at offset `0x000C`.
//!
//! ### Directory
//!
//! The directory lists every lump in the archive. Each entry has the following structure:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Data Offset            | 4 bytes: Offset to the start of the lump data           |
//! | 0x0004         | Size                   | 4 bytes: Size of the lump data                          |
//! | 0x0008         | Name                   | 8 bytes: ASCII name, padded with NUL                    |
//!
//! Marker lumps have no data, their offset and size are both zero. A map archive always holds
//! exactly three entries:
//!
//! - `MAP01`: marker naming the map
//! - `TEXTMAP`: the text map, at offset `0x000C`
//! - `ENDMAP`: marker closing the map
//!
//! ### Text Map
//!
//! The text map is an ASCII list of `key=value;` assignments and `name{ ... }` blocks, see
//! [`textmap`] for the exact output.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.wad`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Supported Maps**: finite maps with square tiles
//!

pub mod error;
pub mod map;
pub mod read;
pub mod textmap;
pub mod types;
pub mod write;

pub use map::MapDescriptor;
pub use read::WadArchive;
pub use write::WadWriter;

use tracing::instrument;

/// Convert a map into the bytes of a map archive.
///
/// Nothing is produced when the map is rejected, the geometry error is returned as is.
///
/// ```
/// # fn doit() -> uwmf_wad::error::Result<()>
/// # {
/// use uwmf_wad::MapDescriptor;
///
/// let map = MapDescriptor::builder()
///     .tile_width(64)
///     .tile_height(64)
///     .width(10)
///     .height(10)
///     .build();
///
/// let wad = uwmf_wad::convert(&map)?;
/// assert_eq!(&wad[..4], b"PWAD");
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[instrument(err)]
pub fn convert(map: &MapDescriptor) -> error::Result<Vec<u8>> {
    let payload = textmap::encode(map)?;
    write::write_map(&payload)
}
