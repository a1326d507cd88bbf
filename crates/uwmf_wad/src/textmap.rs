//! Encoder for the UWMF text map lump
//!
//! A text map is a flat sequence of `key=value;` assignments followed by `name{ ... }` blocks. The
//! order of assignments and blocks is significant to consumers and is always emitted as:
//!
//! ```text
//! namespace="Wolf3D";name="MAP01";tilesize=64;width=10;height=10;plane{depth=64;}sector{textureceiling="#383838";texturefloor="#707070";}
//! ```

use derive_more::{Display, From};
use std::fmt;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::map::MapDescriptor;

/// Namespace written to every map
pub const NAMESPACE: &str = "Wolf3D";

/// Name of the single map stored in the archive
pub const MAP_NAME: &str = "MAP01";

/// Depth of the only plane
pub const PLANE_DEPTH: i64 = 64;

/// Ceiling color of the only sector
pub const CEILING_TEXTURE: &str = "#383838";

/// Floor color of the only sector
pub const FLOOR_TEXTURE: &str = "#707070";

/// A value on the right hand side of an assignment
///
/// Strings are quoted verbatim, embedded quotes are not escaped.
#[derive(Display, From, Debug, Clone, PartialEq, Eq)]
pub enum Value {
    #[display("\"{_0}\"")]
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value.into())
    }
}

struct Assignment<'a>(&'a str, &'a Value);

impl fmt::Display for Assignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={};", self.0, self.1)
    }
}

/// Format a single `key=value;` assignment
///
/// ```
/// use uwmf_wad::textmap::key_value;
///
/// assert_eq!(key_value("namespace", "Wolf3D"), r#"namespace="Wolf3D";"#);
/// assert_eq!(key_value("width", 10u32), "width=10;");
/// assert_eq!(key_value("secret", true), "secret=true;");
/// ```
pub fn key_value(key: &str, value: impl Into<Value>) -> String {
    Assignment(key, &value.into()).to_string()
}

/// A named group of assignments, such as `plane{depth=64;}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    name: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Block {
    pub fn new(name: &'static str) -> Self {
        Block {
            name,
            fields: Vec::new(),
        }
    }

    /// Append an assignment to the end of the block
    pub fn field(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (key, value) in &self.fields {
            write!(f, "{}", Assignment(key, value))?;
        }
        f.write_str("}")
    }
}

/// An ordered text map document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMap {
    fields: Vec<(&'static str, Value)>,
    blocks: Vec<Block>,
}

impl TextMap {
    /// Describe a validated map as a text map.
    ///
    /// Fails with [`crate::error::Error::UnsupportedGeometry`] for infinite maps or maps with non
    /// square tiles.
    pub fn from_map(map: &MapDescriptor) -> Result<TextMap> {
        let tile_size = map.validate()?;

        Ok(TextMap::default()
            .field("namespace", NAMESPACE)
            .field("name", MAP_NAME)
            .field("tilesize", tile_size)
            .field("width", map.width)
            .field("height", map.height)
            .block(Block::new("plane").field("depth", PLANE_DEPTH))
            .block(
                Block::new("sector")
                    .field("textureceiling", CEILING_TEXTURE)
                    .field("texturefloor", FLOOR_TEXTURE),
            ))
    }

    /// Append a top level assignment, these are always written before any block
    pub fn field(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// Append a block after the previously added ones
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Render the document as the bytes stored in the `TEXTMAP` lump
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for TextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.fields {
            write!(f, "{}", Assignment(key, value))?;
        }
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Encode the text map lump for a map.
#[instrument(err)]
pub fn encode(map: &MapDescriptor) -> Result<Vec<u8>> {
    let payload = TextMap::from_map(map)?.to_bytes();
    debug!(size = payload.len(), "encoded text map");
    Ok(payload)
}

#[cfg(test)]
mod test {
    use pretty_assertions::{assert_eq, assert_str_eq};

    use crate::error::{Error, GeometryError, Result};
    use crate::map::MapDescriptor;
    use crate::textmap::{encode, key_value, Block, TextMap, Value};

    fn map(tile_width: u32, tile_height: u32, width: u32, height: u32) -> MapDescriptor {
        MapDescriptor::builder()
            .tile_width(tile_width)
            .tile_height(tile_height)
            .width(width)
            .height(height)
            .build()
    }

    #[test]
    fn format_values() {
        assert_eq!(Value::from("#383838").to_string(), "\"#383838\"");
        assert_eq!(Value::from(0u32).to_string(), "0");
        assert_eq!(Value::from(4096i64).to_string(), "4096");
        assert_eq!(Value::from(-8i64).to_string(), "-8");
        assert_eq!(Value::from(false).to_string(), "false");
    }

    #[test]
    fn format_key_value() {
        assert_eq!(key_value("name", "MAP01"), "name=\"MAP01\";");
        assert_eq!(key_value("tilesize", 64u32), "tilesize=64;");
        assert_eq!(key_value("flag", true), "flag=true;");
    }

    #[test]
    fn strings_are_not_escaped() {
        assert_eq!(key_value("comment", "say \"hi\""), "comment=\"say \"hi\"\";");
    }

    #[test]
    fn format_block() {
        let block = Block::new("sector")
            .field("textureceiling", "#383838")
            .field("texturefloor", "#707070");

        assert_str_eq!(
            block.to_string(),
            "sector{textureceiling=\"#383838\";texturefloor=\"#707070\";}"
        );
    }

    #[test]
    fn empty_block() {
        assert_eq!(Block::new("plane").to_string(), "plane{}");
    }

    #[test]
    fn fields_render_before_blocks() {
        let textmap = TextMap::default()
            .block(Block::new("plane").field("depth", 64i64))
            .field("width", 1u32);

        assert_str_eq!(textmap.to_string(), "width=1;plane{depth=64;}");
    }

    #[test]
    fn encode_ten_by_ten() -> Result<()> {
        let payload = encode(&map(64, 64, 10, 10))?;

        assert_str_eq!(
            String::from_utf8_lossy(&payload),
            concat!(
                "namespace=\"Wolf3D\";name=\"MAP01\";tilesize=64;width=10;height=10;",
                "plane{depth=64;}",
                "sector{textureceiling=\"#383838\";texturefloor=\"#707070\";}"
            )
        );

        Ok(())
    }

    #[test]
    fn tile_size_comes_from_tiles() -> Result<()> {
        let textmap = TextMap::from_map(&map(32, 32, 128, 96))?;
        let rendered = textmap.to_string();

        assert!(rendered.contains("tilesize=32;width=128;height=96;"));
        assert_eq!(
            textmap.blocks().iter().map(Block::name).collect::<Vec<_>>(),
            vec!["plane", "sector"]
        );

        Ok(())
    }

    #[test]
    fn encode_rejects_infinite() {
        let mut infinite = map(64, 64, 10, 10);
        infinite.infinite = true;

        assert!(matches!(
            encode(&infinite),
            Err(Error::UnsupportedGeometry(GeometryError::InfiniteMap))
        ));
    }

    #[test]
    fn encode_rejects_non_square() {
        let err = encode(&map(64, 48, 10, 10)).unwrap_err();

        assert!(matches!(
            err,
            Error::UnsupportedGeometry(GeometryError::NonSquareTile {
                width: 64,
                height: 48
            })
        ));
        assert!(err.to_string().contains("square tiles"));
    }
}
