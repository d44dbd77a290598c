//! Dynamically-shaped RLP values.

use crate::{encode::Encodable, error::Result, EncodeBuffer, EMPTY_LIST_CODE};
use std::fmt;

/// Arbitrary nested data, for callers whose item shape is only known at
/// runtime.
///
/// - `Item::Array(vec![])` is equivalent to `[]`.
/// - `Item::Array(vec![Item::Data(vec![])])` is equivalent to `[""]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    /// A string item: an opaque run of bytes.
    Data(Vec<u8>),
    /// A list item: an ordered sequence of nested items.
    Array(Vec<Item>),
}

impl Encodable for Item {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        match self {
            Self::Data(data) => {
                buf.encode_string(data);
                Ok(())
            }
            Self::Array(items) => {
                let mark = buf.begin_list();
                for item in items {
                    item.encode(buf)?;
                }
                buf.end_list(mark);
                Ok(())
            }
        }
    }

    // An absent dynamic value stands for the empty list.
    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()> {
        buf.write_raw(&[EMPTY_LIST_CODE]);
        Ok(())
    }
}

impl From<Vec<u8>> for Item {
    fn from(data: Vec<u8>) -> Self {
        Self::Data(data)
    }
}

impl From<&[u8]> for Item {
    fn from(data: &[u8]) -> Self {
        Self::Data(data.to_vec())
    }
}

impl FromIterator<Self> for Item {
    fn from_iter<T: IntoIterator<Item = Self>>(iter: T) -> Self {
        Self::Array(Vec::from_iter(iter))
    }
}

// Display as nested hex values.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(data) => {
                f.write_str("\"0x")?;
                for byte in data {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("\"")?;
            }
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")?;
            }
        }
        Ok(())
    }
}
