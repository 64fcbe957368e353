//! XML property lists for scheme management
//!
//! A small tree model ([`Value`], [`Dictionary`]) with a reader that accepts
//! the XML plist dialect written by the IDE and a writer that produces a
//! canonical, byte-stable rendering of it.

pub mod de;
pub mod error;
pub mod ser;
pub mod value;

pub use de::{from_slice, from_str};
pub use error::{Error, Result};
pub use ser::{to_string, to_vec};
pub use value::{Dictionary, Value};
