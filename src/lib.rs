//! Reflection-driven binary serialization.
//!
//! This facade re-exports the workspace crates under short names:
//!
//! - [`reflect`]: field metadata, flattened field views, type reflections,
//!   the type registry and the tagged binary wire format.
//!
//! ```
//! use reflector::reflect::{api, derive::Reflect};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let mut bytes = Vec::new();
//! api::reflect_serialize(&Point { x: 3, y: -4 }, &mut bytes).unwrap();
//!
//! let mut back = Point::default();
//! api::reflect_deserialize(&mut back, &mut bytes.as_slice()).unwrap();
//! assert_eq!(back, Point { x: 3, y: -4 });
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use rfl_reflect as reflect;
