//! The tagged binary wire format.
//!
//! - [`Tag`]: one-byte type tags and the [`check_tag`] / [`write_tag`] helpers.
//! - [`smv_int`]: the sign-magnitude variable-length integer used for every
//!   multi-byte integer and every length prefix.
//! - [`Writer`] / [`Reader`]: byte sinks and sources.
//! - [`WireError`] / [`ErrorKind`]: failure values, and the process-wide
//!   [`ErrorHandler`] that top-level entry points report to.
//! - [`WireCodec`]: the per-type encoding contract.
//! - [`encode_instance`] / [`decode_instance`]: class instances, field by field.
//! - [`schema`]: self-describing class layouts.

mod codec;
mod error;
mod handler;
mod instance;
mod stream;
mod tag;
mod utf8;

pub mod schema;
pub mod smv_int;

pub use codec::{WireCodec, write_class_type_info};
pub use error::{ErrorKind, WireError};
pub use handler::{
    CollectingErrorHandler, ErrorHandler, LogErrorHandler, error_handler, report_with,
    reset_error_handler, set_error_handler,
};
pub use instance::{decode_instance, encode_instance};
pub use schema::{
    ClassSchema, SchemaField, TypeDescriptor, read_schema, read_schema_record, write_schema,
    write_schema_record,
};
pub use smv_int::{MAX_SMV_INT_LEN, SmvInt, read_len, read_smv, write_len, write_smv};
pub use stream::{IoReader, IoWriter, Reader, SliceWriter, Writer};
pub use tag::{Tag, check_tag, read_tag, write_tag};
pub use utf8::{read_string, write_str};
