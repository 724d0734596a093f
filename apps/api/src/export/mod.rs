// Record → XML export.
// Converts a ProjectRecord into the fixed-schema, ISO-8859-1-encoded XML
// document the regional filing platform ingests, packaged as base64 of the
// Latin-1 bytes for a data-URI download. The serializer is a pure function
// of the record: no I/O, no shared state, deterministic output.

pub mod document;
pub mod handlers;
pub mod sanitize;
pub mod writer;
