//! # pdlgen — Protocol Domain to Go Source Generator
//!
//! Translates a protocol description (named domains of type, command, and
//! event definitions) into Go source declarations with easyjson-style
//! serialization for enums. The input arrives as already-parsed JSON
//! (`{"domains": [...]}`); the output is a map of relative file paths to
//! generated content that the caller persists.
//!
//! ## Pipeline
//!
//! - **schema**: in-memory protocol description model (types, commands,
//!   events; commands/events lower to synthetic object types)
//! - **resolve**: type descriptor → Go type expression, with cross-domain
//!   `$ref` lookup, optional pointer wrapping, and naming collision checks
//! - **emit**: one declaration per type — alias accessors, enum constant
//!   blocks (sequential or bitmask numbering), string conversion, easyjson
//!   marshal/unmarshal with unknown-value error recording
//! - **files**: append-only per-path buffers with a one-time header and
//!   deduplicated import prologue
//! - **gen**: the façade and the generator registry (`"go"`)
//!
//! ## Usage
//!
//! ```no_run
//! use pdlgen::{generators, Protocol};
//!
//! let protocol = Protocol::from_file("protocol.json")?;
//! let generator = generators()["go"];
//! let emitter = generator(&protocol.domains, "github.com/example/proto")?;
//! for (path, content) in emitter.emit() {
//!     std::fs::write(path, content)?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Errors abort the whole run: there is no partial output for a domain list
//! with a dangling reference or a naming collision. See `tests/` for
//! end-to-end examples.

pub mod emit;
pub mod files;
pub mod gen;
pub mod resolve;
pub mod schema;

pub use gen::{generators, new_go_generator, Emitter, GeneratedFiles, Generator};
pub use resolve::GenError;
pub use schema::{Command, Domain, Event, Kind, Protocol, Type};
