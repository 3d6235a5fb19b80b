//! Generator façade and the target-language registry.
//!
//! [`generators`] is an explicit table built at startup and handed to the
//! caller; there is no process-global lookup. The one registered key, `"go"`,
//! produces Go declarations. Generation is all-or-nothing: the first
//! unresolved reference, naming collision, or contract violation aborts the
//! run and no partial file map escapes.

use crate::emit::emit_type;
use crate::files::FileBuffers;
use crate::resolve::{check_collisions, GenError};
use crate::schema::Domain;
use std::collections::BTreeMap;

/// Generated output: relative file path to file content.
pub type GeneratedFiles = BTreeMap<String, Vec<u8>>;

/// Shared interface for code emitters.
pub trait Emitter {
    /// Consume the emitter and return the completed files.
    fn emit(self: Box<Self>) -> GeneratedFiles;
}

/// Common signature for code generators: domain list + output base import
/// path.
pub type Generator = fn(&[Domain], &str) -> Result<Box<dyn Emitter>, GenError>;

/// All registered generators, keyed by target-language name.
pub fn generators() -> BTreeMap<&'static str, Generator> {
    BTreeMap::from([("go", new_go_generator as Generator)])
}

/// Go source generator for protocol domain definitions.
pub struct GoGenerator {
    files: FileBuffers,
}

/// Build the Go generator: one canonical `pkg/pkg.go` file per domain, in
/// caller order, streaming types, command Params/Returns, and events through
/// the declaration emitter.
pub fn new_go_generator(
    domains: &[Domain],
    out_base: &str,
) -> Result<Box<dyn Emitter>, GenError> {
    let mut files = FileBuffers::new();

    for d in domains {
        check_collisions(d)?;
        let pkg = d.package_name();
        let path = format!("{pkg}/{pkg}.go");
        tracing::debug!(domain = %d.domain, path = %path, "generating domain");

        let mut decls = String::new();
        for t in &d.types {
            decls.push_str(&emit_type(t, "", "", d, domains, false)?);
        }
        for c in &d.commands {
            // The command envelope already conveys "unused by this call";
            // fields skip the extra optional pointer wrapping.
            decls.push_str(&emit_type(&c.params_type(), "", "Params", d, domains, true)?);
            if let Some(returns) = c.returns_type() {
                decls.push_str(&emit_type(&returns, "", "Returns", d, domains, true)?);
            }
        }
        for e in &d.events {
            decls.push_str(&emit_type(&e.params_type(), "Event", "", d, domains, false)?);
        }

        files.get(&path, &pkg, d, domains, out_base).push_str(&decls);
    }

    Ok(Box::new(GoGenerator { files }))
}

impl Emitter for GoGenerator {
    fn emit(self: Box<Self>) -> GeneratedFiles {
        self.files.into_files()
    }
}
