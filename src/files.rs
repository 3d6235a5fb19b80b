//! Per-path output buffers with a one-time header/import prologue.
//!
//! The first write to a path installs the `package domain` header and a
//! deduplicated import block; later writes append declaration text. Buffers
//! are append-only and keyed by relative output path, so repeat runs over the
//! same domain list produce byte-identical files.

use crate::gen::GeneratedFiles;
use crate::schema::Domain;
use std::collections::{BTreeMap, BTreeSet};

/// Fixed infrastructure imports present in every generated file: context,
/// the generic JSON codec, and the easyjson writer/lexer packages.
pub const FIXED_IMPORTS: [&str; 7] = [
    "context",
    "encoding/json",
    "errors",
    "fmt",
    "github.com/mailru/easyjson",
    "github.com/mailru/easyjson/jlexer",
    "github.com/mailru/easyjson/jwriter",
];

/// In-memory buffers for generated file content, keyed by output path.
#[derive(Debug, Default)]
pub struct FileBuffers {
    buffers: BTreeMap<String, String>,
}

impl FileBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer for `path`, creating it with a header and import prologue on
    /// first use. The domain's own metadata lands in the package comment only
    /// when `path` is that domain's canonical `pkg/pkg.go` file.
    pub fn get(
        &mut self,
        path: &str,
        pkg_name: &str,
        d: &Domain,
        domains: &[Domain],
        base: &str,
    ) -> &mut String {
        if !self.buffers.contains_key(path) {
            let canonical = path
                .rsplit('/')
                .next()
                .is_some_and(|file| file == format!("{}.go", pkg_name));
            let header = file_header(canonical.then_some(d), d, domains, base);
            self.buffers.insert(path.to_string(), header);
        }
        self.buffers
            .get_mut(path)
            .unwrap_or_else(|| unreachable!("buffer inserted above"))
    }

    /// Finished buffers, keyed by path, as byte content for the persistence
    /// layer.
    pub fn into_files(self) -> GeneratedFiles {
        self.buffers
            .into_iter()
            .map(|(path, content)| (path, content.into_bytes()))
            .collect()
    }
}

fn file_header(canonical: Option<&Domain>, d: &Domain, domains: &[Domain], base: &str) -> String {
    let mut out = String::from("// Code generated by pdlgen. DO NOT EDIT.\n\n");

    // Every generated file shares the one "domain" package namespace.
    match canonical {
        Some(dom) => {
            let about = dom
                .description
                .as_deref()
                .map(|s| s.replace('\n', " "))
                .unwrap_or_else(|| format!("the {} protocol domain", dom.domain));
            out.push_str(&format!(
                "// Package domain contains {} declarations ({}).\npackage domain\n\n",
                dom.domain, about
            ));
        }
        None => {
            out.push_str("// Package domain contains shared protocol declarations.\npackage domain\n\n");
        }
    }

    let mut imports: BTreeSet<String> = FIXED_IMPORTS.iter().map(|s| s.to_string()).collect();
    imports.insert(base.to_string());
    // One import per other domain: any of them may be the target of a $ref.
    for other in domains {
        if other.domain != d.domain {
            imports.insert(format!("{}/{}", base, other.package_name()));
        }
    }

    out.push_str("import (\n");
    for import in &imports {
        out.push_str(&format!("\t\"{}\"\n", import));
    }
    out.push_str(")\n");

    out
}
