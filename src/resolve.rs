//! Resolve type descriptors to Go type expressions.
//!
//! Handles primitive mapping, recursive arrays/objects, cross-domain `$ref`
//! lookup, optional pointer wrapping, and deterministic CamelCase naming with
//! collision detection.

use crate::schema::{Domain, Kind, Type};

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("unresolved reference `{reference}` in domain `{domain}`")]
    UnresolvedRef { domain: String, reference: String },
    #[error("naming collision in domain `{domain}`: `{first}` and `{second}` both resolve to `{resolved}`")]
    NamingCollision {
        domain: String,
        first: String,
        second: String,
        resolved: String,
    },
    #[error("schema contract violation for `{domain}.{name}`: {reason}")]
    SchemaViolation {
        domain: String,
        name: String,
        reason: String,
    },
}

/// Deterministic CamelCase: splits on `-`, `_`, `.`, and space, uppercasing
/// each segment head. A leading `-` becomes `Negative` (enum values such as
/// `-Infinity` must stay valid identifiers).
pub fn camel(name: &str) -> String {
    let mut out = String::new();
    let mut rest = name;
    if let Some(stripped) = rest.strip_prefix('-') {
        out.push_str("Negative");
        rest = stripped;
    }
    let mut upper_next = true;
    for c in rest.chars() {
        if matches!(c, '-' | '_' | '.' | ' ') {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Final declared identifier for a type: `prefix + CamelCase(base) + suffix`.
pub fn declared_name(prefix: &str, base: &str, suffix: &str) -> String {
    format!("{}{}{}", prefix, camel(base), suffix)
}

/// Go built-in for a primitive kind. None for object/array/any.
pub fn primitive_type(kind: Kind) -> Option<&'static str> {
    match kind {
        Kind::String => Some("string"),
        Kind::Integer => Some("int64"),
        Kind::Number => Some("float64"),
        Kind::Boolean => Some("bool"),
        Kind::Binary => Some("[]byte"),
        Kind::Object | Kind::Array | Kind::Any => None,
    }
}

/// Conventional accessor name and Go type for primitives that get an alias
/// accessor method (binary blobs do not).
pub fn primitive_accessor(kind: Kind) -> Option<(&'static str, &'static str)> {
    match kind {
        Kind::String => Some(("String", "string")),
        Kind::Integer => Some(("Int64", "int64")),
        Kind::Number => Some(("Float64", "float64")),
        Kind::Boolean => Some(("Bool", "bool")),
        _ => None,
    }
}

/// Resolve a type descriptor to its Go type expression in field position.
///
/// Optional wrapping (a `*` pointer) is applied last and only to primitives
/// and refs; `suppress_optional` disables it for fields whose containing
/// structure already conveys absence (command parameter/return structs).
pub fn resolve_type(
    t: &Type,
    d: &Domain,
    domains: &[Domain],
    suppress_optional: bool,
) -> Result<String, GenError> {
    resolve_at(t, d, domains, suppress_optional, 1)
}

fn resolve_at(
    t: &Type,
    d: &Domain,
    domains: &[Domain],
    suppress_optional: bool,
    indent: usize,
) -> Result<String, GenError> {
    if let Some(reference) = &t.reference {
        let expr = resolve_ref(reference, d, domains)?;
        return Ok(wrap_optional(expr, t.optional && !suppress_optional));
    }
    let kind = t.kind.ok_or_else(|| GenError::SchemaViolation {
        domain: d.domain.clone(),
        name: descriptor_name(t),
        reason: "descriptor has neither a type kind nor a $ref".to_string(),
    })?;
    let expr = match kind {
        Kind::Object => match &t.properties {
            Some(props) => struct_def(props, d, domains, suppress_optional, indent)?,
            // A shapeless object keeps its raw encoded form.
            None => "easyjson.RawMessage".to_string(),
        },
        Kind::Array => {
            let items = t.items.as_deref().ok_or_else(|| GenError::SchemaViolation {
                domain: d.domain.clone(),
                name: descriptor_name(t),
                reason: "array kind without an item type".to_string(),
            })?;
            format!(
                "[]{}",
                resolve_at(items, d, domains, suppress_optional, indent)?
            )
        }
        Kind::Any => "interface{}".to_string(),
        _ => primitive_type(kind)
            .unwrap_or_default()
            .to_string(),
    };
    match kind {
        // Arrays and objects already distinguish absence (nil slice/map/raw);
        // interface{}'s zero value is nil.
        Kind::Object | Kind::Array | Kind::Any => Ok(expr),
        _ => Ok(wrap_optional(expr, t.optional && !suppress_optional)),
    }
}

/// Go struct definition body for an ordered field list. Field order equals
/// declaration order in the descriptor.
pub fn struct_def(
    props: &[Type],
    d: &Domain,
    domains: &[Domain],
    suppress_optional: bool,
    indent: usize,
) -> Result<String, GenError> {
    let tabs = "\t".repeat(indent);
    let mut out = String::from("struct {\n");
    for p in props {
        let field_name = p.name.as_deref().ok_or_else(|| GenError::SchemaViolation {
            domain: d.domain.clone(),
            name: descriptor_name(p),
            reason: "object property without a name".to_string(),
        })?;
        let expr = resolve_at(p, d, domains, suppress_optional, indent + 1)?;
        let tag = if p.optional {
            format!("`json:\"{},omitempty\"`", field_name)
        } else {
            format!("`json:\"{}\"`", field_name)
        };
        out.push_str(&tabs);
        out.push_str(&format!("{} {} {}", camel(field_name), expr, tag));
        if let Some(desc) = p.description.as_deref() {
            out.push_str(&format!(" // {}", desc));
        }
        out.push('\n');
    }
    out.push_str(&"\t".repeat(indent - 1));
    out.push('}');
    Ok(out)
}

/// Look up a `$ref` target. An unqualified name searches the current domain;
/// `Domain.Name` searches the full domain list. A miss aborts generation.
pub(crate) fn resolve_ref(
    reference: &str,
    d: &Domain,
    domains: &[Domain],
) -> Result<String, GenError> {
    if let Some((domain_name, type_name)) = reference.split_once('.') {
        let target = domains
            .iter()
            .find(|x| x.domain == domain_name)
            .and_then(|x| x.find_type(type_name).map(|_| x))
            .ok_or_else(|| GenError::UnresolvedRef {
                domain: d.domain.clone(),
                reference: reference.to_string(),
            })?;
        if target.domain == d.domain {
            Ok(camel(type_name))
        } else {
            Ok(format!("{}.{}", target.package_name(), camel(type_name)))
        }
    } else {
        d.find_type(reference)
            .map(|_| camel(reference))
            .ok_or_else(|| GenError::UnresolvedRef {
                domain: d.domain.clone(),
                reference: reference.to_string(),
            })
    }
}

/// Every identifier a domain will declare must be unique after CamelCase
/// conversion. Collisions are surfaced with both source names so the protocol
/// description can be fixed.
pub fn check_collisions(d: &Domain) -> Result<(), GenError> {
    let mut declared: Vec<(String, String)> = Vec::new();
    for t in &d.types {
        if let Some(id) = t.id.as_deref() {
            declared.push((id.to_string(), declared_name("", id, "")));
        }
    }
    for c in &d.commands {
        declared.push((c.name.clone(), declared_name("", &c.name, "Params")));
        if !c.returns.is_empty() {
            declared.push((c.name.clone(), declared_name("", &c.name, "Returns")));
        }
    }
    for e in &d.events {
        declared.push((e.name.clone(), declared_name("Event", &e.name, "")));
    }

    let mut seen: std::collections::HashMap<String, String> = std::collections::HashMap::new();
    for (source, resolved) in declared {
        if let Some(first) = seen.get(&resolved) {
            return Err(GenError::NamingCollision {
                domain: d.domain.clone(),
                first: first.clone(),
                second: source,
                resolved,
            });
        }
        seen.insert(resolved, source);
    }
    Ok(())
}

fn wrap_optional(expr: String, optional: bool) -> String {
    if optional {
        format!("*{}", expr)
    } else {
        expr
    }
}

fn descriptor_name(t: &Type) -> String {
    t.id
        .as_deref()
        .or(t.name.as_deref())
        .unwrap_or("<anonymous>")
        .to_string()
}
