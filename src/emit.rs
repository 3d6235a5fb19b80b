//! Emit Go declarations for protocol types.
//!
//! One entry point, [`emit_type`], covers every declaration-producing entity:
//! plain aliases get an accessor method, enums get a constant block plus
//! string conversion and easyjson (de)serialization methods, and any `extra`
//! hand-authored source is passed through verbatim at the end.

use crate::resolve::{
    camel, declared_name, primitive_accessor, primitive_type, resolve_ref, resolve_type,
    struct_def, GenError,
};
use crate::schema::{Domain, Kind, Type};

/// Emit the full declaration text for one type. `prefix`/`suffix` shape the
/// declared name (`Event` prefix for events, `Params`/`Returns` suffix for
/// commands); `suppress_optional` is forwarded to field resolution.
pub fn emit_type(
    t: &Type,
    prefix: &str,
    suffix: &str,
    d: &Domain,
    domains: &[Domain],
    suppress_optional: bool,
) -> Result<String, GenError> {
    let base = t.id.as_deref().or(t.name.as_deref()).ok_or_else(|| {
        GenError::SchemaViolation {
            domain: d.domain.clone(),
            name: "<anonymous>".to_string(),
            reason: "top-level type without a declared name".to_string(),
        }
    })?;
    let typ = declared_name(prefix, base, suffix);

    check_contract(t, d, base)?;

    let mut out = String::from("\n");
    out.push_str(&format_comment(&typ, t.description.as_deref()));
    out.push('\n');
    out.push_str(&format!(
        "type {} {}\n",
        typ,
        type_def(t, d, domains, suppress_optional)?
    ));

    // Simple alias: expose the underlying primitive value.
    if t.properties.is_none() {
        if let Some((method, go_type)) = t.kind.and_then(primitive_accessor) {
            out.push_str(&format!(
                "\n// {method} returns the {typ} as {go_type} value.\n\
                 func (t {typ}) {method}() {go_type} {{\n\
                 \treturn {go_type}(t)\n\
                 }}\n"
            ));
        }
    }

    if let Some(values) = &t.enum_values {
        out.push_str(&emit_enum(t, &typ, values)?);
    }

    // The only place hand-written content re-enters generated output; copied
    // through unmodified.
    if let Some(extra) = t.extra.as_deref() {
        out.push('\n');
        out.push_str(extra);
        if !extra.ends_with('\n') {
            out.push('\n');
        }
    }

    Ok(out)
}

/// Right-hand side of the `type X ...` declaration.
fn type_def(
    t: &Type,
    d: &Domain,
    domains: &[Domain],
    suppress_optional: bool,
) -> Result<String, GenError> {
    if let Some(reference) = &t.reference {
        return resolve_ref(reference, d, domains);
    }
    let kind = t.kind.ok_or_else(|| GenError::SchemaViolation {
        domain: d.domain.clone(),
        name: t.id.clone().unwrap_or_default(),
        reason: "descriptor has neither a type kind nor a $ref".to_string(),
    })?;
    match kind {
        Kind::Object => match &t.properties {
            // An empty property list still declares a (field-less) struct;
            // only a missing list means "shapeless".
            Some(props) => struct_def(props, d, domains, suppress_optional, 1),
            None => Ok("easyjson.RawMessage".to_string()),
        },
        Kind::Array => {
            let items = t.items.as_deref().ok_or_else(|| GenError::SchemaViolation {
                domain: d.domain.clone(),
                name: t.id.clone().unwrap_or_default(),
                reason: "array kind without an item type".to_string(),
            })?;
            Ok(format!(
                "[]{}",
                resolve_type(items, d, domains, suppress_optional)?
            ))
        }
        Kind::Any => Ok("interface{}".to_string()),
        _ => Ok(primitive_type(kind).unwrap_or_default().to_string()),
    }
}

/// Enum constant block, string conversion, and easyjson methods.
fn emit_enum(t: &Type, typ: &str, values: &[String]) -> Result<String, GenError> {
    let kind = t.kind.unwrap_or(Kind::String);
    let is_integer = kind == Kind::Integer;
    let (method, go_type) = primitive_accessor(kind).unwrap_or(("String", "string"));

    let mut out = String::new();

    out.push_str(&format!("\n// {} values.\nconst (\n", typ));
    for (i, value) in values.iter().enumerate() {
        let constant = enum_value_name(typ, value);
        let literal = if is_integer && t.enum_bitmask {
            // Power-of-two flags; index 0 is reserved so a zero value means
            // "none set".
            (1u64 << (i + 1)).to_string()
        } else if is_integer {
            // Sequential from 1; zero stays an implicit unset sentinel.
            (i + 1).to_string()
        } else {
            format!("\"{}\"", value)
        };
        out.push_str(&format!("\t{} {} = {}\n", constant, typ, literal));
    }
    out.push_str(")\n");

    // Non-string enums map constants back to their source strings, with a
    // formatted fallback for values outside the known set.
    if kind != Kind::String {
        out.push_str(&format!(
            "\n// String returns the {typ} as string value.\n\
             func (t {typ}) String() string {{\n\
             \tswitch t {{\n"
        ));
        for value in values {
            out.push_str(&format!(
                "\tcase {}:\n\t\treturn \"{}\"\n",
                enum_value_name(typ, value),
                value
            ));
        }
        out.push_str(&format!(
            "\t}}\n\n\treturn fmt.Sprintf(\"{typ}(%d)\", t)\n}}\n"
        ));
    }

    out.push_str(&format!(
        "\n// MarshalEasyJSON satisfies easyjson.Marshaler.\n\
         func (t {typ}) MarshalEasyJSON(out *jwriter.Writer) {{\n\
         \tout.{method}({go_type}(t))\n\
         }}\n\
         \n\
         // MarshalJSON satisfies json.Marshaler.\n\
         func (t {typ}) MarshalJSON() ([]byte, error) {{\n\
         \treturn easyjson.Marshal(t)\n\
         }}\n"
    ));

    out.push_str(&format!(
        "\n// UnmarshalEasyJSON satisfies easyjson.Unmarshaler.\n\
         func (t *{typ}) UnmarshalEasyJSON(in *jlexer.Lexer) {{\n\
         \tswitch {typ}(in.{method}()) {{\n"
    ));
    for value in values {
        let constant = enum_value_name(typ, value);
        out.push_str(&format!("\tcase {constant}:\n\t\t*t = {constant}\n"));
    }
    // An unknown value is recorded on the lexer and does not abort the
    // surrounding document's parse.
    out.push_str(&format!(
        "\n\tdefault:\n\
         \t\tin.AddError(errors.New(\"unknown {typ} value\"))\n\
         \t}}\n\
         }}\n\
         \n\
         // UnmarshalJSON satisfies json.Unmarshaler.\n\
         func (t *{typ}) UnmarshalJSON(buf []byte) error {{\n\
         \treturn easyjson.Unmarshal(buf, t)\n\
         }}\n"
    ));

    Ok(out)
}

/// Constant identifier for one enum value: type name + CamelCase(value).
pub fn enum_value_name(typ: &str, value: &str) -> String {
    format!("{}{}", typ, camel(value))
}

/// Documentation comment line for a declaration.
fn format_comment(name: &str, description: Option<&str>) -> String {
    match description {
        Some(desc) if !desc.trim().is_empty() => {
            format!("// {} {}", name, desc.replace('\n', " "))
        }
        _ => format!("// {} [no description].", name),
    }
}

fn check_contract(t: &Type, d: &Domain, name: &str) -> Result<(), GenError> {
    if let Some(values) = &t.enum_values {
        if values.is_empty() {
            return Err(GenError::SchemaViolation {
                domain: d.domain.clone(),
                name: name.to_string(),
                reason: "enum type without any enum values".to_string(),
            });
        }
        if t.properties.as_ref().is_some_and(|p| !p.is_empty()) {
            return Err(GenError::SchemaViolation {
                domain: d.domain.clone(),
                name: name.to_string(),
                reason: "type is both enum-shaped and object-shaped".to_string(),
            });
        }
    }
    Ok(())
}
