use crate::scan::{ModulePath, Specifier};
use crate::transform::{PassContext, STATEMENT_SEPARATOR};

use super::ExportKind;

/// Build the CommonJS replacement for one export span.
pub(crate) fn emit_export(kind: &ExportKind<'_>, ctx: &mut PassContext) -> String {
    match kind {
        ExportKind::Default { .. } => "module.exports = ".to_string(),
        ExportKind::Named {
            specifiers,
            from: None,
        } => local_exports(specifiers),
        ExportKind::Named {
            specifiers,
            from: Some(from),
        } => reexports(specifiers, &ctx.require(from)),
        ExportKind::Declaration { name } => format!("exports.{name} = "),
        ExportKind::Namespace { from, .. } => namespace_reexport(from, ctx),
        ExportKind::Variable { name } => format!("exports.{name}"),
        ExportKind::Identifier { name } => format!("exports.{name} = {name}"),
    }
}

/// `export { a, b as c }`. A local binding cannot be named `default`, so
/// such items are skipped.
fn local_exports(specifiers: &[Specifier<'_>]) -> String {
    specifiers
        .iter()
        .filter(|s| s.name != "default")
        .map(|s| format!("exports.{} = {}", s.local(), s.name))
        .collect::<Vec<_>>()
        .join(STATEMENT_SEPARATOR)
}

/// `export { ... } from 'm'`.
///
/// Un-aliased items and `default as x` both bind the module itself; only
/// `name as x` indexes into it.
fn reexports(specifiers: &[Specifier<'_>], require: &str) -> String {
    specifiers
        .iter()
        .map(|s| match s.alias {
            None => format!("exports.{} = {require}", s.name),
            Some(alias) if s.name == "default" => format!("exports.{alias} = {require}"),
            Some(alias) => format!("exports.{alias} = {require}.{}", s.name),
        })
        .collect::<Vec<_>>()
        .join(STATEMENT_SEPARATOR)
}

/// CommonJS has no `export *`, so copy every own key except `default` from a
/// temporary.
fn namespace_reexport(from: &ModulePath<'_>, ctx: &mut PassContext) -> String {
    let uid = ctx.next_uid();
    let val = format!("$val{uid}");
    let key = format!("$key{uid}");
    format!(
        "const {val} = {require};\nfor (const {key} of Object.keys({val})) if ({key} !== 'default') exports[{key}] = {val}[{key}]",
        require = ctx.require(from),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::PathRewriter;

    fn ctx() -> PassContext {
        PassContext::new(PathRewriter::default())
    }

    fn path(value: &str) -> ModulePath<'_> {
        ModulePath { quote: '\'', value }
    }

    fn spec<'a>(name: &'a str, alias: Option<&'a str>) -> Specifier<'a> {
        Specifier { name, alias }
    }

    #[test]
    fn test_default() {
        let kind = ExportKind::Default { value: "42" };
        assert_eq!(emit_export(&kind, &mut ctx()), "module.exports = ");
    }

    #[test]
    fn test_local_named() {
        let kind = ExportKind::Named {
            specifiers: vec![spec("a", None), spec("b", Some("c")), spec("default", Some("d"))],
            from: None,
        };
        assert_eq!(
            emit_export(&kind, &mut ctx()),
            "exports.a = a;\nexports.c = b"
        );
    }

    #[test]
    fn test_empty_local_named() {
        let kind = ExportKind::Named {
            specifiers: vec![],
            from: None,
        };
        assert_eq!(emit_export(&kind, &mut ctx()), "");
    }

    #[test]
    fn test_reexport_named() {
        let kind = ExportKind::Named {
            specifiers: vec![spec("a", None), spec("b", Some("c")), spec("default", Some("d"))],
            from: Some(path("./m")),
        };
        assert_eq!(
            emit_export(&kind, &mut ctx()),
            "exports.a = require('./m');\nexports.c = require('./m').b;\nexports.d = require('./m')"
        );
    }

    #[test]
    fn test_declaration_and_identifiers() {
        let mut ctx = ctx();
        assert_eq!(
            emit_export(&ExportKind::Declaration { name: "f" }, &mut ctx),
            "exports.f = "
        );
        assert_eq!(
            emit_export(&ExportKind::Variable { name: "v" }, &mut ctx),
            "exports.v"
        );
        assert_eq!(
            emit_export(&ExportKind::Identifier { name: "x" }, &mut ctx),
            "exports.x = x"
        );
    }

    #[test]
    fn test_namespace_reexports_get_fresh_names() {
        let mut ctx = ctx();
        let kind = ExportKind::Namespace {
            alias: None,
            from: path("m"),
        };

        let first = emit_export(&kind, &mut ctx);
        let second = emit_export(&kind, &mut ctx);

        assert_eq!(
            first,
            "const $val0 = require('m');\nfor (const $key0 of Object.keys($val0)) if ($key0 !== 'default') exports[$key0] = $val0[$key0]"
        );
        assert!(second.starts_with("const $val1 = require('m');"));
        assert!(second.contains("exports[$key1] = $val1[$key1]"));
    }
}
