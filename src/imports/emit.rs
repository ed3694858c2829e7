use crate::scan::Specifier;
use crate::transform::STATEMENT_SEPARATOR;

use super::ImportBinding;

/// Build the CommonJS replacement for one import. `require` is the already
/// rendered `require('path')` call.
pub(crate) fn emit_import(binding: &ImportBinding<'_>, require: &str) -> String {
    match binding {
        ImportBinding::SideEffect | ImportBinding::Namespace(None) => require.to_string(),
        ImportBinding::Default(name) | ImportBinding::Namespace(Some(name)) => {
            format!("const {name} = {require}")
        }
        ImportBinding::Named(specifiers) => named_bindings(specifiers, require),
        ImportBinding::DefaultAndNamed { default, named } => [
            default_with_fallback(default, require),
            named_bindings(named, require),
        ]
        .join(STATEMENT_SEPARATOR),
        ImportBinding::DefaultAndNamespace { default, namespace } => [
            default_with_fallback(default, require),
            emit_import(&ImportBinding::Namespace(*namespace), require),
        ]
        .join(STATEMENT_SEPARATOR),
    }
}

/// Modules written without a `default` export still bind to something.
fn default_with_fallback(name: &str, require: &str) -> String {
    format!("const {name} = {require}.default || {require}")
}

/// One destructuring line for the plain names, then one line per alias.
fn named_bindings(specifiers: &[Specifier<'_>], require: &str) -> String {
    let plain: Vec<&str> = specifiers
        .iter()
        .filter(|s| !s.is_aliased())
        .map(|s| s.name)
        .collect();

    let mut lines = Vec::with_capacity(specifiers.len());
    if !plain.is_empty() {
        lines.push(format!("const {{ {} }} = {require}", plain.join(", ")));
    }
    lines.extend(
        specifiers
            .iter()
            .filter(|s| s.is_aliased())
            .map(|s| format!("const {} = {require}.{}", s.local(), s.name)),
    );

    if lines.is_empty() {
        return require.to_string();
    }
    lines.join(STATEMENT_SEPARATOR)
}
