//! Flags secrets that are hard-coded or not read from configuration.
//!
//! A value bound to a secret-looking name (parameter default, mapping
//! field, variable, constant, named argument, record or object field
//! default) is classified by its shape:
//!
//! | Value | Rule |
//! |-------|------|
//! | string literal | hard-coded |
//! | reference to a constant | hard-coded |
//! | reference to a non-`configurable` variable | non-configurable |
//! | reference to anything else, or unresolved | none |
//! | any other expression | non-configurable |
//!
//! Positional arguments passed to sensitive parameters, as recorded by
//! [`SensitiveParamTracker`](crate::SensitiveParamTracker), are classified
//! the same way. String literals and templates that spell out a URL with a
//! password are hard-coded secrets wherever they appear.

use crate::catalog::{HARD_CODED_SECRET, NON_CONFIGURABLE_SECRET};
use balscan_core::syntax::{
    Argument, ArgumentKind, Expr, ExprKind, LiteralKind, MappingFieldKind, Qualifier, TemplatePart,
};
use balscan_core::{
    CheckContext, Detector, Location, Node, NodeId, ScanError, SemanticModel, SensitiveParams,
    SymbolId, SymbolKind, SyntaxKind,
};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use url::Url;

/// Detector name.
pub const NAME: &str = "secrets";

/// Stands in for interpolations when a template is checked as a URL.
const PLACEHOLDER: &str = "xyz";

#[allow(clippy::expect_used)]
static SECRET_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)password|passwd|pwd|passphrase|pass_phrase|secret|client_?secret|api_?key")
        .expect("secret word pattern is valid")
});

#[allow(clippy::expect_used)]
static URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w{1,8}://").expect("URL prefix pattern is valid"));

/// Whether `name` looks like it holds a secret.
#[must_use]
pub fn is_secret_name(name: &str) -> bool {
    SECRET_WORDS.is_match(name)
}

/// Whether `text` is a URL carrying a non-empty password.
#[must_use]
pub fn is_url_with_credentials(text: &str) -> bool {
    URL_PREFIX.is_match(text)
        && Url::parse(text)
            .ok()
            .and_then(|url| url.password().map(|password| !password.is_empty()))
            .unwrap_or(false)
}

/// Reports secrets exposed in source.
#[derive(Debug)]
pub struct SecretChecker<'u> {
    sensitive_params: &'u BTreeMap<SymbolId, SensitiveParams>,
}

impl<'u> SecretChecker<'u> {
    /// Creates the detector over the collected sensitive parameters.
    #[must_use]
    pub fn new(sensitive_params: &'u BTreeMap<SymbolId, SensitiveParams>) -> Self {
        Self { sensitive_params }
    }

    fn check_value(expr: &Expr, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        match &expr.kind {
            ExprKind::Literal {
                literal: LiteralKind::String,
                ..
            } => cx.report(expr.location, HARD_CODED_SECRET),
            ExprKind::NameRef { .. } => match cx.semantic().symbol(expr.id) {
                Some(symbol) if symbol.kind == SymbolKind::Constant => {
                    cx.report(expr.location, HARD_CODED_SECRET)
                }
                Some(symbol)
                    if symbol.kind == SymbolKind::Variable
                        && !symbol.has_qualifier(Qualifier::Configurable) =>
                {
                    cx.report(expr.location, NON_CONFIGURABLE_SECRET)
                }
                _ => Ok(()),
            },
            _ => cx.report(expr.location, NON_CONFIGURABLE_SECRET),
        }
    }

    fn check_named(
        name: &str,
        value: Option<&Expr>,
        cx: &mut CheckContext<'_, '_>,
    ) -> Result<(), ScanError> {
        match value {
            Some(value) if is_secret_name(name) => Self::check_value(value, cx),
            _ => Ok(()),
        }
    }

    fn check_shorthand(
        node: NodeId,
        location: Location,
        cx: &mut CheckContext<'_, '_>,
    ) -> Result<(), ScanError> {
        match cx.semantic().symbol(node) {
            Some(symbol)
                if symbol.kind == SymbolKind::Variable
                    && !symbol.has_qualifier(Qualifier::Configurable) =>
            {
                cx.report(location, NON_CONFIGURABLE_SECRET)
            }
            _ => Ok(()),
        }
    }

    fn check_call(
        &self,
        call: &Expr,
        arguments: &[Argument],
        cx: &mut CheckContext<'_, '_>,
    ) -> Result<(), ScanError> {
        let Some(params) = cx
            .semantic()
            .symbol(call.id)
            .and_then(|symbol| self.sensitive_params.get(&symbol.id))
        else {
            return Ok(());
        };

        for (position, argument) in arguments.iter().enumerate() {
            let ArgumentKind::Positional { value } = &argument.kind else {
                break;
            };
            if params.positions.contains(&position) {
                Self::check_value(value, cx)?;
            }
        }
        Ok(())
    }

    fn check_expr(&self, expr: &Expr, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        match &expr.kind {
            ExprKind::Literal {
                literal: LiteralKind::String,
                text,
            } if is_url_with_credentials(text) => cx.report(expr.location, HARD_CODED_SECRET),
            ExprKind::StringTemplate { parts } => {
                let text: String = parts
                    .iter()
                    .map(|part| match part {
                        TemplatePart::Text(text) => text.as_str(),
                        TemplatePart::Interpolation(_) => PLACEHOLDER,
                    })
                    .collect();
                if is_url_with_credentials(&text) {
                    cx.report(expr.location, HARD_CODED_SECRET)?;
                }
                Ok(())
            }
            ExprKind::FunctionCall { arguments, .. } | ExprKind::MethodCall { arguments, .. } => {
                self.check_call(expr, arguments, cx)
            }
            _ => Ok(()),
        }
    }
}

impl Detector for SecretChecker<'_> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::Parameter,
            SyntaxKind::MappingField,
            SyntaxKind::ModuleVariable,
            SyntaxKind::LocalVariable,
            SyntaxKind::Constant,
            SyntaxKind::Argument,
            SyntaxKind::RecordField,
            SyntaxKind::ObjectField,
            SyntaxKind::Literal,
            SyntaxKind::StringTemplate,
            SyntaxKind::FunctionCall,
            SyntaxKind::MethodCall,
        ]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        match node {
            Node::Parameter(param) => match &param.name {
                Some(name) => Self::check_named(name, param.default.as_ref(), cx),
                None => Ok(()),
            },
            Node::MappingField(field) => match &field.kind {
                MappingFieldKind::Specific { name, value } if is_secret_name(name) => match value {
                    Some(value) => Self::check_value(value, cx),
                    None => Self::check_shorthand(field.id, field.location, cx),
                },
                _ => Ok(()),
            },
            Node::ModuleVariable(var) | Node::LocalVariable(var) => {
                Self::check_named(&var.name, var.initializer.as_ref(), cx)
            }
            Node::Constant(constant) => {
                Self::check_named(&constant.name, Some(&constant.initializer), cx)
            }
            Node::Argument(argument) => match &argument.kind {
                ArgumentKind::Named { name, value } => Self::check_named(name, Some(value), cx),
                _ => Ok(()),
            },
            Node::RecordField(field) => Self::check_named(&field.name, field.default.as_ref(), cx),
            Node::ObjectField(field) => Self::check_named(&field.name, field.default.as_ref(), cx),
            Node::Expr(expr) => self.check_expr(expr, cx),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HARD_CODED_SECRET as HARD, NON_CONFIGURABLE_SECRET as NON_CONF};
    use crate::test_support::findings;
    use balscan_core::semantic::SymbolTable;
    use balscan_core::syntax::{Item, Stmt};
    use balscan_core::testing::{
        call, configurable_var, constant, defaultable, document, field, function, int, local,
        mapping, module_var, name_ref, named, param, positional, project, string, template, Ids,
    };
    use balscan_core::{Project, Symbol};

    fn single(items: Vec<Item>, table: SymbolTable) -> Project {
        project(vec![document("main.bal", items, table)])
    }

    fn in_main(ids: &mut Ids, body: Vec<Stmt>) -> Item {
        function(ids, "main", vec![], body)
    }

    #[test]
    fn secret_names() {
        for name in [
            "password",
            "dbPassword",
            "PWD",
            "pass_phrase",
            "clientSecret",
            "client_secret",
            "API_KEY",
            "apikey",
        ] {
            assert!(is_secret_name(name), "{name}");
        }
        for name in ["user", "host", "passport", "key"] {
            assert!(!is_secret_name(name), "{name}");
        }
    }

    #[test]
    fn urls_with_passwords() {
        assert!(is_url_with_credentials("mysql://admin:hunter2@db:3306/app"));
        assert!(is_url_with_credentials("https://:token@example.com"));
        assert!(!is_url_with_credentials("https://admin@example.com"));
        assert!(!is_url_with_credentials("https://admin:@example.com"));
        assert!(!is_url_with_credentials("https://example.com"));
        assert!(!is_url_with_credentials("see mysql://admin:x@db"));
        assert!(!is_url_with_credentials("not a url"));
    }

    #[test]
    fn string_literal_is_hard_coded() {
        let mut ids = Ids::default();
        let value = string(&mut ids, "hunter2");
        let line = value.location.start.line;
        let var = module_var(&mut ids, "password", Some(value));

        assert_eq!(
            findings(&single(vec![var], SymbolTable::new()), &[HARD, NON_CONF]),
            vec![(HARD, line)]
        );
    }

    #[test]
    fn other_expressions_are_non_configurable() {
        let mut ids = Ids::default();
        let value = int(&mut ids, "1234");
        let line = value.location.start.line;
        let body = vec![local(&mut ids, "pin_pwd", Some(value))];
        let main = in_main(&mut ids, body);

        assert_eq!(
            findings(&single(vec![main], SymbolTable::new()), &[HARD, NON_CONF]),
            vec![(NON_CONF, line)]
        );
    }

    #[test]
    fn references_are_classified_by_symbol() {
        let mut ids = Ids::default();
        let to_configurable = name_ref(&mut ids, "fromConfig");
        let to_variable = name_ref(&mut ids, "plain");
        let to_constant = name_ref(&mut ids, "FIXED");
        let to_function = name_ref(&mut ids, "loader");
        let unresolved = name_ref(&mut ids, "nowhere");
        let (variable_line, constant_line) =
            (to_variable.location.start.line, to_constant.location.start.line);

        let mut table = SymbolTable::new();
        table.insert(
            Symbol::new(SymbolId(1), "fromConfig", SymbolKind::Variable)
                .with_qualifier(Qualifier::Configurable),
        );
        table.insert(Symbol::new(SymbolId(2), "plain", SymbolKind::Variable));
        table.insert(Symbol::new(SymbolId(3), "FIXED", SymbolKind::Constant));
        table.insert(Symbol::new(SymbolId(4), "loader", SymbolKind::Function));
        table.bind(to_configurable.id, SymbolId(1));
        table.bind(to_variable.id, SymbolId(2));
        table.bind(to_constant.id, SymbolId(3));
        table.bind(to_function.id, SymbolId(4));

        let items = vec![
            module_var(&mut ids, "password1", Some(to_configurable)),
            module_var(&mut ids, "password2", Some(to_variable)),
            module_var(&mut ids, "password3", Some(to_constant)),
            module_var(&mut ids, "password4", Some(to_function)),
            module_var(&mut ids, "password5", Some(unresolved)),
        ];

        assert_eq!(
            findings(&single(items, table), &[HARD, NON_CONF]),
            vec![(NON_CONF, variable_line), (HARD, constant_line)]
        );
    }

    #[test]
    fn configurable_declaration_with_default_is_still_hard_coded() {
        let mut ids = Ids::default();
        let value = string(&mut ids, "changeme");
        let line = value.location.start.line;
        let var = configurable_var(&mut ids, "apiKey", Some(value));

        assert_eq!(
            findings(&single(vec![var], SymbolTable::new()), &[HARD, NON_CONF]),
            vec![(HARD, line)]
        );
    }

    #[test]
    fn constants_defaults_and_named_arguments() {
        let mut ids = Ids::default();
        let c_value = string(&mut ids, "s3cr3t");
        let c_line = c_value.location.start.line;
        let secret_const = constant(&mut ids, "SECRET", c_value);

        let d_value = string(&mut ids, "guest");
        let d_line = d_value.location.start.line;
        let p = defaultable(&mut ids, "passwd", d_value);
        let connect = function(&mut ids, "connect", vec![p], vec![]);

        let n_value = string(&mut ids, "abc");
        let n_line = n_value.location.start.line;
        let arg = named(&mut ids, "apiKey", n_value);
        let call_expr = call(&mut ids, "connect", vec![arg]);
        let body = vec![Stmt::Expression(call_expr)];
        let main = in_main(&mut ids, body);

        assert_eq!(
            findings(
                &single(vec![secret_const, connect, main], SymbolTable::new()),
                &[HARD, NON_CONF]
            ),
            vec![(HARD, c_line), (HARD, d_line), (HARD, n_line)]
        );
    }

    #[test]
    fn mapping_fields_and_shorthand() {
        let mut ids = Ids::default();
        let explicit_value = string(&mut ids, "hunter2");
        let explicit_line = explicit_value.location.start.line;
        let explicit = field(&mut ids, "password", Some(explicit_value));
        let shorthand = field(&mut ids, "secret", None);
        let shorthand_line = shorthand.location.start.line;
        let configured = field(&mut ids, "apiKey", None);
        let ignored_value = string(&mut ids, "admin");
        let ignored = field(&mut ids, "user", Some(ignored_value));

        let mut table = SymbolTable::new();
        table.insert(Symbol::new(SymbolId(1), "secret", SymbolKind::Variable));
        table.insert(
            Symbol::new(SymbolId(2), "apiKey", SymbolKind::Variable)
                .with_qualifier(Qualifier::Configurable),
        );
        table.bind(shorthand.id, SymbolId(1));
        table.bind(configured.id, SymbolId(2));

        let record = mapping(&mut ids, vec![explicit, shorthand, configured, ignored]);
        let body = vec![local(&mut ids, "config", Some(record))];
        let main = in_main(&mut ids, body);

        assert_eq!(
            findings(&single(vec![main], table), &[HARD, NON_CONF]),
            vec![(HARD, explicit_line), (NON_CONF, shorthand_line)]
        );
    }

    #[test]
    fn url_literals_and_templates() {
        let mut ids = Ids::default();
        let literal = string(&mut ids, "postgres://app:pa55@db/app");
        let literal_line = literal.location.start.line;
        let interpolated = name_ref(&mut ids, "pass");
        let tmpl = template(
            &mut ids,
            vec![
                TemplatePart::Text("https://admin:".into()),
                TemplatePart::Interpolation(interpolated),
                TemplatePart::Text("@example.com".into()),
            ],
        );
        let template_line = tmpl.location.start.line;
        let no_password = string(&mut ids, "https://example.com/path");

        let body = vec![
            local(&mut ids, "url", Some(literal)),
            local(&mut ids, "templated", Some(tmpl)),
            local(&mut ids, "plain", Some(no_password)),
        ];
        let main = in_main(&mut ids, body);

        assert_eq!(
            findings(&single(vec![main], SymbolTable::new()), &[HARD, NON_CONF]),
            vec![(HARD, literal_line), (HARD, template_line)]
        );
    }

    #[test]
    fn positional_arguments_to_sensitive_parameters() {
        let mut ids = Ids::default();
        let params = vec![param(&mut ids, "user"), param(&mut ids, "password")];
        let connect = function(&mut ids, "connect", params, vec![]);
        let connect_id = match &connect {
            Item::Function(f) => f.id,
            _ => unreachable!(),
        };

        let user = string(&mut ids, "admin");
        let password = string(&mut ids, "hunter2");
        let password_line = password.location.start.line;
        let args = vec![positional(&mut ids, user), positional(&mut ids, password)];
        let good_call = call(&mut ids, "connect", args);

        let user = string(&mut ids, "admin");
        let password = string(&mut ids, "hunter2");
        let args = vec![named(&mut ids, "user", user), positional(&mut ids, password)];
        let stopped_call = call(&mut ids, "connect", args);

        let mut table = SymbolTable::new();
        table.insert(Symbol::new(SymbolId(9), "connect", SymbolKind::Function));
        table.bind(connect_id, SymbolId(9));
        table.bind(good_call.id, SymbolId(9));
        table.bind(stopped_call.id, SymbolId(9));

        let body = vec![Stmt::Expression(good_call), Stmt::Expression(stopped_call)];
        let main = in_main(&mut ids, body);

        assert_eq!(
            findings(&single(vec![connect, main], table), &[HARD, NON_CONF]),
            vec![(HARD, password_line)]
        );
    }

    #[test]
    fn callables_declared_in_other_documents() {
        let mut ids = Ids::default();
        let params = vec![param(&mut ids, "secret")];
        let store = function(&mut ids, "store", params, vec![]);
        let store_id = match &store {
            Item::Function(f) => f.id,
            _ => unreachable!(),
        };
        let mut lib_table = SymbolTable::new();
        lib_table.insert(Symbol::new(SymbolId(5), "store", SymbolKind::Function));
        lib_table.bind(store_id, SymbolId(5));

        let value = string(&mut ids, "token");
        let line = value.location.start.line;
        let args = vec![positional(&mut ids, value)];
        let store_call = call(&mut ids, "store", args);
        let mut main_table = SymbolTable::new();
        main_table.insert(Symbol::new(SymbolId(5), "store", SymbolKind::Function));
        main_table.bind(store_call.id, SymbolId(5));
        let main = in_main(&mut ids, vec![Stmt::Expression(store_call)]);

        // main.bal is scanned before lib.bal declares the callable.
        let project = project(vec![
            document("main.bal", vec![main], main_table),
            document("lib.bal", vec![store], lib_table),
        ]);

        assert_eq!(findings(&project, &[HARD, NON_CONF]), vec![(HARD, line)]);
    }
}
