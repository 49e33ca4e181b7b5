//! Pre-order traversal over a [`ModulePart`].
//!
//! Every match here is exhaustive. Adding a node type must fail to compile
//! until the walker knows how to descend into it.

use crate::syntax::{
    Argument, ArgumentKind, Class, Expr, ExprKind, Function, Item, MappingField, MappingFieldKind,
    ModulePart, Node, Parameter, Stmt, TemplatePart,
};

/// Visits every node of `module` in source order, parents before children.
///
/// Stops at the first error returned by `visit`.
///
/// # Errors
///
/// Propagates the first error returned by `visit`.
pub fn walk_module<'a, E>(
    module: &'a ModulePart,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    for item in &module.items {
        walk_item(item, visit)?;
    }
    Ok(())
}

fn walk_item<'a, E>(
    item: &'a Item,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    match item {
        Item::Function(function) => {
            visit(Node::Function(function))?;
            walk_signature(function, visit)
        }
        Item::ModuleVariable(var) => {
            visit(Node::ModuleVariable(var))?;
            walk_opt_expr(var.initializer.as_ref(), visit)
        }
        Item::Constant(constant) => {
            visit(Node::Constant(constant))?;
            walk_expr(&constant.initializer, visit)
        }
        Item::Class(class) => walk_class(class, visit),
        Item::RecordType(record) => {
            visit(Node::RecordType(record))?;
            for field in &record.fields {
                visit(Node::RecordField(field))?;
                walk_opt_expr(field.default.as_ref(), visit)?;
            }
            Ok(())
        }
        Item::ObjectType(object) => visit(Node::ObjectType(object)),
    }
}

fn walk_class<'a, E>(
    class: &'a Class,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    visit(Node::Class(class))?;
    for field in &class.fields {
        visit(Node::ObjectField(field))?;
        walk_opt_expr(field.default.as_ref(), visit)?;
    }
    for method in &class.methods {
        visit(Node::Method(method))?;
        walk_signature(method, visit)?;
    }
    Ok(())
}

fn walk_signature<'a, E>(
    function: &'a Function,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    walk_params(&function.params, visit)?;
    walk_body(&function.body, visit)
}

fn walk_params<'a, E>(
    params: &'a [Parameter],
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    for param in params {
        visit(Node::Parameter(param))?;
        walk_opt_expr(param.default.as_ref(), visit)?;
    }
    Ok(())
}

fn walk_body<'a, E>(
    body: &'a [Stmt],
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    for stmt in body {
        walk_stmt(stmt, visit)?;
    }
    Ok(())
}

fn walk_stmt<'a, E>(
    stmt: &'a Stmt,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    match stmt {
        Stmt::Variable(var) => {
            visit(Node::LocalVariable(var))?;
            walk_opt_expr(var.initializer.as_ref(), visit)
        }
        Stmt::Assignment(assignment) => {
            visit(Node::Assignment(assignment))?;
            walk_expr(&assignment.target, visit)?;
            walk_expr(&assignment.value, visit)
        }
        Stmt::CompoundAssignment(assignment) => {
            visit(Node::CompoundAssignment(assignment))?;
            walk_expr(&assignment.target, visit)?;
            walk_expr(&assignment.value, visit)
        }
        Stmt::Expression(expr) => walk_expr(expr, visit),
        Stmt::Return(ret) => {
            visit(Node::Return(ret))?;
            walk_opt_expr(ret.value.as_ref(), visit)
        }
        Stmt::If(branch) => {
            visit(Node::If(branch))?;
            walk_expr(&branch.condition, visit)?;
            walk_body(&branch.then_body, visit)?;
            walk_body(&branch.else_body, visit)
        }
        Stmt::While(lp) => {
            visit(Node::While(lp))?;
            walk_expr(&lp.condition, visit)?;
            walk_body(&lp.body, visit)
        }
        Stmt::Foreach(lp) => {
            visit(Node::Foreach(lp))?;
            walk_expr(&lp.iterable, visit)?;
            walk_body(&lp.body, visit)
        }
    }
}

fn walk_opt_expr<'a, E>(
    expr: Option<&'a Expr>,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    match expr {
        Some(expr) => walk_expr(expr, visit),
        None => Ok(()),
    }
}

fn walk_expr<'a, E>(
    expr: &'a Expr,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    visit(Node::Expr(expr))?;
    match &expr.kind {
        ExprKind::Literal { .. } | ExprKind::NameRef { .. } | ExprKind::QualifiedNameRef { .. } => {
            Ok(())
        }
        ExprKind::StringTemplate { parts } => {
            for part in parts {
                match part {
                    TemplatePart::Text(_) => {}
                    TemplatePart::Interpolation(inner) => walk_expr(inner, visit)?,
                }
            }
            Ok(())
        }
        ExprKind::Unary { operand, .. } | ExprKind::Check { operand, .. } => {
            walk_expr(operand, visit)
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            walk_expr(lhs, visit)?;
            walk_expr(rhs, visit)
        }
        ExprKind::FieldAccess { target, .. } => walk_expr(target, visit),
        ExprKind::Index { container, keys } => {
            walk_expr(container, visit)?;
            for key in keys {
                walk_expr(key, visit)?;
            }
            Ok(())
        }
        ExprKind::FunctionCall { arguments, .. } => walk_arguments(arguments, visit),
        ExprKind::MethodCall {
            receiver,
            arguments,
            ..
        } => {
            walk_expr(receiver, visit)?;
            walk_arguments(arguments, visit)
        }
        ExprKind::Mapping { fields } => {
            for field in fields {
                walk_mapping_field(field, visit)?;
            }
            Ok(())
        }
        ExprKind::List { items } => {
            for item in items {
                walk_expr(item, visit)?;
            }
            Ok(())
        }
        ExprKind::AnonymousFunction { params, body } => {
            walk_params(params, visit)?;
            walk_body(body, visit)
        }
    }
}

fn walk_arguments<'a, E>(
    arguments: &'a [Argument],
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    for argument in arguments {
        visit(Node::Argument(argument))?;
        match &argument.kind {
            ArgumentKind::Positional { value }
            | ArgumentKind::Named { value, .. }
            | ArgumentKind::Rest { value } => walk_expr(value, visit)?,
        }
    }
    Ok(())
}

fn walk_mapping_field<'a, E>(
    field: &'a MappingField,
    visit: &mut impl FnMut(Node<'a>) -> Result<(), E>,
) -> Result<(), E> {
    visit(Node::MappingField(field))?;
    match &field.kind {
        MappingFieldKind::Specific { value, .. } => walk_opt_expr(value.as_ref(), visit),
        MappingFieldKind::Spread { value } => walk_expr(value, visit),
    }
}
