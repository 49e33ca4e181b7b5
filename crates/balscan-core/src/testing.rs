//! Builders for small syntax trees and projects in tests.
//!
//! Every node gets a fresh [`NodeId`] from [`Ids`] and a one-line location
//! whose line number equals the id, so issue locations identify nodes.

#![allow(missing_docs)]

use crate::project::{Document, Module, Project};
use crate::semantic::SymbolTable;
use crate::syntax::{
    Argument, ArgumentKind, Assignment, BinaryOp, Class, CompoundAssignment, Constant, Expr,
    ExprKind, Function, Item, LiteralKind, MappingField, MappingFieldKind, ModulePart, NodeId,
    ObjectField, ObjectType, Parameter, ParameterKind, Qualifier, RecordField, RecordType, Stmt, TemplatePart,
    UnaryOp, Variable,
};
use crate::types::Location;

/// Hands out consecutive node ids, starting at 1.
#[derive(Debug, Default)]
pub struct Ids {
    last: u32,
}

impl Ids {
    pub fn next(&mut self) -> (NodeId, Location) {
        self.last += 1;
        (NodeId(self.last), Location::on_line(self.last, 0, 1))
    }
}

pub fn expr(ids: &mut Ids, kind: ExprKind) -> Expr {
    let (id, location) = ids.next();
    Expr { id, location, kind }
}

fn literal(ids: &mut Ids, literal: LiteralKind, text: &str) -> Expr {
    expr(
        ids,
        ExprKind::Literal {
            literal,
            text: text.to_string(),
        },
    )
}

pub fn string(ids: &mut Ids, text: &str) -> Expr {
    literal(ids, LiteralKind::String, text)
}

pub fn int(ids: &mut Ids, text: &str) -> Expr {
    literal(ids, LiteralKind::Int, text)
}

pub fn boolean(ids: &mut Ids, value: bool) -> Expr {
    literal(ids, LiteralKind::Boolean, if value { "true" } else { "false" })
}

pub fn name_ref(ids: &mut Ids, name: &str) -> Expr {
    expr(ids, ExprKind::NameRef { name: name.to_string() })
}

pub fn qualified(ids: &mut Ids, module: &str, name: &str) -> Expr {
    expr(
        ids,
        ExprKind::QualifiedNameRef {
            module: module.to_string(),
            name: name.to_string(),
        },
    )
}

pub fn unary(ids: &mut Ids, op: UnaryOp, operand: Expr) -> Expr {
    expr(
        ids,
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
    )
}

pub fn neg(ids: &mut Ids, operand: Expr) -> Expr {
    unary(ids, UnaryOp::Minus, operand)
}

pub fn binary(ids: &mut Ids, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    expr(
        ids,
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
    )
}

pub fn field_access(ids: &mut Ids, target: Expr, field: &str) -> Expr {
    expr(
        ids,
        ExprKind::FieldAccess {
            target: Box::new(target),
            field: field.to_string(),
        },
    )
}

pub fn index(ids: &mut Ids, container: Expr, keys: Vec<Expr>) -> Expr {
    expr(
        ids,
        ExprKind::Index {
            container: Box::new(container),
            keys,
        },
    )
}

pub fn call(ids: &mut Ids, function: &str, arguments: Vec<Argument>) -> Expr {
    expr(
        ids,
        ExprKind::FunctionCall {
            function: function.to_string(),
            arguments,
        },
    )
}

pub fn method_call(ids: &mut Ids, receiver: Expr, method: &str, arguments: Vec<Argument>) -> Expr {
    expr(
        ids,
        ExprKind::MethodCall {
            receiver: Box::new(receiver),
            method: method.to_string(),
            arguments,
        },
    )
}

pub fn check(ids: &mut Ids, operand: Expr) -> Expr {
    expr(
        ids,
        ExprKind::Check {
            panics: false,
            operand: Box::new(operand),
        },
    )
}

pub fn check_panic(ids: &mut Ids, operand: Expr) -> Expr {
    expr(
        ids,
        ExprKind::Check {
            panics: true,
            operand: Box::new(operand),
        },
    )
}

pub fn mapping(ids: &mut Ids, fields: Vec<MappingField>) -> Expr {
    expr(ids, ExprKind::Mapping { fields })
}

pub fn template(ids: &mut Ids, parts: Vec<TemplatePart>) -> Expr {
    expr(ids, ExprKind::StringTemplate { parts })
}

pub fn anonymous_function(ids: &mut Ids, params: Vec<Parameter>, body: Vec<Stmt>) -> Expr {
    expr(ids, ExprKind::AnonymousFunction { params, body })
}

fn argument(ids: &mut Ids, kind: ArgumentKind) -> Argument {
    let (id, location) = ids.next();
    Argument { id, location, kind }
}

pub fn positional(ids: &mut Ids, value: Expr) -> Argument {
    argument(ids, ArgumentKind::Positional { value })
}

pub fn named(ids: &mut Ids, name: &str, value: Expr) -> Argument {
    argument(
        ids,
        ArgumentKind::Named {
            name: name.to_string(),
            value,
        },
    )
}

pub fn rest(ids: &mut Ids, value: Expr) -> Argument {
    argument(ids, ArgumentKind::Rest { value })
}

pub fn field(ids: &mut Ids, name: &str, value: Option<Expr>) -> MappingField {
    let (id, location) = ids.next();
    MappingField {
        id,
        location,
        kind: MappingFieldKind::Specific {
            name: name.to_string(),
            value,
        },
    }
}

pub fn param(ids: &mut Ids, name: &str) -> Parameter {
    let (id, location) = ids.next();
    Parameter {
        id,
        location,
        kind: ParameterKind::Required,
        name: Some(name.to_string()),
        default: None,
    }
}

pub fn defaultable(ids: &mut Ids, name: &str, default: Expr) -> Parameter {
    let (id, location) = ids.next();
    Parameter {
        id,
        location,
        kind: ParameterKind::Defaultable,
        name: Some(name.to_string()),
        default: Some(default),
    }
}

pub fn function_def(ids: &mut Ids, name: &str, params: Vec<Parameter>, body: Vec<Stmt>) -> Function {
    let (id, location) = ids.next();
    Function {
        id,
        location,
        name: name.to_string(),
        qualifiers: Vec::new(),
        params,
        body,
    }
}

pub fn function(ids: &mut Ids, name: &str, params: Vec<Parameter>, body: Vec<Stmt>) -> Item {
    Item::Function(function_def(ids, name, params, body))
}

fn variable(ids: &mut Ids, name: &str, qualifiers: Vec<Qualifier>, initializer: Option<Expr>) -> Variable {
    let (id, location) = ids.next();
    Variable {
        id,
        location,
        name: name.to_string(),
        qualifiers,
        initializer,
    }
}

pub fn module_var(ids: &mut Ids, name: &str, initializer: Option<Expr>) -> Item {
    Item::ModuleVariable(variable(ids, name, Vec::new(), initializer))
}

pub fn configurable_var(ids: &mut Ids, name: &str, initializer: Option<Expr>) -> Item {
    Item::ModuleVariable(variable(ids, name, vec![Qualifier::Configurable], initializer))
}

pub fn local(ids: &mut Ids, name: &str, initializer: Option<Expr>) -> Stmt {
    Stmt::Variable(variable(ids, name, Vec::new(), initializer))
}

pub fn constant(ids: &mut Ids, name: &str, initializer: Expr) -> Item {
    let (id, location) = ids.next();
    Item::Constant(Constant {
        id,
        location,
        name: name.to_string(),
        initializer,
    })
}

pub fn object_field(
    ids: &mut Ids,
    name: &str,
    qualifiers: Vec<Qualifier>,
    default: Option<Expr>,
) -> ObjectField {
    let (id, location) = ids.next();
    ObjectField {
        id,
        location,
        name: name.to_string(),
        qualifiers,
        default,
    }
}

pub fn class(ids: &mut Ids, name: &str, fields: Vec<ObjectField>, methods: Vec<Function>) -> Item {
    let (id, location) = ids.next();
    Item::Class(Class {
        id,
        location,
        name: name.to_string(),
        qualifiers: Vec::new(),
        fields,
        methods,
    })
}

pub fn record_field(ids: &mut Ids, name: &str, default: Option<Expr>) -> RecordField {
    let (id, location) = ids.next();
    RecordField {
        id,
        location,
        name: name.to_string(),
        default,
    }
}

pub fn record_type(ids: &mut Ids, name: &str, fields: Vec<RecordField>) -> Item {
    let (id, location) = ids.next();
    Item::RecordType(RecordType {
        id,
        location,
        name: name.to_string(),
        fields,
    })
}

pub fn object_type(
    ids: &mut Ids,
    name: &str,
    qualifiers: Vec<Qualifier>,
    object_qualifiers: Vec<Qualifier>,
) -> Item {
    let (id, location) = ids.next();
    Item::ObjectType(ObjectType {
        id,
        location,
        name: name.to_string(),
        qualifiers,
        object_qualifiers,
    })
}

/// Replaces the qualifiers of a function, class or object type definition.
pub fn with_qualifiers(item: Item, qualifiers: &[Qualifier]) -> Item {
    match item {
        Item::Function(mut function) => {
            function.qualifiers = qualifiers.to_vec();
            Item::Function(function)
        }
        Item::Class(mut class) => {
            class.qualifiers = qualifiers.to_vec();
            Item::Class(class)
        }
        Item::ObjectType(mut object) => {
            object.qualifiers = qualifiers.to_vec();
            Item::ObjectType(object)
        }
        other => other,
    }
}

/// Function definition with the given qualifiers, for class methods.
pub fn qualified_method(ids: &mut Ids, name: &str, qualifiers: &[Qualifier]) -> Function {
    let mut method = function_def(ids, name, Vec::new(), Vec::new());
    method.qualifiers = qualifiers.to_vec();
    method
}

pub fn assign(ids: &mut Ids, target: Expr, value: Expr) -> Stmt {
    let (id, location) = ids.next();
    Stmt::Assignment(Assignment {
        id,
        location,
        target,
        value,
    })
}

pub fn compound_assign(ids: &mut Ids, op: BinaryOp, target: Expr, value: Expr) -> Stmt {
    let (id, location) = ids.next();
    Stmt::CompoundAssignment(CompoundAssignment {
        id,
        location,
        op,
        target,
        value,
    })
}

pub fn document(name: &str, items: Vec<Item>, semantic: SymbolTable) -> Document {
    Document::new(name, name)
        .with_syntax(ModulePart { items })
        .with_semantic(semantic)
}

pub fn project(documents: Vec<Document>) -> Project {
    let module = documents
        .into_iter()
        .fold(Module::new("demo"), Module::document);
    Project::new("demo").module(module)
}
