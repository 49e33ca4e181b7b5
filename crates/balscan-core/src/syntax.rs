//! Syntax tree handed over by the parser.
//!
//! The tree is a closed set of node types deserialized from a project
//! snapshot. Every node carries a [`NodeId`], which the semantic model uses to
//! attach symbols, and a zero-based [`Location`].
//!
//! Detectors never match on these types blindly: the walker in
//! [`crate::walk`] visits them exhaustively and hands out [`Node`] values,
//! whose [`SyntaxKind`] decides which detectors see them.

use crate::types::Location;
use serde::{Deserialize, Serialize};

/// Identity of a node within one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Declaration qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    /// `public`
    Public,
    /// `private`
    Private,
    /// `isolated`
    Isolated,
    /// `configurable`
    Configurable,
    /// `final`
    Final,
    /// `readonly`
    Readonly,
}

/// Root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModulePart {
    /// Module-level declarations in source order.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Module-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Item {
    /// Function definition.
    Function(Function),
    /// Module variable declaration.
    ModuleVariable(Variable),
    /// Constant declaration.
    Constant(Constant),
    /// Class definition.
    Class(Class),
    /// Record type definition.
    RecordType(RecordType),
    /// Object type definition.
    ObjectType(ObjectType),
}

/// Function, method, or anonymous-function signature with a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Function name.
    pub name: String,
    /// Qualifiers such as `public` or `isolated`.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Body statements.
    #[serde(default)]
    pub body: Vec<Stmt>,
}

/// Parameter shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// `int x`
    #[default]
    Required,
    /// `int x = 1`
    Defaultable,
    /// `int... xs`
    Rest,
    /// `*Options opts`
    IncludedRecord,
}

/// Function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Parameter shape.
    #[serde(default)]
    pub kind: ParameterKind,
    /// Parameter name; absent for anonymous parameters.
    #[serde(default)]
    pub name: Option<String>,
    /// Default value of a defaultable parameter.
    #[serde(default)]
    pub default: Option<Expr>,
}

/// Variable declaration, at module level or inside a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Bound name.
    pub name: String,
    /// Qualifiers such as `configurable` or `final`.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Initializer, if any.
    #[serde(default)]
    pub initializer: Option<Expr>,
}

/// Constant declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Constant name.
    pub name: String,
    /// Constant value.
    pub initializer: Expr,
}

/// Class definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Class name.
    pub name: String,
    /// Qualifiers.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Fields.
    #[serde(default)]
    pub fields: Vec<ObjectField>,
    /// Methods, including `init`.
    #[serde(default)]
    pub methods: Vec<Function>,
}

/// Class or object field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectField {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Field name.
    pub name: String,
    /// Qualifiers such as `private`.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Initializer expression.
    #[serde(default)]
    pub default: Option<Expr>,
}

/// Record type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Type name.
    pub name: String,
    /// Fields.
    #[serde(default)]
    pub fields: Vec<RecordField>,
}

/// Object type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Type name.
    pub name: String,
    /// Qualifiers of the definition itself, e.g. `public`.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Qualifiers of the object type descriptor, e.g. `isolated`.
    #[serde(default)]
    pub object_qualifiers: Vec<Qualifier>,
}

/// Record field, optionally with a default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordField {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Field name.
    pub name: String,
    /// Default value.
    #[serde(default)]
    pub default: Option<Expr>,
}

/// Statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt")]
pub enum Stmt {
    /// Local variable declaration.
    Variable(Variable),
    /// `target = value;`
    Assignment(Assignment),
    /// `target op= value;`
    CompoundAssignment(CompoundAssignment),
    /// Expression evaluated for its effect.
    Expression(Expr),
    /// `return value;`
    Return(Return),
    /// `if` / `else`.
    If(If),
    /// `while` loop.
    While(While),
    /// `foreach` loop.
    Foreach(Foreach),
}

/// Assignment statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Assigned place.
    pub target: Expr,
    /// Assigned value.
    pub value: Expr,
}

/// Compound assignment statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundAssignment {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Binary operator applied before assignment.
    pub op: BinaryOp,
    /// Assigned place.
    pub target: Expr,
    /// Right-hand operand.
    pub value: Expr,
}

/// Return statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Returned value.
    #[serde(default)]
    pub value: Option<Expr>,
}

/// Conditional statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Condition.
    pub condition: Expr,
    /// Statements run when the condition holds.
    #[serde(default)]
    pub then_body: Vec<Stmt>,
    /// Statements run otherwise.
    #[serde(default)]
    pub else_body: Vec<Stmt>,
}

/// `while` loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct While {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Loop condition.
    pub condition: Expr,
    /// Loop body.
    #[serde(default)]
    pub body: Vec<Stmt>,
}

/// `foreach` loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foreach {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Loop variable name.
    pub variable: String,
    /// Iterated expression, often a range.
    pub iterable: Expr,
    /// Loop body.
    #[serde(default)]
    pub body: Vec<Stmt>,
}

/// Expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Expression shape.
    pub kind: ExprKind,
}

/// Literal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    /// String literal; the text is the unquoted value.
    String,
    /// Integer literal; the text is the source token.
    Int,
    /// Floating-point literal.
    Float,
    /// `true` or `false`.
    Boolean,
    /// `()` or `null`.
    Nil,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `!`
    Not,
    /// `~`
    BitwiseNot,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    RefEq,
    /// `!==`
    RefNotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `...`
    RangeInclusive,
    /// `..<`
    RangeExclusive,
}

impl BinaryOp {
    /// Whether the operator builds an integer range.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::RangeInclusive | Self::RangeExclusive)
    }
}

/// Segment of a string template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePart {
    /// Literal text.
    Text(String),
    /// `${expr}` interpolation.
    Interpolation(Expr),
}

/// Expression shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExprKind {
    /// Basic literal.
    Literal {
        /// Literal category.
        literal: LiteralKind,
        /// Literal text.
        text: String,
    },
    /// `string `...``
    StringTemplate {
        /// Template segments.
        parts: Vec<TemplatePart>,
    },
    /// Simple name reference.
    NameRef {
        /// Referenced name.
        name: String,
    },
    /// `module:name` reference.
    QualifiedNameRef {
        /// Module prefix.
        module: String,
        /// Referenced name.
        name: String,
    },
    /// Unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// Binary expression, including ranges.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// `target.field`
    FieldAccess {
        /// Accessed value.
        target: Box<Expr>,
        /// Field name.
        field: String,
    },
    /// `container[keys]`
    Index {
        /// Indexed value.
        container: Box<Expr>,
        /// Key expressions.
        keys: Vec<Expr>,
    },
    /// `f(args)`
    FunctionCall {
        /// Callee name as written.
        function: String,
        /// Arguments.
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    /// `receiver.method(args)`
    MethodCall {
        /// Receiver.
        receiver: Box<Expr>,
        /// Method name.
        method: String,
        /// Arguments.
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    /// `check expr` or `checkpanic expr`.
    Check {
        /// `true` for `checkpanic`.
        panics: bool,
        /// Checked expression.
        operand: Box<Expr>,
    },
    /// Mapping constructor.
    Mapping {
        /// Fields.
        #[serde(default)]
        fields: Vec<MappingField>,
    },
    /// List constructor.
    List {
        /// Members.
        #[serde(default)]
        items: Vec<Expr>,
    },
    /// Anonymous function expression.
    AnonymousFunction {
        /// Parameters.
        #[serde(default)]
        params: Vec<Parameter>,
        /// Body statements.
        #[serde(default)]
        body: Vec<Stmt>,
    },
}

/// Call argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Argument shape.
    pub kind: ArgumentKind,
}

/// Argument shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArgumentKind {
    /// `f(value)`
    Positional {
        /// Argument value.
        value: Expr,
    },
    /// `f(name = value)`
    Named {
        /// Parameter name.
        name: String,
        /// Argument value.
        value: Expr,
    },
    /// `f(...value)`
    Rest {
        /// Spread value.
        value: Expr,
    },
}

impl ArgumentKind {
    /// The argument's value expression.
    #[must_use]
    pub fn value(&self) -> &Expr {
        match self {
            Self::Positional { value } | Self::Named { value, .. } | Self::Rest { value } => value,
        }
    }
}

/// Field of a mapping constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingField {
    /// Node id.
    pub id: NodeId,
    /// Source range.
    pub location: Location,
    /// Field shape.
    pub kind: MappingFieldKind,
}

/// Mapping field shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MappingFieldKind {
    /// `name: value`, or the shorthand `name` when `value` is absent.
    Specific {
        /// Field name.
        name: String,
        /// Field value.
        #[serde(default)]
        value: Option<Expr>,
    },
    /// `...value`
    Spread {
        /// Spread value.
        value: Expr,
    },
}

/// Every node kind the walker can hand to a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Function,
    Method,
    Parameter,
    ModuleVariable,
    LocalVariable,
    Constant,
    Class,
    ObjectField,
    RecordType,
    RecordField,
    ObjectType,
    Assignment,
    CompoundAssignment,
    Return,
    If,
    While,
    Foreach,
    Literal,
    StringTemplate,
    NameRef,
    QualifiedNameRef,
    Unary,
    Binary,
    FieldAccess,
    Index,
    FunctionCall,
    MethodCall,
    Check,
    Mapping,
    List,
    AnonymousFunction,
    Argument,
    MappingField,
}

/// A borrowed view of any visitable node.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub enum Node<'a> {
    Function(&'a Function),
    Method(&'a Function),
    Parameter(&'a Parameter),
    ModuleVariable(&'a Variable),
    LocalVariable(&'a Variable),
    Constant(&'a Constant),
    Class(&'a Class),
    ObjectField(&'a ObjectField),
    RecordType(&'a RecordType),
    RecordField(&'a RecordField),
    ObjectType(&'a ObjectType),
    Assignment(&'a Assignment),
    CompoundAssignment(&'a CompoundAssignment),
    Return(&'a Return),
    If(&'a If),
    While(&'a While),
    Foreach(&'a Foreach),
    Expr(&'a Expr),
    Argument(&'a Argument),
    MappingField(&'a MappingField),
}

impl Node<'_> {
    /// The dispatch kind of this node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Function(_) => SyntaxKind::Function,
            Self::Method(_) => SyntaxKind::Method,
            Self::Parameter(_) => SyntaxKind::Parameter,
            Self::ModuleVariable(_) => SyntaxKind::ModuleVariable,
            Self::LocalVariable(_) => SyntaxKind::LocalVariable,
            Self::Constant(_) => SyntaxKind::Constant,
            Self::Class(_) => SyntaxKind::Class,
            Self::ObjectField(_) => SyntaxKind::ObjectField,
            Self::RecordType(_) => SyntaxKind::RecordType,
            Self::RecordField(_) => SyntaxKind::RecordField,
            Self::ObjectType(_) => SyntaxKind::ObjectType,
            Self::Assignment(_) => SyntaxKind::Assignment,
            Self::CompoundAssignment(_) => SyntaxKind::CompoundAssignment,
            Self::Return(_) => SyntaxKind::Return,
            Self::If(_) => SyntaxKind::If,
            Self::While(_) => SyntaxKind::While,
            Self::Foreach(_) => SyntaxKind::Foreach,
            Self::Expr(expr) => expr.kind.syntax_kind(),
            Self::Argument(_) => SyntaxKind::Argument,
            Self::MappingField(_) => SyntaxKind::MappingField,
        }
    }

    /// The node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Function(n) | Self::Method(n) => n.id,
            Self::Parameter(n) => n.id,
            Self::ModuleVariable(n) | Self::LocalVariable(n) => n.id,
            Self::Constant(n) => n.id,
            Self::Class(n) => n.id,
            Self::ObjectField(n) => n.id,
            Self::RecordType(n) => n.id,
            Self::RecordField(n) => n.id,
            Self::ObjectType(n) => n.id,
            Self::Assignment(n) => n.id,
            Self::CompoundAssignment(n) => n.id,
            Self::Return(n) => n.id,
            Self::If(n) => n.id,
            Self::While(n) => n.id,
            Self::Foreach(n) => n.id,
            Self::Expr(n) => n.id,
            Self::Argument(n) => n.id,
            Self::MappingField(n) => n.id,
        }
    }
}

impl ExprKind {
    /// The dispatch kind of this expression shape.
    #[must_use]
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            Self::Literal { .. } => SyntaxKind::Literal,
            Self::StringTemplate { .. } => SyntaxKind::StringTemplate,
            Self::NameRef { .. } => SyntaxKind::NameRef,
            Self::QualifiedNameRef { .. } => SyntaxKind::QualifiedNameRef,
            Self::Unary { .. } => SyntaxKind::Unary,
            Self::Binary { .. } => SyntaxKind::Binary,
            Self::FieldAccess { .. } => SyntaxKind::FieldAccess,
            Self::Index { .. } => SyntaxKind::Index,
            Self::FunctionCall { .. } => SyntaxKind::FunctionCall,
            Self::MethodCall { .. } => SyntaxKind::MethodCall,
            Self::Check { .. } => SyntaxKind::Check,
            Self::Mapping { .. } => SyntaxKind::Mapping,
            Self::List { .. } => SyntaxKind::List,
            Self::AnonymousFunction { .. } => SyntaxKind::AnonymousFunction,
        }
    }
}
