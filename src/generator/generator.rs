use inkwell::{
    context::Context,
    values::{FloatValue, FunctionValue},
};

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    context::BuildContext,
    expr::{
        lower_binary_expression, lower_call_expression, lower_if_else, lower_number,
        lower_variable,
    },
    stmt::{lower_function, lower_return},
};

/// The result of lowering one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrValue<'ctx> {
    Number(FloatValue<'ctx>),
    /// A function definition lowers to the function itself
    Function(FunctionValue<'ctx>),
    /// Value-less `return`, or a call to a `Void` function
    Void,
}

impl<'ctx> IrValue<'ctx> {
    pub fn get_type_name(&self) -> &'static str {
        match self {
            IrValue::Number(_) => "Double",
            IrValue::Function(_) => "Function",
            IrValue::Void => "Void",
        }
    }

    /// Unwraps a number, failing with a type mismatch at `span` otherwise.
    pub fn into_number(self, span: &Span) -> Result<FloatValue<'ctx>, Error> {
        match self {
            IrValue::Number(value) => Ok(value),
            other => Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from("Double"),
                    received: String::from(other.get_type_name()),
                },
                span.start.clone(),
            )),
        }
    }
}

/// What `generate` does when a top-level unit fails to lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing unit
    #[default]
    Abort,
    /// Record the error and continue with the next unit
    SkipUnit,
}

/// Lowers one node into one IR value, dispatching on its variant.
///
/// Children are lowered before their parent, left to right. The only state
/// touched is `context.scope` and the module under construction.
pub fn lower<'ctx>(node: &Node, context: &mut BuildContext<'ctx>) -> Result<IrValue<'ctx>, Error> {
    match node {
        Node::Number(node) => Ok(lower_number(node, context)),
        Node::Variable(node) => lower_variable(node, context),
        Node::BinaryExpression(node) => lower_binary_expression(node, context),
        Node::Function(node) => lower_function(node, context),
        Node::CallExpression(node) => lower_call_expression(node, context),
        Node::IfElse(node) => lower_if_else(node, context),
        Node::Return(node) => lower_return(node, context),
    }
}

/// Lowers top-level units in declaration order.
///
/// Returns the values of the units that lowered and every error met. Under
/// `FailurePolicy::Abort` at most one error is reported.
pub fn generate<'ctx>(
    nodes: &[Node],
    context: &mut BuildContext<'ctx>,
    policy: FailurePolicy,
) -> (Vec<IrValue<'ctx>>, Vec<Error>) {
    let mut values = vec![];
    let mut errors = vec![];

    for node in nodes {
        match lower(node, context) {
            Ok(value) => values.push(value),
            Err(error) => {
                errors.push(error);
                if policy == FailurePolicy::Abort {
                    break;
                }
            }
        }
    }

    (values, errors)
}

/// A lowered program.
pub struct Compilation<'ctx> {
    pub context: BuildContext<'ctx>,
    pub values: Vec<IrValue<'ctx>>,
    pub errors: Vec<Error>,
}

impl<'ctx> Compilation<'ctx> {
    /// The last top-level function that was lowered, if any.
    pub fn last_function(&self) -> Option<FunctionValue<'ctx>> {
        self.values.iter().rev().find_map(|value| match value {
            IrValue::Function(function) => Some(*function),
            _ => None,
        })
    }

    /// The last entry function lowered from a bare top-level expression.
    pub fn last_entry_function(&self) -> Option<FunctionValue<'ctx>> {
        self.context.entry_functions.last().copied()
    }
}

/// Creates a build context for `file_name` and lowers `nodes` into it.
pub fn compile<'ctx>(
    nodes: &[Node],
    llvm: &'ctx Context,
    file_name: &str,
    policy: FailurePolicy,
) -> Compilation<'ctx> {
    let mut context = BuildContext::new(llvm, file_name);
    let (values, errors) = generate(nodes, &mut context, policy);

    Compilation {
        context,
        values,
        errors,
    }
}
