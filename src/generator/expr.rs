use inkwell::{
    values::{BasicMetadataValueEnum, FloatValue},
    FloatPredicate,
};

use crate::{
    ast::expressions::{
        BinaryExpressionNode, BinaryOperator, CallExpressionNode, IfElseNode, NumberNode,
        VariableNode,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    context::{check, BuildContext},
    generator::{lower, IrValue},
};

pub fn lower_number<'ctx>(node: &NumberNode, context: &BuildContext<'ctx>) -> IrValue<'ctx> {
    IrValue::Number(context.number_type().const_float(node.value))
}

pub fn lower_variable<'ctx>(
    node: &VariableNode,
    context: &BuildContext<'ctx>,
) -> Result<IrValue<'ctx>, Error> {
    match context.scope.get(&node.identifier) {
        Some(value) => Ok(IrValue::Number(*value)),
        None => Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: node.identifier.clone(),
            },
            node.span.start.clone(),
        )),
    }
}

/// Lowers the left operand, then the right one, then the operator.
///
/// `<` compares as an ordered float comparison and widens the resulting bit
/// back to 0.0 or 1.0.
pub fn lower_binary_expression<'ctx>(
    node: &BinaryExpressionNode,
    context: &mut BuildContext<'ctx>,
) -> Result<IrValue<'ctx>, Error> {
    let lhs = lower(&node.lhs, context)?.into_number(node.lhs.get_span())?;
    let rhs = lower(&node.rhs, context)?.into_number(node.rhs.get_span())?;

    let builder = &context.builder;
    let value = match node.operator {
        BinaryOperator::Add => check(builder.build_float_add(lhs, rhs, "addtmp"), &node.span)?,
        BinaryOperator::Sub => check(builder.build_float_sub(lhs, rhs, "subtmp"), &node.span)?,
        BinaryOperator::Mul => check(builder.build_float_mul(lhs, rhs, "multmp"), &node.span)?,
        BinaryOperator::Div => check(builder.build_float_div(lhs, rhs, "divtmp"), &node.span)?,
        BinaryOperator::LessThan => {
            let comparison = check(
                builder.build_float_compare(FloatPredicate::OLT, lhs, rhs, "cmptmp"),
                &node.span,
            )?;
            check(
                builder.build_unsigned_int_to_float(comparison, context.number_type(), "booltmp"),
                &node.span,
            )?
        }
    };

    Ok(IrValue::Number(value))
}

/// Calls a function already present in the module.
///
/// Arguments are matched to parameters by position and lowered in source
/// order. Labels are not checked against the parameter names. A nested
/// definition may call itself but not the functions enclosing it.
pub fn lower_call_expression<'ctx>(
    node: &CallExpressionNode,
    context: &mut BuildContext<'ctx>,
) -> Result<IrValue<'ctx>, Error> {
    let Some(function) = context.module.get_function(&node.callee) else {
        return Err(Error::new(
            ErrorImpl::FunctionNotDeclared {
                function: node.callee.clone(),
            },
            node.span.start.clone(),
        ));
    };

    // A failed enclosing function is removed from the module, which must
    // not leave a call to it behind
    if context.is_enclosing(function) {
        return Err(Error::new(
            ErrorImpl::NotImplementedError {
                construct: format!(
                    "call to enclosing function `{}` from a nested definition",
                    node.callee
                ),
            },
            node.span.start.clone(),
        ));
    }

    let expected = function.count_params() as usize;
    let received = node.arguments.len();
    if received > expected {
        return Err(Error::new(
            ErrorImpl::UnexpectedArguments { expected, received },
            node.span.start.clone(),
        ));
    }
    if received < expected {
        return Err(Error::new(
            ErrorImpl::MissingArguments { expected, received },
            node.span.start.clone(),
        ));
    }

    let mut arguments: Vec<BasicMetadataValueEnum<'ctx>> = Vec::with_capacity(received);
    for argument in &node.arguments {
        let value = lower(&argument.value, context)?.into_number(argument.value.get_span())?;
        arguments.push(value.into());
    }

    let returns_value = function.get_type().get_return_type().is_some();
    // LLVM refuses to name a call producing no value
    let name = if returns_value { "calltmp" } else { "" };

    let call = check(
        context.builder.build_call(function, &arguments, name),
        &node.span,
    )?;

    Ok(match call.try_as_basic_value().left() {
        Some(value) => IrValue::Number(value.into_float_value()),
        None => IrValue::Void,
    })
}

/// Lowers a conditional into `then`, `else` and `ifcont` blocks.
///
/// The condition is true when it compares unequal to 0.0. When both branches
/// are numbers their values meet in a phi node; when both are `Void` so is
/// the whole conditional. A missing else branch yields 0.0, or `Void` when
/// the then branch does.
pub fn lower_if_else<'ctx>(
    node: &IfElseNode,
    context: &mut BuildContext<'ctx>,
) -> Result<IrValue<'ctx>, Error> {
    let condition = lower(&node.condition, context)?.into_number(node.condition.get_span())?;
    let zero = context.number_type().const_float(0.0);
    let condition = check(
        context
            .builder
            .build_float_compare(FloatPredicate::ONE, condition, zero, "ifcond"),
        &node.span,
    )?;

    let Some(function) = context
        .builder
        .get_insert_block()
        .and_then(|block| block.get_parent())
    else {
        return Err(Error::new(
            ErrorImpl::BuilderError {
                message: String::from("conditional outside of a function body"),
            },
            node.span.start.clone(),
        ));
    };

    let then_block = context.llvm.append_basic_block(function, "then");
    let else_block = context.llvm.append_basic_block(function, "else");
    let merge_block = context.llvm.append_basic_block(function, "ifcont");

    check(
        context
            .builder
            .build_conditional_branch(condition, then_block, else_block),
        &node.span,
    )?;

    context.builder.position_at_end(then_block);
    let then_value = lower(&node.then_body, context)?;
    check(
        context.builder.build_unconditional_branch(merge_block),
        &node.span,
    )?;
    let then_end = context.builder.get_insert_block().unwrap_or(then_block);

    context.builder.position_at_end(else_block);
    let else_value = match &node.else_body {
        Some(else_body) => lower(else_body, context)?,
        None if then_value == IrValue::Void => IrValue::Void,
        None => IrValue::Number(zero),
    };
    check(
        context.builder.build_unconditional_branch(merge_block),
        &node.span,
    )?;
    let else_end = context.builder.get_insert_block().unwrap_or(else_block);

    context.builder.position_at_end(merge_block);

    if then_value == IrValue::Void && else_value == IrValue::Void {
        return Ok(IrValue::Void);
    }

    let then_value: FloatValue<'ctx> = then_value.into_number(node.then_body.get_span())?;
    let else_value: FloatValue<'ctx> = match &node.else_body {
        Some(else_body) => else_value.into_number(else_body.get_span())?,
        None => else_value.into_number(&node.span)?,
    };

    let phi = check(
        context.builder.build_phi(context.number_type(), "iftmp"),
        &node.span,
    )?;
    phi.add_incoming(&[(&then_value, then_end), (&else_value, else_end)]);

    Ok(IrValue::Number(phi.as_basic_value().into_float_value()))
}
