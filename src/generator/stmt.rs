use inkwell::{types::BasicMetadataTypeEnum, values::FunctionValue};

use crate::{
    ast::{
        statements::{FunctionNode, ReturnNode},
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    context::{check, BuildContext},
    generator::{lower, IrValue},
};

/// Declares a function in the module and lowers its body into it.
///
/// The body sees only the function's own parameters. The enclosing scope and
/// builder position are restored afterwards, so definitions may appear
/// inside other expressions. A function whose body fails to lower is removed
/// from the module again. Only entry functions may share a name; LLVM
/// uniquifies them as `main`, `main.1` and so on.
pub fn lower_function<'ctx>(
    node: &FunctionNode,
    context: &mut BuildContext<'ctx>,
) -> Result<IrValue<'ctx>, Error> {
    // Every bare top-level expression becomes its own entry function
    if !node.is_entry && context.module.get_function(&node.name).is_some() {
        return Err(Error::new(
            ErrorImpl::FunctionAlreadyDeclared {
                function: node.name.clone(),
            },
            node.span.start.clone(),
        ));
    }

    let number_type = context.number_type();
    let parameter_types: Vec<BasicMetadataTypeEnum<'ctx>> =
        vec![number_type.into(); node.arguments.len()];
    let function_type = match node.return_type {
        ValueType::Double => number_type.fn_type(&parameter_types, false),
        ValueType::Void => context.llvm.void_type().fn_type(&parameter_types, false),
    };

    let function = context.module.add_function(&node.name, function_type, None);

    let enclosing_block = context.builder.get_insert_block();
    let enclosing_scope = std::mem::take(&mut context.scope);

    context.under_construction.push(function);
    let result = lower_function_body(node, function, context);
    context.under_construction.pop();

    context.scope = enclosing_scope;
    if let Some(block) = enclosing_block {
        context.builder.position_at_end(block);
    }

    match result {
        Ok(()) => {
            if node.is_entry {
                context.entry_functions.push(function);
            }
            Ok(IrValue::Function(function))
        }
        Err(error) => {
            // Only the function's own body can call it at this point
            unsafe { function.delete() };
            Err(error)
        }
    }
}

fn lower_function_body<'ctx>(
    node: &FunctionNode,
    function: FunctionValue<'ctx>,
    context: &mut BuildContext<'ctx>,
) -> Result<(), Error> {
    let entry = context.llvm.append_basic_block(function, "entry");
    context.builder.position_at_end(entry);

    for (parameter, argument) in function.get_param_iter().zip(&node.arguments) {
        let parameter = parameter.into_float_value();
        parameter.set_name(&argument.variable_name);
        context
            .scope
            .insert(argument.variable_name.clone(), parameter);
    }

    let body = lower(&node.body, context)?;

    match node.return_type {
        ValueType::Double => {
            let value = body.into_number(node.body.get_span())?;
            check(context.builder.build_return(Some(&value)), &node.span)?;
        }
        ValueType::Void => {
            check(context.builder.build_return(None), &node.span)?;
        }
    }

    if !function.verify(false) {
        return Err(Error::new(
            ErrorImpl::FunctionVerificationFailed {
                function: node.name.clone(),
            },
            node.span.start.clone(),
        ));
    }

    Ok(())
}

/// A `return` yields the value of its operand, or nothing.
pub fn lower_return<'ctx>(
    node: &ReturnNode,
    context: &mut BuildContext<'ctx>,
) -> Result<IrValue<'ctx>, Error> {
    match &node.body {
        Some(body) => lower(body, context),
        None => Ok(IrValue::Void),
    }
}
