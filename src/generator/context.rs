//! Build context for lowering.
//!
//! One `BuildContext` threads through a whole lowering run. It owns the
//! LLVM module and builder, and the scope table mapping identifiers to the
//! values they are bound to in the function being lowered.

use std::{collections::HashMap, path::Path, rc::Rc};

use inkwell::{
    builder::{Builder, BuilderError},
    context::Context,
    module::Module,
    targets::{CodeModel, InitializationConfig, RelocMode, Target, TargetMachine},
    types::FloatType,
    values::{FloatValue, FunctionValue},
    OptimizationLevel,
};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

type EntryFunction = unsafe extern "C" fn() -> f64;

pub struct BuildContext<'ctx> {
    /// Identifier to value bindings of the function being lowered.
    /// Replaced wholesale on function entry, never nested.
    pub scope: HashMap<String, FloatValue<'ctx>>,

    /// Functions whose bodies are being lowered, innermost last.
    pub under_construction: Vec<FunctionValue<'ctx>>,
    /// Entry functions wrapping bare top-level expressions, in order.
    pub entry_functions: Vec<FunctionValue<'ctx>>,

    pub llvm: &'ctx Context,
    pub module: Module<'ctx>,
    pub builder: Builder<'ctx>,

    file: Rc<String>,
}

impl<'ctx> BuildContext<'ctx> {
    /// Creates a context with an empty scope and a fresh module named after
    /// the file being compiled.
    pub fn new(llvm: &'ctx Context, file_name: &str) -> Self {
        BuildContext {
            scope: HashMap::new(),
            under_construction: vec![],
            entry_functions: vec![],
            llvm,
            module: llvm.create_module(file_name),
            builder: llvm.create_builder(),
            file: Rc::new(String::from(file_name)),
        }
    }

    /// The single numeric type of the language.
    pub fn number_type(&self) -> FloatType<'ctx> {
        self.llvm.f64_type()
    }

    /// Whether `function` encloses the function currently being lowered.
    /// The innermost function itself does not count, so recursion is allowed.
    pub fn is_enclosing(&self, function: FunctionValue<'ctx>) -> bool {
        match self.under_construction.split_last() {
            Some((_, enclosing)) => enclosing.contains(&function),
            None => false,
        }
    }

    /// Sets the module triple and data layout to the host's.
    pub fn configure_target(&self) -> Result<(), Error> {
        Target::initialize_native(&InitializationConfig::default())
            .map_err(|message| self.backend_error(message))?;

        let target_triple = TargetMachine::get_default_triple();
        let target = Target::from_triple(&target_triple)
            .map_err(|message| self.backend_error(message.to_string()))?;
        let target_machine = target
            .create_target_machine(
                &target_triple,
                "generic",
                "",
                OptimizationLevel::None,
                RelocMode::PIC,
                CodeModel::Default,
            )
            .ok_or_else(|| self.backend_error("unable to create a target machine for the host"))?;

        self.module.set_triple(&target_triple);
        self.module
            .set_data_layout(&target_machine.get_target_data().get_data_layout());

        Ok(())
    }

    /// Runs the LLVM verifier over the whole module.
    pub fn verify(&self) -> Result<(), Error> {
        self.module
            .verify()
            .map_err(|message| self.backend_error(message.to_string()))
    }

    pub fn print_to_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    pub fn save_module_to_file(&self, output_file: &Path) -> Result<(), Error> {
        self.module
            .print_to_file(output_file)
            .map_err(|message| self.backend_error(message.to_string()))
    }

    /// JIT-compiles the module and calls `function`, which must take no
    /// arguments and return a number.
    ///
    /// The module is handed over to the execution engine, so this consumes
    /// the context.
    pub fn run_function(self, function: FunctionValue<'ctx>) -> Result<f64, Error> {
        let name = function
            .get_name()
            .to_str()
            .map_err(|error| self.execution_error(error.to_string()))?
            .to_string();

        if function.count_params() != 0 || function.get_type().get_return_type().is_none() {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from("() -> Double"),
                    received: function.get_type().print_to_string().to_string(),
                },
                self.position(),
            ));
        }

        let engine = self
            .module
            .create_jit_execution_engine(OptimizationLevel::None)
            .map_err(|message| self.execution_error(message.to_string()))?;

        let compiled = unsafe { engine.get_function::<EntryFunction>(&name) }
            .map_err(|error| self.execution_error(format!("{:?}", error)))?;

        Ok(unsafe { compiled.call() })
    }

    fn position(&self) -> Position {
        Position(0, Rc::clone(&self.file))
    }

    fn backend_error(&self, message: impl Into<String>) -> Error {
        Error::new(
            ErrorImpl::BuilderError {
                message: message.into(),
            },
            self.position(),
        )
    }

    fn execution_error(&self, message: impl Into<String>) -> Error {
        Error::new(
            ErrorImpl::ExecutionError {
                message: message.into(),
            },
            self.position(),
        )
    }
}

/// Attaches the position of the node being lowered to a builder failure.
pub fn check<T>(result: Result<T, BuilderError>, span: &Span) -> Result<T, Error> {
    result.map_err(|error| {
        Error::new(
            ErrorImpl::BuilderError {
                message: format!("{:?}", error),
            },
            span.start.clone(),
        )
    })
}
