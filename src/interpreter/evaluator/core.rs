use crate::{
    ast::Expr,
    context::core::VariableContext,
    error::{ExpressionError, RuntimeError},
    interpreter::{evaluator::function::core::call_builtin, parser::core::parse, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl VariableContext<'_> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Children are
    /// evaluated left to right before their parent, and every operand is
    /// evaluated: `&&` and `||` do not short-circuit.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by variable resolution, an operator, or a
    /// builtin function.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     context::{core::VariableContext, variables::Variables},
    ///     interpreter::{parser::core::parse, value::core::Value},
    /// };
    ///
    /// let mut globals = Variables::new();
    /// globals.set("version", Value::Integer(3));
    ///
    /// let context = VariableContext::new(&globals);
    /// let expr = parse("version * 2 + 1").unwrap();
    /// assert_eq!(context.eval(&expr).unwrap(), Value::Integer(7));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Variable { name, .. } => self.resolve(name),
            Expr::UnaryOp { op, expr, .. } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value)
            },
            Expr::BinaryOp { left, op, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expr::FunctionCall { name, arguments, .. } => {
                let values = arguments.iter()
                                      .map(|argument| self.eval(argument))
                                      .collect::<EvalResult<Vec<_>>>()?;
                call_builtin(name, &values)
            },
        }
    }

    /// Parses and evaluates expression text in one step.
    ///
    /// # Errors
    /// Returns `ExpressionError::Parse` if the text does not parse and
    /// `ExpressionError::Runtime` if evaluation fails.
    ///
    /// # Example
    /// ```
    /// use sift::{
    ///     context::{core::VariableContext, variables::Variables},
    ///     interpreter::value::core::Value,
    /// };
    ///
    /// let globals = Variables::new();
    /// let context = VariableContext::new(&globals);
    /// assert_eq!(context.eval_source("\"v\" + 1.5").unwrap(), Value::from("v1.5"));
    /// assert!(context.eval_source("1 +").is_err());
    /// ```
    pub fn eval_source(&self, source: &str) -> Result<Value, ExpressionError> {
        let expr = parse(source)?;
        Ok(self.eval(&expr)?)
    }
}
