use crate::error::EvalResult;
use crate::eval::Expr;
use crate::functions::{eval_text, FunctionContext, FunctionSpec};
use crate::value::Value;

inventory::submit! {
    FunctionSpec {
        name: "env",
        min_args: 1,
        max_args: 1,
        help: "env(name): the value of the environment variable 'name', empty if not set",
        implementation: env_fn,
    }
}

fn env_fn(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<Value> {
    let name = eval_text(ctx, &args[0])?;
    let value = match std::env::var(&name) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("env({name}): {err}");
            String::new()
        }
    };
    Ok(Value::Text(value))
}
