use crate::error::EvalResult;
use crate::eval::Expr;
use crate::functions::{eval_text, FunctionContext, ProcedureSpec, VAR_ARGS};

inventory::submit! {
    ProcedureSpec {
        name: "println",
        min_args: 0,
        max_args: VAR_ARGS,
        help: "println(a, b, ...): outputs the arguments as one comma-separated line",
        implementation: println_proc,
    }
}

fn println_proc(ctx: &dyn FunctionContext, args: &[Expr]) -> EvalResult<()> {
    let parts = args
        .iter()
        .map(|arg| eval_text(ctx, arg))
        .collect::<EvalResult<Vec<_>>>()?;
    ctx.write_line(&parts.join(","));
    Ok(())
}
