use expr_model::SheetSource;
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::prelude::*;

use crate::error::EvalResult;
use crate::eval::{EvalConfig, Evaluator, Expr};
use crate::symbols::SymbolTable;
use crate::value::Value;

/// Evaluate `expr` once per symbol table, e.g. once per record of a report.
///
/// Results are returned in input order. With the `parallel` feature the rows are spread across
/// the rayon thread pool; each row still gets its own [`Evaluator`].
pub fn evaluate_batch(
    expr: &Expr,
    rows: &[SymbolTable],
    sheet: Option<&(dyn SheetSource + Sync)>,
    config: EvalConfig,
) -> Vec<EvalResult<Value>> {
    let eval_row = |symbols: &SymbolTable| {
        let mut evaluator = Evaluator::new(symbols).with_config(config);
        if let Some(sheet) = sheet {
            evaluator = evaluator.with_sheet(sheet);
        }
        evaluator.evaluate(expr)
    };

    log::debug!("evaluating expression for {} rows", rows.len());

    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    {
        rows.par_iter().map(eval_row).collect()
    }
    #[cfg(not(all(feature = "parallel", not(target_arch = "wasm32"))))]
    {
        rows.iter().map(eval_row).collect()
    }
}
