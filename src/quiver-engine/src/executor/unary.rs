//! Row-wise string transformation over Arrow arrays.

use arrow::array::{Array, StringArray, StringBuilder};

use common_error::QuiverResult;

/// Applies a per-value function to every row of a string array.
///
/// Output row `i` corresponds to input row `i`. Null rows stay null and the
/// function is never called for them; non-null rows hold whatever the
/// function returned, which may differ in length from the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnaryExecutor;

impl UnaryExecutor {
    /// Transform `input` row by row.
    pub fn execute<F>(input: &StringArray, mut f: F) -> QuiverResult<StringArray>
    where
        F: FnMut(&str) -> QuiverResult<String>,
    {
        let mut builder = StringBuilder::with_capacity(input.len(), input.value_data().len());

        if input.null_count() == 0 {
            for i in 0..input.len() {
                builder.append_value(f(input.value(i))?);
            }
        } else {
            for value in input {
                match value {
                    Some(v) => builder.append_value(f(v)?),
                    None => builder.append_null(),
                }
            }
        }

        Ok(builder.finish())
    }
}
