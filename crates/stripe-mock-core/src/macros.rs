/// Shallow merge of a params record into a resource record.
///
/// Plain fields overwrite the target field. `nullable` params fields are
/// `Option<Option<T>>`: `Some(None)` clears the target and `Some(Some(v))`
/// sets it. Fields left `None` in the params are untouched.
macro_rules! merge_params {
    ($record:expr, $params:ident, { $($field:ident),* $(,)? }) => {
        $(
            if let Some(value) = $params.$field {
                $record.$field = value;
            }
        )*
    };
    ($record:expr, $params:ident, { $($field:ident),* $(,)? }, nullable { $($nullable:ident),* $(,)? }) => {
        merge_params!($record, $params, { $($field),* });
        $(
            if let Some(value) = $params.$nullable {
                $record.$nullable = value;
            }
        )*
    };
}
