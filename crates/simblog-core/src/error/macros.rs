//! Error macros for simblog

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::SimblogError::invalid_value($context, $value))
    };
}

/// Macro for mapping storage errors
#[macro_export]
macro_rules! map_storage_err {
    ($op:expr, $error:expr) => {
        $crate::error::SimblogError::storage($op, $error)
    };
}
