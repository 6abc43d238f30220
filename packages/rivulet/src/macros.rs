#[macro_export]
macro_rules! validate {
    ($env:expr, $assert:expr, $err:expr) => {
        {
            if ($assert) {
                Ok(())
            } else {
                let error_code: $crate::error::ErrorCode = $err;
                soroban_sdk::log!($env, "Error {} thrown at {}:{}", error_code as u32, file!(), line!());
                Err(error_code)
            }
        }
    };
    (
        $env:expr,
        $assert:expr,
        $err:expr,
        $($arg:tt)+
    ) => {
        {
            if ($assert) {
                Ok(())
            } else {
                let error_code: $crate::error::ErrorCode = $err;
                soroban_sdk::log!($env, "Error {} thrown at {}:{}", error_code as u32, file!(), line!());
                soroban_sdk::log!($env, $($arg)+);
                Err(error_code)
            }
        }
    };
}

/// Unwrap a [`RivuletResult`](crate::error::RivuletResult) at a contract
/// entry point, converting the error code into a host panic so the whole
/// invocation reverts.
#[macro_export]
macro_rules! unwrap_contract {
    ($env:expr, $result:expr) => {
        match $result {
            Ok(value) => value,
            Err(error_code) => soroban_sdk::panic_with_error!($env, error_code),
        }
    };
}
