//! Custom assertion macros

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that an auth call failed with `kind` and the matching user message
#[macro_export]
macro_rules! assert_auth_err {
    ($result:expr, $kind:expr, $message:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => {
                assert_eq!(e.kind(), $kind);
                assert_eq!(e.to_string(), $message);
            }
        }
    };
}
