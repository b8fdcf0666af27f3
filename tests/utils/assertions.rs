//! Custom assertions for contract testing

/// Assert a `try_*` client call failed with the given contract error
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected_error:expr) => {
        match $result {
            Err(Ok(code)) => assert_eq!(code, $expected_error, "Contract error code mismatch"),
            Err(Err(other)) => panic!("Expected contract error, got invoke error {:?}", other),
            Ok(_) => panic!("Expected contract error but succeeded"),
        }
    };
}

/// Assert a `try_*` client call succeeded and yield its value
#[macro_export]
macro_rules! assert_success {
    ($result:expr) => {
        match $result {
            Ok(Ok(value)) => value,
            other => panic!("Contract operation failed: {:?}", other),
        }
    };
}
