//! UserStore contract tests, run against the backend selected by TEST_BACKEND

mod contract_tests;
