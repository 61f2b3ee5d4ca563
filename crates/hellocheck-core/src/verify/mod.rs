pub mod report;
pub mod scenario;

pub use report::{check_client_hello, verify, CheckError, Field, ListComparison, VerifyError, VerifyReport};
pub use scenario::{Scenario, ScenarioError};
