use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::hello::clienthello::{parse_client_hello, ParseError};
use crate::hello::types::ExtractedHandshake;
use crate::verify::scenario::Scenario;

/// Which of the three negotiable lists a comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CipherSuites,
    ProtocolVersions,
    AlpnProtocols,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::CipherSuites => "cipher suites",
            Field::ProtocolVersions => "protocol versions",
            Field::AlpnProtocols => "ALPNs",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("expected and actual {field} differ: transmitted {transmitted:?}, expected {expected:?}")]
    Mismatch {
        field: Field,
        transmitted: Vec<String>,
        expected: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The hello decoded but diverged; `report` holds all three comparisons.
    #[error("{error}")]
    Verify {
        report: Box<VerifyReport>,
        error: VerifyError,
    },
}

/// One list as sent on the wire next to what it should have been.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListComparison {
    pub field: Field,
    pub transmitted: Vec<String>,
    pub expected: Vec<String>,
}

impl ListComparison {
    /// Same length, same elements, same order.
    pub fn matches(&self) -> bool {
        self.transmitted == self.expected
    }
}

/// Outcome of comparing one decoded ClientHello with a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub comparisons: Vec<ListComparison>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.comparisons.iter().all(ListComparison::matches)
    }

    pub fn comparison(&self, field: Field) -> Option<&ListComparison> {
        self.comparisons.iter().find(|c| c.field == field)
    }

    /// Fail on the first list that diverges, in the order cipher suites,
    /// protocol versions, ALPN.
    pub fn ensure_matched(&self) -> Result<(), VerifyError> {
        match self.comparisons.iter().find(|c| !c.matches()) {
            Some(c) => Err(VerifyError::Mismatch {
                field: c.field,
                transmitted: c.transmitted.clone(),
                expected: c.expected.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.comparisons {
            let label = match c.field {
                Field::CipherSuites => "Ciphersuites",
                Field::ProtocolVersions => "Protocol versions",
                Field::AlpnProtocols => "ALPNs",
            };
            writeln!(f, "{} transmitted in ClientHello: [{}]", label, c.transmitted.join(", "))?;
            writeln!(f, "Expected {}: [{}]", c.field, c.expected.join(", "))?;
        }
        Ok(())
    }
}

/// Compare decoded lists against the scenario's expectations.
pub fn verify(hello: &ExtractedHandshake, scenario: &Scenario) -> VerifyReport {
    VerifyReport {
        comparisons: vec![
            ListComparison {
                field: Field::CipherSuites,
                transmitted: hello.cipher_suites.clone(),
                expected: scenario.expected_cipher_suites(),
            },
            ListComparison {
                field: Field::ProtocolVersions,
                transmitted: hello.protocol_versions.clone(),
                expected: scenario.expected_protocol_versions(),
            },
            ListComparison {
                field: Field::AlpnProtocols,
                transmitted: hello.alpn_protocols.clone(),
                expected: scenario.expected_alpn(),
            },
        ],
    }
}

/// Decode `raw`, compare it with `scenario`, and fail on any difference.
pub fn check_client_hello(raw: &[u8], scenario: &Scenario) -> Result<VerifyReport, CheckError> {
    let hello = parse_client_hello(raw)?;
    let report = verify(&hello, scenario);
    for line in report.to_string().lines() {
        debug!("{}", line);
    }
    match report.ensure_matched() {
        Ok(()) => Ok(report),
        Err(error) => Err(CheckError::Verify {
            report: Box::new(report),
            error,
        }),
    }
}
