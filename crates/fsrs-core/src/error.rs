// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

/// The closed set of ways the core can fail. There are no retryable
/// failures: the core performs no I/O.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// A decoded payload had a malformed timestamp, or a rating/state
    /// string outside its closed vocabulary.
    InvalidFormat,
    /// A caller constructed a `Scheduler` or step table that violates a
    /// documented precondition (wrong parameter count, out-of-range
    /// retention, non-positive step).
    ContractViolation,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContractViolation, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let kind = match self.kind {
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::ContractViolation => "contract_violation",
        };
        write!(f, "{kind}: {}", self.message)
    }
}

impl std::error::Error for Error {}

pub type Fallible<T> = Result<T, Error>;

pub fn fail<T>(kind: ErrorKind, msg: impl Into<String>) -> Fallible<T> {
    Err(Error::new(kind, msg))
}
