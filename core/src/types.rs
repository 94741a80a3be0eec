//! Shared primitive types used across the fixture generator.

/// An amount in whole currency units (yen). Never negative in a
/// generated record.
pub type Yen = i64;

/// Customer identifier, "C" followed by eight digits.
pub type CustomerId = String;

/// Monthly FX trading volume, in number of contracts.
pub type ContractCount = i64;
