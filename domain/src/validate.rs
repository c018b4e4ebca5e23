//! Opt-in input validation helpers. Only applied under
//! [`ValidationPolicy::Strict`](crate::ValidationPolicy::Strict).

use crate::{NewCustomer, ValidationError};

/// Account numbers are exactly eight ASCII digits.
pub fn validate_account_number(s: &str) -> Result<(), ValidationError> {
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAccountNumber(s.to_string()))
    }
}

/// Sort codes are three pairs of digits separated by dashes: `NN-NN-NN`.
pub fn validate_sort_code(s: &str) -> Result<(), ValidationError> {
    let mut pairs = 0;
    for part in s.split('-') {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidSortCode(s.to_string()));
        }
        pairs += 1;
    }
    if pairs != 3 {
        return Err(ValidationError::InvalidSortCode(s.to_string()));
    }
    Ok(())
}

/// Check every field of a new customer; the first failure wins.
pub fn validate_new_customer(input: &NewCustomer) -> Result<(), ValidationError> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    validate_account_number(&input.account_number)?;
    validate_sort_code(&input.sort_code)?;
    if input.customer_type.trim().is_empty() {
        return Err(ValidationError::EmptyCustomerType);
    }
    Ok(())
}
