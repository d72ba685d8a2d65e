//! Input validation for API requests.
//!
//! Each `validate_*` function checks one field. Handlers collect the results
//! with [`ValidationErrorBuilder`] so one response reports every bad field.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ApiError, ValidationErrorBuilder};
use crate::db::{CreateLeadRequest, LoginRequest, OrderInput, OrderItem, RegisterRequest};

lazy_static! {
    /// Pragmatic email shape: local part, `@`, dotted domain
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)+$"
    ).unwrap();

    /// ISO 4217 style currency code
    static ref CURRENCY_REGEX: Regex = Regex::new(r"^[A-Za-z]{3}$").unwrap();
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    Ok(())
}

/// Validate a non-negative, finite amount
pub fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() {
        return Err("Amount must be a finite number".to_string());
    }
    if amount < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    Ok(())
}

pub fn validate_currency(currency: &str) -> Result<(), String> {
    if !CURRENCY_REGEX.is_match(currency) {
        return Err("Currency must be a 3-letter code".to_string());
    }
    Ok(())
}

pub fn validate_order_item(item: &OrderItem) -> Result<(), String> {
    if item.sku.trim().is_empty() {
        return Err("Item SKU is required".to_string());
    }
    if item.title.trim().is_empty() {
        return Err("Item title is required".to_string());
    }
    if item.qty < 0 {
        return Err("Item quantity cannot be negative".to_string());
    }
    validate_amount(item.price).map_err(|e| format!("Item price: {}", e))
}

pub fn validate_lead(lead: &CreateLeadRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    errors
        .check("name", validate_name(&lead.name))
        .check("email", validate_email(&lead.email));
    errors.finish()
}

pub fn validate_register(request: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    errors
        .check("email", validate_email(&request.email))
        .check("password", validate_password(&request.password));
    errors.finish()
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    errors
        .check("email", validate_email(&request.email))
        .check("password", validate_password(&request.password));
    errors.finish()
}

pub fn validate_order(order: &OrderInput) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if order.order_number.trim().is_empty() {
        errors.add("order_number", "Order number is required");
    }
    errors
        .check("total_amount", validate_amount(order.total_amount))
        .check("currency", validate_currency(&order.currency));

    for (index, item) in order.items.iter().enumerate() {
        errors.check(&format!("items[{}]", index), validate_order_item(item));
    }

    errors.finish()
}
