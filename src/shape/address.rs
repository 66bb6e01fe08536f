//! Cleans the handful of address fields that are commonly mistagged.
//!
//! The generic pass removes one parenthesized remark or `yes`, then anything from the
//! first `;` on, then the first run of whitespace. Each step strips a single match;
//! nothing is repeated until the value stops changing.

use regex::Regex;

use crate::data::record::Record;

use super::patterns::{
    ADDR_PROBLEM_CHARS, ADDR_SEMICOLON, ADDR_SPACE, CITY, PHONE_NUMBER, POSTCODE, WARD,
};

/// Cleaned in this order. A key is looked up when it is reached, so a street created
/// from a ward or a postcode moved out of the street gets cleaned too.
pub const ADDRESS_KEYS: [&str; 5] = ["city", "street", "housenumber", "housename", "postcode"];

fn strip_first(pattern: &Regex, text: &str) -> String {
    pattern.replace(text, "").into_owned()
}

pub fn clean_generic(text: &str) -> String {
    let text = strip_first(&ADDR_PROBLEM_CHARS, text);
    let text = strip_first(&ADDR_SEMICOLON, &text);
    strip_first(&ADDR_SPACE, &text)
}

/// `123-4567` -> `1234567`. Only call on values matching [`POSTCODE`].
fn join_postcode(text: &str) -> String {
    text.replace('-', "")
}

pub fn normalize_address(record: &mut Record) {
    for key in ADDRESS_KEYS {
        let Some(raw) = record.address_value(key) else {
            continue;
        };
        let text = clean_generic(raw);

        match key {
            "city" => clean_city(record, text),
            "postcode" => {
                let text = if POSTCODE.is_match(&text) { join_postcode(&text) } else { text };
                record.set_address(key, text);
            },
            "street" | "housenumber" => relocate_misfiled(record, key, text),
            _ => record.set_address(key, text),
        }
    }
}

/// Keeps only the `***市` part of the city. A ward found in the same value is
/// prepended to the street as is, without a separator.
fn clean_city(record: &mut Record, text: String) {
    // An unmatched city is blanked rather than kept.
    let city = CITY.find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    record.set_address("city", city);

    if let Some(ward) = WARD.find(&text) {
        let street = match record.address_value("street") {
            Some(street) => format!("{}{}", ward.as_str(), street),
            None => ward.as_str().to_string(),
        };
        record.set_address("street", street);
    }
}

/// Phone numbers and postcodes typed into the street or housenumber are moved to
/// `created.phone` / `address.postcode` unless those are already filled. At most one
/// move happens per field, and a phone number never falls through to the postcode check.
fn relocate_misfiled(record: &mut Record, key: &str, text: String) {
    if PHONE_NUMBER.is_match(&text) {
        if record.created_value("phone").is_none() {
            record.set_created("phone", text);
            record.set_address(key, String::new());
            return;
        }
    } else if POSTCODE.is_match(&text) && record.address_value("postcode").is_none() {
        record.set_address("postcode", join_postcode(&text));
        record.set_address(key, String::new());
        return;
    }
    record.set_address(key, text);
}
