//! Recipient resolution: raw user input to an on-chain address
//!
//! Resolution order:
//! 1. Already a valid Sui address → returned unchanged, no network call.
//! 2. Otherwise normalized into a SuiNS query form (`.sui` names pass
//!    through, anything else becomes an `@handle`).
//! 3. A syntactically valid name is looked up once; the record may be
//!    unbound.
//! 4. Anything else resolves to `None` without touching the network.

use crate::address::is_valid_sui_address;
use crate::client::RpcClient;
use crate::error::WasmSuiError;

/// SuiNS name-service suffix marker
const NS_SUFFIX: &str = ".sui";

/// SuiNS handle marker
const NS_HANDLE_MARKER: char = '@';

/// Maximum total length of a SuiNS name
const NS_MAX_LENGTH: usize = 235;

/// Maximum length of one SuiNS label
const NS_MAX_LABEL: usize = 63;

/// Resolve raw recipient input to a Sui address.
///
/// Returns `Ok(None)` when the input is neither a valid address nor a
/// valid name, or when the name has no target address bound.
pub async fn resolve<C: RpcClient + ?Sized>(
    client: &C,
    recipient: &str,
) -> Result<Option<String>, WasmSuiError> {
    if is_valid_sui_address(recipient) {
        return Ok(Some(recipient.to_string()));
    }

    let name = normalize_ns_query(recipient);
    if !is_valid_sui_ns_name(&name) {
        return Ok(None);
    }

    client.get_name_record(&name).await
}

/// Normalize raw input into a SuiNS query form.
///
/// Input containing the `.sui` suffix marker is used as-is; anything else
/// is treated as a handle and gets the `@` marker prepended, stripping a
/// pre-existing marker first so `@alice` never becomes `@@alice`.
pub fn normalize_ns_query(input: &str) -> String {
    if input.contains(NS_SUFFIX) {
        input.to_string()
    } else {
        let handle = input.strip_prefix(NS_HANDLE_MARKER).unwrap_or(input);
        format!("{}{}", NS_HANDLE_MARKER, handle)
    }
}

/// Check whether a string is a syntactically valid SuiNS name.
///
/// Two accepted forms, matching the Sui SDK's `isValidSuiNSName`:
/// - domain form: one or more labels followed by the `sui` TLD
///   (`alice.sui`, `sub.alice.sui`)
/// - at form: `@handle` or `labels@handle` (`@alice`, `sub@alice`)
///
/// Labels are 1-63 characters of `[a-z0-9-]` (case-insensitive) with no
/// leading or trailing hyphen. Pure syntax check, no I/O.
pub fn is_valid_sui_ns_name(name: &str) -> bool {
    if name.is_empty() || name.len() > NS_MAX_LENGTH {
        return false;
    }

    match name.match_indices(NS_HANDLE_MARKER).count() {
        0 => {
            // Domain form: labels + "sui" TLD
            let labels: Vec<&str> = name.split('.').collect();
            if labels.len() < 2 {
                return false;
            }
            let Some((tld, rest)) = labels.split_last() else {
                return false;
            };
            tld.eq_ignore_ascii_case("sui") && rest.iter().all(|l| is_valid_ns_label(l))
        }
        1 => {
            // At form: [labels@]handle
            let Some((left, right)) = name.split_once(NS_HANDLE_MARKER) else {
                return false;
            };
            if !is_valid_ns_label(right) {
                return false;
            }
            left.is_empty() || left.split('.').all(is_valid_ns_label)
        }
        _ => false,
    }
}

fn is_valid_ns_label(label: &str) -> bool {
    if label.is_empty() || label.len() > NS_MAX_LABEL {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
