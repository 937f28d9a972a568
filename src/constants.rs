//! Constants for payment URI parsing and building.

/// The only supported URI scheme.
pub const SCHEME: &str = "bitcoin";

/// Separates the scheme from the rest of the URI.
pub const SCHEME_SEPARATOR: char = ':';

/// Separates the address from the query string.
pub const QUERY_SEPARATOR: char = '?';

/// Separates query pairs.
pub const PAIR_SEPARATOR: char = '&';

/// Separates a query key from its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Query key for the requested amount.
pub const AMOUNT_KEY: &str = "amount";

/// Query key for the recipient label.
pub const LABEL_KEY: &str = "label";

/// Query key for the payment message.
pub const MESSAGE_KEY: &str = "message";

/// Query keys extracted into dedicated fields rather than extensions.
pub const WELL_KNOWN_KEYS: [&str; 3] = [AMOUNT_KEY, LABEL_KEY, MESSAGE_KEY];
