//! URL-aware masking.
//!
//! Connection strings are the usual place secrets hide in an environment:
//! `postgres://app:hunter2@db:5432/app`. Hiding the whole value makes
//! startup logs useless, so [`mask_url`] only blanks the parts you name.

use crate::entry::{BoxError, Mask};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Replaces every masked URL component.
pub const PLACEHOLDER: &str = "*****";

/// A component of a URL that can be masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlPart {
    Scheme,
    Username,
    Password,
    Host,
    Port,
    Path,
    Query,
    Fragment,
}

impl UrlPart {
    pub const ALL: [UrlPart; 8] = [
        UrlPart::Scheme,
        UrlPart::Username,
        UrlPart::Password,
        UrlPart::Host,
        UrlPart::Port,
        UrlPart::Path,
        UrlPart::Query,
        UrlPart::Fragment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlPart::Scheme => "scheme",
            UrlPart::Username => "username",
            UrlPart::Password => "password",
            UrlPart::Host => "host",
            UrlPart::Port => "port",
            UrlPart::Path => "path",
            UrlPart::Query => "query",
            UrlPart::Fragment => "fragment",
        }
    }
}

impl fmt::Display for UrlPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlPart {
    type Err = String;

    /// Accepts the component names and their WHATWG aliases
    /// (`protocol`, `hostname`, `pathname`, `search`, `hash`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scheme" | "protocol" => Ok(UrlPart::Scheme),
            "username" | "user" => Ok(UrlPart::Username),
            "password" => Ok(UrlPart::Password),
            "host" | "hostname" => Ok(UrlPart::Host),
            "port" => Ok(UrlPart::Port),
            "path" | "pathname" => Ok(UrlPart::Path),
            "query" | "search" => Ok(UrlPart::Query),
            "fragment" | "hash" => Ok(UrlPart::Fragment),
            other => Err(format!(
                "unknown URL component '{}', expected one of: {}",
                other,
                UrlPart::ALL.map(|part| part.as_str()).join(", ")
            )),
        }
    }
}

/// Builds a mask that prints a URL with the given components replaced by
/// [`PLACEHOLDER`].
///
/// Works on string values and on [`Url`] values produced by
/// [`parsers::url`](crate::parsers::url). Components the URL does not have are
/// left out, and an empty or `/` path is never masked. Any other value, or a
/// string that is not a URL, makes the mask fail.
///
/// ```
/// use envspec_core::{UrlPart, Value, mask_url, Mask};
///
/// let Mask::With(mask) = mask_url([UrlPart::Password, UrlPart::Port]) else {
///     unreachable!()
/// };
/// let shown = mask(&Value::from("postgres://app:hunter2@db:5432/app")).unwrap();
/// assert_eq!(shown, "postgres://app:*****@db:*****/app");
/// ```
pub fn mask_url<I>(parts: I) -> Mask
where
    I: IntoIterator<Item = UrlPart>,
{
    let mut masked: Vec<UrlPart> = Vec::new();
    for part in parts {
        if !masked.contains(&part) {
            masked.push(part);
        }
    }
    Mask::with(move |value: &Value| mask_value(value, &masked))
}

fn mask_value(value: &Value, parts: &[UrlPart]) -> Result<String, BoxError> {
    match value {
        Value::Str(s) => {
            let url = Url::parse(s.trim())?;
            Ok(serialize(&url, parts))
        }
        Value::Other(opaque) => match opaque.downcast_ref::<Url>() {
            Some(url) => Ok(serialize(url, parts)),
            None => Err(format!("cannot mask a {} as a URL", opaque.type_name()).into()),
        },
        other => Err(format!("cannot mask a {} as a URL", other.kind()).into()),
    }
}

// Reassembles the URL from its components. Reading the components instead of
// going through the setters leaves the source URL alone and lets the port and
// scheme hold a placeholder, which no setter accepts.
fn serialize(url: &Url, parts: &[UrlPart]) -> String {
    let hide = |part: UrlPart, text: &str| -> String {
        if parts.contains(&part) && !text.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            text.to_string()
        }
    };

    let mut out = hide(UrlPart::Scheme, url.scheme());
    out.push(':');

    if url.has_authority() {
        out.push_str("//");
        let username = url.username();
        let password = url.password();
        if !username.is_empty() || password.is_some() {
            out.push_str(&hide(UrlPart::Username, username));
            if let Some(password) = password {
                out.push(':');
                out.push_str(&hide(UrlPart::Password, password));
            }
            out.push('@');
        }
        if let Some(host) = url.host_str() {
            out.push_str(&hide(UrlPart::Host, host));
        }
        if let Some(port) = url.port() {
            out.push(':');
            out.push_str(&hide(UrlPart::Port, &port.to_string()));
        }
    }

    let path = url.path();
    if parts.contains(&UrlPart::Path) && !path.is_empty() && path != "/" {
        if path.starts_with('/') {
            out.push('/');
        }
        out.push_str(PLACEHOLDER);
    } else {
        out.push_str(path);
    }

    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(&hide(UrlPart::Query, query));
    }
    if let Some(fragment) = url.fragment() {
        out.push('#');
        out.push_str(&hide(UrlPart::Fragment, fragment));
    }

    out
}
