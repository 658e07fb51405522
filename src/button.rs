// Button action URIs.
//
// A button span carries an action (`act`) and optional `name`/`val`/`ref`
// fields. `url` actions open the referenced web page with the button's
// name/value appended to the query. `pub` actions post the button back to
// the chat through a fixed deep link. The output must be reproducible byte
// for byte, so query parameters are always appended in the same order.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::drafty::{data_str, data_string, Data};

/// Deep link used for `pub` actions.
pub const PUB_ACTION_BASE: &str = "tinode:///post";

/// Value sent when a button has a name but no `val`.
const DEFAULT_VALUE: &str = "1";

/// Leading URI scheme, before any normalization.
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme pattern is valid"));

/// Build the URI a button triggers, from its visible text and its data.
///
/// Returns `None` for unknown actions and for `url` actions whose `ref` is
/// not an `http`/`https` URL (scheme compared case-sensitively).
pub fn build_uri(face: &str, data: &Data) -> Option<String> {
    match data_str(data, "act")? {
        "url" => url_action(data),
        "pub" => pub_action(face, data),
        _ => None,
    }
}

fn url_action(data: &Data) -> Option<String> {
    let reference = data_str(data, "ref")?;
    let scheme = SCHEME.captures(reference)?.get(1)?.as_str();
    if scheme != "http" && scheme != "https" {
        return None;
    }

    let mut url = Url::parse(reference).ok()?;
    if let Some(name) = data_string(data, "name") {
        let value = data_string(data, "val").unwrap_or_else(|| DEFAULT_VALUE.to_string());
        url.query_pairs_mut().append_pair(&name, &value);
    }
    Some(url.into())
}

fn pub_action(face: &str, data: &Data) -> Option<String> {
    let mut url = Url::parse(PUB_ACTION_BASE).ok()?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("title", face);
        if let Some(name) = data_string(data, "name") {
            let value = data_string(data, "val").unwrap_or_else(|| DEFAULT_VALUE.to_string());
            query.append_pair("name", &name);
            query.append_pair("val", &value);
        }
    }
    Some(url.into())
}
