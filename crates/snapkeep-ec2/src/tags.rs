use std::collections::HashMap;

pub type Tags = HashMap<String, String>;

/// Flattens key/value tag pairs into a map. Later duplicates overwrite earlier
/// ones; pairs without a key are dropped and a missing value becomes "".
pub fn flatten_tags<'a, I>(pairs: I) -> Tags
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| {
            key.map(|k| (k.to_string(), value.unwrap_or_default().to_string()))
        })
        .collect()
}
