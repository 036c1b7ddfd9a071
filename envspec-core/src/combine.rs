use crate::error::CombineError;

/// Enforces "all or none" over a group of optional values.
///
/// Some variables only make sense together (a username needs a password).
/// `combine` returns `Ok(None)` when every value is `None`, the unwrapped
/// values in input order when every value is `Some`, and an error naming both
/// sides otherwise. An empty group counts as "none".
///
/// ```
/// use envspec_core::combine;
///
/// let both = combine([("USER", Some("app")), ("PASSWORD", Some("s3cret"))]).unwrap();
/// assert_eq!(both, Some(vec![("USER", "app"), ("PASSWORD", "s3cret")]));
///
/// let neither = combine([("USER", None::<&str>), ("PASSWORD", None)]).unwrap();
/// assert_eq!(neither, None);
///
/// let err = combine([("USER", Some("app")), ("PASSWORD", None)]).unwrap_err();
/// assert_eq!(err.present, ["USER"]);
/// assert_eq!(err.absent, ["PASSWORD"]);
/// ```
pub fn combine<K, T, I>(group: I) -> Result<Option<Vec<(K, T)>>, CombineError>
where
    I: IntoIterator<Item = (K, Option<T>)>,
    K: AsRef<str>,
{
    let entries: Vec<(K, Option<T>)> = group.into_iter().collect();

    let mut present = Vec::new();
    let mut absent = Vec::new();
    for (name, value) in &entries {
        let side = if value.is_some() { &mut present } else { &mut absent };
        side.push(name.as_ref().to_string());
    }

    if present.is_empty() {
        return Ok(None);
    }
    if !absent.is_empty() {
        return Err(CombineError { present, absent });
    }

    Ok(Some(
        entries
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect(),
    ))
}
