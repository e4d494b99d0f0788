/// Cut the release number out of a tag label of the form `text-version`.
///
/// Labels without a dash are returned unchanged, absent labels become empty.
pub fn release_number<'a>(tag: impl Into<Option<&'a str>>) -> &'a str {
    let tag = match tag.into() {
        Some(tag) => tag,
        None => return "",
    };

    match tag.rfind('-') {
        Some(index) => &tag[index + 1..],
        None => tag,
    }
}
