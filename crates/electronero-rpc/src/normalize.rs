//! Wire name → canonical call-site name.

/// Characters that separate words in a wire name.
const SEPARATORS: [char; 4] = ['.', '_', '/', '-'];

/// Convert a wire name into its lower-camel-case canonical form.
///
/// One leading `/` is dropped, the rest is split on `.`, `_`, `/` and `-`,
/// and every segment after the first gets its first letter upper-cased.
///
/// ```
/// use electronero_rpc::normalize::canonical_name;
///
/// assert_eq!(canonical_name("get_block_template"), "getBlockTemplate");
/// assert_eq!(canonical_name("/get_info"), "getInfo");
/// assert_eq!(canonical_name("/get_blocks.bin"), "getBlocksBin");
/// ```
pub fn canonical_name(wire_name: &str) -> String {
    let trimmed = wire_name.strip_prefix('/').unwrap_or(wire_name);
    let mut out = String::with_capacity(trimmed.len());

    for (i, segment) in trimmed.split(&SEPARATORS[..]).enumerate() {
        if i == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}
