//! Tag files: no section headers, just `name` / `members` line pairs.

use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::{Host, TagRegistry};

/// Tags sorted by name; each followed by its member ids, ascending, each id
/// trailed by a space.
pub fn write(host: &dyn Host, registry: TagRegistry, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    let mut tags = host.tags(registry);
    tags.sort_by(|a, b| a.name.cmp(b.name));
    for tag in &mut tags {
        tag.members.sort_unstable();
        enc.line(tag.name);
        enc.hex_terms_line(&tag.members);
    }
    tracing::debug!("{:?} tags: {}", registry, tags.len());
    Ok(())
}
